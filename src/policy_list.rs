// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Comma-separated lists of policies, as carried by a single header field.

use std::fmt;
use std::str::FromStr;

use crate::error::{CspError, Result};
use crate::patterns;
use crate::policy::Policy;

pub const CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
pub const CONTENT_SECURITY_POLICY_REPORT_ONLY: &str = "Content-Security-Policy-Report-Only";

/// Inserted between policies added programmatically.
pub const DEFAULT_POLICY_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyList {
    policies: Vec<Policy>,
    separators: Vec<String>,
    leading: String,
    trailing: String,
}

impl PolicyList {
    pub fn new(policies: impl IntoIterator<Item = Policy>) -> Result<Self> {
        let policies: Vec<Policy> = policies.into_iter().collect();
        if policies.is_empty() {
            return Err(CspError::EmptyPolicyList);
        }
        let separators = vec![DEFAULT_POLICY_SEPARATOR.to_string(); policies.len() - 1];
        Ok(Self {
            policies,
            separators,
            leading: String::new(),
            trailing: String::new(),
        })
    }

    /// Build a list with explicit separators, one fewer than policies.
    pub fn with_separators(policies: Vec<Policy>, separators: Vec<String>) -> Result<Self> {
        if policies.is_empty() {
            return Err(CspError::EmptyPolicyList);
        }
        if separators.len() + 1 != policies.len() {
            return Err(CspError::SeparatorCount {
                expected: policies.len() - 1,
                found: separators.len(),
            });
        }
        let sep = &patterns::POLICY_SEPARATOR;
        if let Some(bad) = separators.iter().find(|s| !sep.is_match(s)) {
            return Err(CspError::MalformedSeparator(bad.clone(), sep.name()));
        }
        Ok(Self {
            policies,
            separators,
            leading: String::new(),
            trailing: String::new(),
        })
    }

    /// Combine several header field values (e.g. repeated
    /// `Content-Security-Policy` lines) into one list.
    ///
    /// Each value may itself hold several comma-separated policies.
    pub fn from_header_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut policies = Vec::new();
        for value in values {
            let list = crate::parse::parse_policy_list(value)?;
            policies.extend(list.policies);
        }
        Self::new(policies)
    }

    pub(crate) fn from_parts(
        policies: Vec<Policy>,
        separators: Vec<String>,
        leading: &str,
        trailing: &str,
    ) -> Self {
        debug_assert_eq!(separators.len() + 1, policies.len());
        Self {
            policies,
            separators,
            leading: leading.to_string(),
            trailing: trailing.to_string(),
        }
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn separators(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.separators.iter().map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Policy> {
        self.policies.iter()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl<'a> IntoIterator for &'a PolicyList {
    type Item = &'a Policy;
    type IntoIter = std::slice::Iter<'a, Policy>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PolicyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.leading)?;
        for (i, policy) in self.policies.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.separators[i - 1])?;
            }
            write!(f, "{policy}")?;
        }
        f.write_str(&self.trailing)
    }
}

impl FromStr for PolicyList {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse::parse_policy_list(s)
    }
}
