// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Policy linting and rule evaluation.

use crate::config::Config;
use crate::policy::Policy;
use crate::policy_list::PolicyList;
use crate::rules::RuleConfigEngine;
use serde::{Deserialize, Serialize};

/// Represents a single rule violation detected by the linter.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

/// Severity level for a rule violation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Spelling used in rule configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Lint one policy with every enabled rule.
pub fn lint_policy(policy: &Policy, cfg: &Config, engine: &RuleConfigEngine) -> Vec<Violation> {
    let mut out = Vec::new();
    for rule in crate::rules::RULES {
        if cfg.is_enabled(rule.id()) {
            tracing::trace!(rule = rule.id(), "checking policy");
            out.extend(rule.check_policy_erased(policy, engine));
        }
    }
    out
}

/// Lint every policy of a list, in order.
pub fn lint_policy_list(
    list: &PolicyList,
    cfg: &Config,
    engine: &RuleConfigEngine,
) -> Vec<Violation> {
    list.iter()
        .flat_map(|policy| lint_policy(policy, cfg, engine))
        .collect()
}
