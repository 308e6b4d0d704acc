// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use std::collections::HashSet;

use crate::lint::{Severity, Violation};
use crate::policy::Policy;
use crate::rules::Rule;

/// User agents ignore every directive after the first of the same kind.
pub struct PolicyDuplicateDirective;

impl Rule for PolicyDuplicateDirective {
    type Config = crate::rules::RuleConfig;

    fn id(&self) -> &'static str {
        "policy_duplicate_directive"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    fn check_policy(&self, policy: &Policy, config: &Self::Config) -> Vec<Violation> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (index, directive) in policy.iter().enumerate() {
            let Some(kind) = directive.kind() else {
                continue;
            };
            if !seen.insert(kind) {
                out.push(Violation {
                    rule: self.id().into(),
                    severity: config.severity,
                    message: format!(
                        "Directive '{}' at position {} repeats an earlier '{}' and will be ignored",
                        directive.name(),
                        index,
                        kind
                    ),
                });
            }
        }
        out
    }
}
