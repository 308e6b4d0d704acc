// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::lint::{Severity, Violation};
use crate::policy::Policy;
use crate::rules::Rule;

/// Value tokens the parser could not classify, inside directives it knows.
pub struct DirectiveUnrecognizedValue;

impl Rule for DirectiveUnrecognizedValue {
    type Config = crate::rules::RuleConfig;

    fn id(&self) -> &'static str {
        "directive_unrecognized_value"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warn
    }

    fn check_policy(&self, policy: &Policy, config: &Self::Config) -> Vec<Violation> {
        let mut out = Vec::new();
        for directive in policy.iter().filter(|d| d.is_recognized()) {
            for value in directive.values().filter(|v| v.is_unrecognized()) {
                out.push(Violation {
                    rule: self.id().into(),
                    severity: config.severity,
                    message: format!(
                        "Unrecognized value '{}' in directive '{}'",
                        value,
                        directive.name()
                    ),
                });
            }
        }
        out
    }
}
