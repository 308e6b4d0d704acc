// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::directive::Directive;
use crate::lint::{Severity, Violation};
use crate::rules::Rule;

pub struct DirectiveSingleValueArity;

impl Rule for DirectiveSingleValueArity {
    type Config = crate::rules::RuleConfig;

    fn id(&self) -> &'static str {
        "directive_single_value_arity"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check_directive(&self, directive: &Directive, config: &Self::Config) -> Option<Violation> {
        let expected = directive.shape().required_arity()?;
        if directive.len() == expected {
            return None;
        }
        Some(Violation {
            rule: self.id().into(),
            severity: config.severity,
            message: format!(
                "Directive '{}' takes exactly {} value, found {}",
                directive.name(),
                expected,
                directive.len()
            ),
        })
    }
}
