// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::directive::Directive;
use crate::helpers::token::find_invalid_directive_name_char;
use crate::lint::{Severity, Violation};
use crate::patterns::DIRECTIVE_NAME;
use crate::rules::Rule;

pub struct DirectiveNameSyntax;

impl Rule for DirectiveNameSyntax {
    type Config = crate::rules::RuleConfig;

    fn id(&self) -> &'static str {
        "directive_name_syntax"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check_directive(&self, directive: &Directive, config: &Self::Config) -> Option<Violation> {
        if DIRECTIVE_NAME.is_match(directive.name()) {
            return None;
        }
        let c = find_invalid_directive_name_char(directive.name())?;
        Some(Violation {
            rule: self.id().into(),
            severity: config.severity,
            message: format!(
                "Directive name '{}' contains invalid character {:?}",
                directive.name(),
                c
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_test_rule_config, policy};
    use rstest::rstest;

    #[rstest]
    #[case("script-src 'self'", None)]
    #[case("X-Custom-2 a", None)]
    #[case("ScriptSrc 'self'", None)]
    #[case("x.y a", Some("Directive name 'x.y' contains invalid character '.'"))]
    #[case("x_custom a", Some("Directive name 'x_custom' contains invalid character '_'"))]
    #[case("img-src *; scr\u{e9}pt-src 'self'", Some("Directive name 'scr\u{e9}pt-src' contains invalid character '\u{e9}'"))]
    fn check_directive_cases(#[case] text: &str, #[case] expected: Option<&str>) {
        let rule = DirectiveNameSyntax;
        let v = rule.check_policy(&policy(text), &make_test_rule_config());
        assert_eq!(v.first().map(|v| v.message.as_str()), expected);
    }
}
