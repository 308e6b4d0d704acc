// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use crate::directive::Directive;
use crate::lint::{Severity, Violation};
use crate::rules::Rule;

/// Typed values the directive's grammar does not allow. Parsed policies never
/// trigger this; it catches programmatically built directives.
pub struct DirectiveIllegalValue;

impl Rule for DirectiveIllegalValue {
    type Config = crate::rules::RuleConfig;

    fn id(&self) -> &'static str {
        "directive_illegal_value"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check_directive(&self, directive: &Directive, config: &Self::Config) -> Option<Violation> {
        if !directive.is_recognized() {
            return None;
        }
        let shape = directive.shape();
        let value = directive
            .values()
            .find(|v| !v.is_unrecognized() && !shape.accepts(v.kind()))?;
        Some(Violation {
            rule: self.id().into(),
            severity: config.severity,
            message: format!(
                "{} {} is not allowed in directive '{}'",
                value.kind(),
                value,
                directive.name()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::DirectiveKind;
    use crate::policy::Policy;
    use crate::test_helpers::{make_test_rule_config, policy};
    use crate::values::{KeywordSource, SandboxToken, UnrecognizedValueItem, ValueItem};

    fn check(directive: Directive) -> Vec<Violation> {
        let p = Policy::new([directive]).unwrap();
        DirectiveIllegalValue.check_policy(&p, &make_test_rule_config())
    }

    #[test]
    fn keyword_in_frame_ancestors() {
        let v = check(
            Directive::new(
                DirectiveKind::FrameAncestors,
                [KeywordSource::UnsafeInline.into()],
            )
            .unwrap(),
        );
        assert_eq!(
            v[0].message,
            "keyword-source 'unsafe-inline' is not allowed in directive 'frame-ancestors'"
        );
    }

    #[test]
    fn sandbox_token_in_source_list() {
        let v = check(
            Directive::new(DirectiveKind::ImgSrc, [SandboxToken::AllowForms.into()]).unwrap(),
        );
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn legal_and_unrecognized_values_pass() {
        let v = check(
            Directive::new(
                DirectiveKind::ScriptSrc,
                [
                    KeywordSource::SelfOrigin.into(),
                    ValueItem::from(UnrecognizedValueItem::new("'bogus'").unwrap()),
                ],
            )
            .unwrap(),
        );
        assert!(v.is_empty());
    }

    #[test]
    fn parsed_policies_are_clean() {
        let v = DirectiveIllegalValue.check_policy(
            &policy("frame-ancestors 'unsafe-inline'; sandbox 'self'"),
            &make_test_rule_config(),
        );
        assert!(v.is_empty());
    }
}
