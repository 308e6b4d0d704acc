// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Policies: an ordered, non-empty list of directives.

use std::fmt;
use std::str::FromStr;

use crate::directive::{Directive, DirectiveKind, DirectiveShape};
use crate::error::{CspError, Result};
use crate::patterns;
use crate::registry;

/// Inserted between directives added programmatically.
pub const DEFAULT_DIRECTIVE_SEPARATOR: &str = "; ";

/// Picks directives out of a [`Policy`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Position in the policy, starting at zero.
    Index(usize),
    Kind(DirectiveKind),
    /// Every directive whose kind has this shape.
    Shape(DirectiveShape),
    /// A registered name in either form, or the name of an unrecognized
    /// directive. Case-insensitive.
    Name(String),
}

impl Selector {
    fn matches(&self, position: usize, directive: &Directive) -> bool {
        match self {
            Self::Index(i) => *i == position,
            Self::Kind(kind) => directive.kind() == Some(*kind),
            Self::Shape(shape) => directive.shape() == *shape,
            Self::Name(name) => match registry::lookup(name) {
                Ok(kind) => directive.kind() == Some(kind),
                Err(_) => !directive.is_recognized() && directive.name().eq_ignore_ascii_case(name),
            },
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "index {i}"),
            Self::Kind(kind) => write!(f, "kind '{kind}'"),
            Self::Shape(shape) => write!(f, "shape {shape:?}"),
            Self::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

impl From<usize> for Selector {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl From<DirectiveKind> for Selector {
    fn from(kind: DirectiveKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<DirectiveShape> for Selector {
    fn from(shape: DirectiveShape) -> Self {
        Self::Shape(shape)
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// A serialized policy is the value of one `Content-Security-Policy` header
/// field (or one comma-separated member of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    directives: Vec<Directive>,
    /// `separators[i]` sits between `directives[i]` and `directives[i + 1]`.
    separators: Vec<String>,
}

impl Policy {
    pub fn new(directives: impl IntoIterator<Item = Directive>) -> Result<Self> {
        let directives: Vec<Directive> = directives.into_iter().collect();
        if directives.is_empty() {
            return Err(CspError::EmptyPolicy);
        }
        let separators = vec![DEFAULT_DIRECTIVE_SEPARATOR.to_string(); directives.len() - 1];
        Ok(Self {
            directives,
            separators,
        })
    }

    /// Build a policy with explicit separators, one fewer than directives.
    pub fn with_separators(directives: Vec<Directive>, separators: Vec<String>) -> Result<Self> {
        if directives.is_empty() {
            return Err(CspError::EmptyPolicy);
        }
        if separators.len() + 1 != directives.len() {
            return Err(CspError::SeparatorCount {
                expected: directives.len() - 1,
                found: separators.len(),
            });
        }
        let sep = &patterns::DIRECTIVE_SEPARATOR;
        if let Some(bad) = separators.iter().find(|s| !sep.is_match(s)) {
            return Err(CspError::MalformedSeparator(bad.clone(), sep.name()));
        }
        Ok(Self {
            directives,
            separators,
        })
    }

    /// Parser entry point; the split already guarantees the counts.
    pub(crate) fn from_parts(directives: Vec<Directive>, separators: Vec<String>) -> Self {
        debug_assert_eq!(separators.len() + 1, directives.len());
        Self {
            directives,
            separators,
        }
    }

    /// First directive matching `selector`.
    pub fn get(&self, selector: impl Into<Selector>) -> Result<&Directive> {
        let selector = selector.into();
        self.iter()
            .enumerate()
            .find(|(i, d)| selector.matches(*i, d))
            .map(|(_, d)| d)
            .ok_or_else(|| CspError::Lookup(selector.to_string()))
    }

    pub fn contains(&self, selector: impl Into<Selector>) -> bool {
        self.get(selector).is_ok()
    }

    /// Return a new policy with `directive` appended after `"; "`.
    pub fn add(&self, directive: Directive) -> Self {
        let mut next = self.clone();
        next.separators.push(DEFAULT_DIRECTIVE_SEPARATOR.to_string());
        next.directives.push(directive);
        next
    }

    /// Return a new policy without the directives matching `selector`.
    ///
    /// Surviving directives keep the separators of their new positions, so
    /// the separator after position `i` stays the separator after position
    /// `i`. An out-of-range index is a lookup error; other selectors that
    /// match nothing return an unchanged copy.
    pub fn remove(&self, selector: impl Into<Selector>) -> Result<Self> {
        let selector = selector.into();
        if let Selector::Index(i) = selector {
            if i >= self.len() {
                return Err(CspError::Lookup(selector.to_string()));
            }
        }
        let directives: Vec<Directive> = self
            .iter()
            .enumerate()
            .filter(|(i, d)| !selector.matches(*i, d))
            .map(|(_, d)| d.clone())
            .collect();
        if directives.is_empty() {
            return Err(CspError::EmptyPolicy);
        }
        let separators = self.separators[..directives.len() - 1].to_vec();
        Ok(Self {
            directives,
            separators,
        })
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn separators(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.separators.iter().map(String::as_str)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Always `false` for a constructed policy.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl<'a> IntoIterator for &'a Policy {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(&self.separators[i - 1])?;
            }
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

impl FromStr for Policy {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse::parse_policy(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{KeywordSource, SandboxToken, ValueItem};
    use rstest::rstest;

    fn sample() -> Policy {
        Policy::new([
            Directive::new(DirectiveKind::DefaultSrc, [KeywordSource::SelfOrigin.into()]).unwrap(),
            Directive::new(DirectiveKind::ObjectSrc, [ValueItem::NoneSource]).unwrap(),
            Directive::new(DirectiveKind::Sandbox, [SandboxToken::AllowScripts.into()]).unwrap(),
            Directive::unrecognized("x-custom", []).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn renders_with_default_separators() {
        assert_eq!(
            sample().to_string(),
            "default-src 'self'; object-src 'none'; sandbox allow-scripts; x-custom"
        );
    }

    #[test]
    fn empty_policy_is_rejected() {
        assert_eq!(Policy::new([]).unwrap_err(), CspError::EmptyPolicy);
        assert_eq!(
            Policy::with_separators(vec![], vec![]).unwrap_err(),
            CspError::EmptyPolicy
        );
    }

    #[rstest]
    #[case(Selector::Index(1), "object-src")]
    #[case(Selector::Kind(DirectiveKind::Sandbox), "sandbox")]
    #[case(Selector::Shape(DirectiveShape::SourceList), "default-src")]
    #[case(Selector::Shape(DirectiveShape::Unrecognized), "x-custom")]
    #[case(Selector::from("OBJECT-SRC"), "object-src")]
    #[case(Selector::from("ObjectSrc"), "object-src")]
    #[case(Selector::from("X-Custom"), "x-custom")]
    fn get_by_selector(#[case] selector: Selector, #[case] expected: &str) {
        let policy = sample();
        assert_eq!(policy.get(selector).unwrap().name(), expected);
    }

    #[rstest]
    #[case(Selector::Index(4))]
    #[case(Selector::Kind(DirectiveKind::ImgSrc))]
    #[case(Selector::from("img-src"))]
    #[case(Selector::from("x-other"))]
    fn get_miss_is_lookup_error(#[case] selector: Selector) {
        assert!(matches!(sample().get(selector), Err(CspError::Lookup(_))));
    }

    #[test]
    fn registered_name_does_not_match_by_text_alone() {
        let policy = Policy::new([Directive::unrecognized("x-a", []).unwrap()]).unwrap();
        assert!(!policy.contains("script-src"));
    }

    #[test]
    fn add_appends_with_default_separator() {
        let policy = Policy::with_separators(
            vec![
                Directive::new(DirectiveKind::ImgSrc, [ValueItem::NoneSource]).unwrap(),
                Directive::new(DirectiveKind::FontSrc, [ValueItem::NoneSource]).unwrap(),
            ],
            vec![" ;".into()],
        )
        .unwrap();
        let next = policy.add(Directive::new(DirectiveKind::UpgradeInsecureRequests, []).unwrap());
        assert_eq!(
            next.to_string(),
            "img-src 'none' ;font-src 'none'; upgrade-insecure-requests"
        );
        assert_eq!(policy.len(), 2);
    }

    #[test]
    fn remove_recomputes_separators_by_position() {
        let policy = Policy::with_separators(
            sample().directives().to_vec(),
            vec![";".into(), " ; ".into(), ";  ".into()],
        )
        .unwrap();
        let next = policy.remove(1usize).unwrap();
        assert_eq!(
            next.to_string(),
            "default-src 'self';sandbox allow-scripts ; x-custom"
        );
    }

    #[test]
    fn remove_every_match() {
        let next = sample().remove(DirectiveShape::SourceList).unwrap();
        assert_eq!(next.to_string(), "sandbox allow-scripts; x-custom");
    }

    #[test]
    fn remove_without_match_returns_copy() {
        let policy = sample();
        assert_eq!(policy.remove(DirectiveKind::ImgSrc).unwrap(), policy);
    }

    #[test]
    fn remove_out_of_range_index_fails() {
        assert!(matches!(sample().remove(9usize), Err(CspError::Lookup(_))));
    }

    #[test]
    fn remove_last_directive_fails() {
        let policy = Policy::new([Directive::new(DirectiveKind::Sandbox, []).unwrap()]).unwrap();
        assert_eq!(policy.remove(0usize).unwrap_err(), CspError::EmptyPolicy);
    }

    #[rstest]
    #[case(vec![], CspError::SeparatorCount { expected: 1, found: 0 })]
    #[case(vec![","], CspError::MalformedSeparator(",".into(), "directive-separator"))]
    fn with_separators_rejects(#[case] separators: Vec<&str>, #[case] expected: CspError) {
        let directives = vec![
            Directive::new(DirectiveKind::Sandbox, []).unwrap(),
            Directive::new(DirectiveKind::Sandbox, []).unwrap(),
        ];
        let err = Policy::with_separators(
            directives,
            separators.into_iter().map(String::from).collect(),
        )
        .unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn iteration_is_restartable() {
        let policy = sample();
        let first: Vec<_> = policy.iter().map(Directive::name).collect();
        let second: Vec<_> = (&policy).into_iter().map(Directive::name).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
    }
}
