// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Value items: the whitespace-separated tokens of a directive value.
//!
//! In `script-src 'self' https://example.com` the directive value is
//! `'self' https://example.com`, and `'self'` and `https://example.com` are
//! its items.

mod source;
mod token;

use std::fmt;

pub use source::{HashAlgorithm, HashSource, HostSource, KeywordSource, NonceSource, SchemeSource};
pub use token::{ReportToToken, SandboxToken, UnrecognizedValueItem, UriReference, WebrtcToken};

use crate::error::{CspError, Result};
use crate::patterns::{self, Pattern};

/// One token of a directive value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueItem {
    Nonce(NonceSource),
    Hash(HashSource),
    Scheme(SchemeSource),
    Host(HostSource),
    Keyword(KeywordSource),
    /// `'none'`. Not a source expression; it stands for an empty source list.
    NoneSource,
    /// `'self'` as an ancestor source.
    SelfSource,
    Sandbox(SandboxToken),
    Webrtc(WebrtcToken),
    ReportTo(ReportToToken),
    Uri(UriReference),
    Unrecognized(UnrecognizedValueItem),
}

impl ValueItem {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Nonce(_) => ValueKind::Nonce,
            Self::Hash(_) => ValueKind::Hash,
            Self::Scheme(_) => ValueKind::Scheme,
            Self::Host(_) => ValueKind::Host,
            Self::Keyword(_) => ValueKind::Keyword,
            Self::NoneSource => ValueKind::NoneSource,
            Self::SelfSource => ValueKind::SelfSource,
            Self::Sandbox(_) => ValueKind::Sandbox,
            Self::Webrtc(_) => ValueKind::Webrtc,
            Self::ReportTo(_) => ValueKind::ReportTo,
            Self::Uri(_) => ValueKind::Uri,
            Self::Unrecognized(_) => ValueKind::Unrecognized,
        }
    }

    pub fn is_none_source(&self) -> bool {
        matches!(self, Self::NoneSource)
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for ValueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonce(v) => fmt::Display::fmt(v, f),
            Self::Hash(v) => fmt::Display::fmt(v, f),
            Self::Scheme(v) => fmt::Display::fmt(v, f),
            Self::Host(v) => fmt::Display::fmt(v, f),
            Self::Keyword(v) => fmt::Display::fmt(v, f),
            Self::NoneSource => f.write_str("'none'"),
            Self::SelfSource => f.write_str("'self'"),
            Self::Sandbox(v) => fmt::Display::fmt(v, f),
            Self::Webrtc(v) => fmt::Display::fmt(v, f),
            Self::ReportTo(v) => fmt::Display::fmt(v, f),
            Self::Uri(v) => fmt::Display::fmt(v, f),
            Self::Unrecognized(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! impl_from_item {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ValueItem {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_item! {
    NonceSource => Nonce,
    HashSource => Hash,
    SchemeSource => Scheme,
    HostSource => Host,
    KeywordSource => Keyword,
    SandboxToken => Sandbox,
    WebrtcToken => Webrtc,
    ReportToToken => ReportTo,
    UriReference => Uri,
    UnrecognizedValueItem => Unrecognized,
}

/// The grammar a value item belongs to.
///
/// Each kind pairs a full-match predicate with a constructor; directive
/// shapes list the kinds they accept in the order the parser tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Nonce,
    Hash,
    Scheme,
    Host,
    Keyword,
    NoneSource,
    SelfSource,
    Sandbox,
    Webrtc,
    ReportTo,
    Uri,
    Unrecognized,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nonce => "nonce-source",
            Self::Hash => "hash-source",
            Self::Scheme => "scheme-source",
            Self::Host => "host-source",
            Self::Keyword => "keyword-source",
            Self::NoneSource => "none-source",
            Self::SelfSource => "self-source",
            Self::Sandbox => "sandbox-token",
            Self::Webrtc => "webrtc-token",
            Self::ReportTo => "report-to-token",
            Self::Uri => "uri-reference",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn pattern(self) -> &'static Pattern {
        match self {
            Self::Nonce => &*patterns::NONCE_SOURCE,
            Self::Hash => &*patterns::HASH_SOURCE,
            Self::Scheme => &*patterns::SCHEME_SOURCE,
            Self::Host => &*patterns::HOST_SOURCE,
            Self::Keyword => &*patterns::KEYWORD_SOURCE,
            Self::NoneSource => &*patterns::NONE_SOURCE,
            Self::SelfSource => &*patterns::SELF_SOURCE,
            Self::Sandbox => &*patterns::SANDBOX_VALUE,
            Self::Webrtc => &*patterns::WEBRTC_VALUE,
            Self::ReportTo => &*patterns::TOKEN,
            Self::Uri => &*patterns::URI_REFERENCE,
            Self::Unrecognized => &*patterns::NOT_SEPARATOR,
        }
    }

    /// Returns `true` if `token` is, in its entirety, wire text of this kind.
    pub fn matches(self, token: &str) -> bool {
        self.pattern().is_match(token)
    }

    /// Build an item of this kind from its wire text.
    pub fn parse(self, token: &str) -> Result<ValueItem> {
        let item = match self {
            Self::Nonce => ValueItem::Nonce(token.parse()?),
            Self::Hash => ValueItem::Hash(token.parse()?),
            Self::Scheme => ValueItem::Scheme(token.parse()?),
            Self::Host => ValueItem::Host(token.parse()?),
            Self::Keyword => ValueItem::Keyword(token.parse()?),
            Self::NoneSource | Self::SelfSource => {
                if !self.matches(token) {
                    return Err(CspError::MalformedValue {
                        kind: self,
                        value: token.to_string(),
                    });
                }
                if self == Self::NoneSource {
                    ValueItem::NoneSource
                } else {
                    ValueItem::SelfSource
                }
            }
            Self::Sandbox => ValueItem::Sandbox(token.parse()?),
            Self::Webrtc => ValueItem::Webrtc(token.parse()?),
            Self::ReportTo => ValueItem::ReportTo(token.parse()?),
            Self::Uri => ValueItem::Uri(token.parse()?),
            Self::Unrecognized => ValueItem::Unrecognized(token.parse()?),
        };
        Ok(item)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw token by trying `kinds` in order.
///
/// The first kind whose pattern matches and whose constructor accepts the
/// token wins. Anything else becomes an [`UnrecognizedValueItem`], so this
/// never fails.
pub fn classify(token: &str, kinds: &[ValueKind]) -> ValueItem {
    for kind in kinds {
        if !kind.matches(token) {
            continue;
        }
        match kind.parse(token) {
            Ok(item) => return item,
            Err(e) => {
                tracing::debug!(%token, %kind, error = %e, "pattern matched but value was rejected");
            }
        }
    }
    ValueItem::Unrecognized(UnrecognizedValueItem::verbatim(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SOURCE_LIST: &[ValueKind] = &[
        ValueKind::NoneSource,
        ValueKind::Keyword,
        ValueKind::Hash,
        ValueKind::Nonce,
        ValueKind::Host,
        ValueKind::Scheme,
    ];

    #[rstest]
    #[case("'none'", ValueKind::NoneSource)]
    #[case("'NONE'", ValueKind::NoneSource)]
    #[case("'self'", ValueKind::Keyword)]
    #[case("'SELF'", ValueKind::Unrecognized)]
    #[case("'sha256-Zm9v'", ValueKind::Hash)]
    #[case("'nonce-Zm9v'", ValueKind::Nonce)]
    #[case("example.com", ValueKind::Host)]
    #[case("*", ValueKind::Host)]
    #[case("https:", ValueKind::Scheme)]
    #[case("'unknown'", ValueKind::Unrecognized)]
    #[case("a,b", ValueKind::Unrecognized)]
    fn classify_source_list_tokens(#[case] token: &str, #[case] expected: ValueKind) {
        assert_eq!(classify(token, SOURCE_LIST).kind(), expected);
    }

    #[test]
    fn classify_keeps_unrecognized_text_verbatim() {
        let item = classify("a,b", SOURCE_LIST);
        assert_eq!(item.to_string(), "a,b");
    }

    #[test]
    fn classify_uses_only_the_given_kinds() {
        let ancestors = &[
            ValueKind::NoneSource,
            ValueKind::SelfSource,
            ValueKind::Host,
            ValueKind::Scheme,
        ];
        assert_eq!(classify("'self'", ancestors), ValueItem::SelfSource);
        assert!(classify("'unsafe-inline'", ancestors).is_unrecognized());
    }

    #[test]
    fn singletons_render_quoted() {
        assert_eq!(ValueItem::NoneSource.to_string(), "'none'");
        assert_eq!(ValueItem::SelfSource.to_string(), "'self'");
        assert_eq!(
            ValueItem::from(KeywordSource::SelfOrigin).to_string(),
            "'self'"
        );
    }

    #[test]
    fn constants_are_equal_by_value() {
        let a = ValueItem::from(SandboxToken::AllowScripts);
        let b = ValueItem::Sandbox(SandboxToken::new("allow-scripts").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_text_of_another_kind() {
        assert!(ValueKind::NoneSource.parse("'self'").is_err());
        assert!(ValueKind::Nonce.parse("'sha256-Zm9v'").is_err());
    }
}
