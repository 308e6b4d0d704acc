// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Directives: a name followed by zero or more value items.
//!
//! A [`Directive`] remembers the literal separator in front of each value
//! item (the first one separates the name from the value) and, for items
//! matched case-insensitively, the original spelling. Rendering a parsed
//! directive therefore reproduces its input exactly.

use std::fmt;
use std::str::FromStr;

use crate::error::{CspError, Result};
use crate::patterns;
use crate::registry;
use crate::values::{ValueItem, ValueKind};

/// Inserted before values added programmatically.
pub const DEFAULT_VALUE_SEPARATOR: &str = " ";

/// Every directive known to the registry.
///
/// <https://w3c.github.io/webappsec-csp/#csp-directives>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    ChildSrc,
    ConnectSrc,
    DefaultSrc,
    FontSrc,
    FrameSrc,
    ImgSrc,
    ManifestSrc,
    MediaSrc,
    ObjectSrc,
    ScriptSrc,
    ScriptSrcElem,
    ScriptSrcAttr,
    StyleSrc,
    StyleSrcElem,
    StyleSrcAttr,
    WorkerSrc,
    Webrtc,
    BaseUri,
    Sandbox,
    FormAction,
    FrameAncestors,
    ReportUri,
    ReportTo,
    UpgradeInsecureRequests,
}

impl DirectiveKind {
    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ChildSrc => "child-src",
            Self::ConnectSrc => "connect-src",
            Self::DefaultSrc => "default-src",
            Self::FontSrc => "font-src",
            Self::FrameSrc => "frame-src",
            Self::ImgSrc => "img-src",
            Self::ManifestSrc => "manifest-src",
            Self::MediaSrc => "media-src",
            Self::ObjectSrc => "object-src",
            Self::ScriptSrc => "script-src",
            Self::ScriptSrcElem => "script-src-elem",
            Self::ScriptSrcAttr => "script-src-attr",
            Self::StyleSrc => "style-src",
            Self::StyleSrcElem => "style-src-elem",
            Self::StyleSrcAttr => "style-src-attr",
            Self::WorkerSrc => "worker-src",
            Self::Webrtc => "webrtc",
            Self::BaseUri => "base-uri",
            Self::Sandbox => "sandbox",
            Self::FormAction => "form-action",
            Self::FrameAncestors => "frame-ancestors",
            Self::ReportUri => "report-uri",
            Self::ReportTo => "report-to",
            Self::UpgradeInsecureRequests => "upgrade-insecure-requests",
        }
    }

    pub fn shape(self) -> DirectiveShape {
        match self {
            Self::Webrtc => DirectiveShape::Webrtc,
            Self::Sandbox => DirectiveShape::SandboxTokens,
            Self::FrameAncestors => DirectiveShape::AncestorSourceList,
            Self::ReportUri => DirectiveShape::ReportUri,
            Self::ReportTo => DirectiveShape::ReportTo,
            Self::UpgradeInsecureRequests => DirectiveShape::NoValue,
            _ => DirectiveShape::SourceList,
        }
    }

    pub fn category(self) -> DirectiveCategory {
        match self {
            Self::Webrtc | Self::WorkerSrc => DirectiveCategory::Other,
            Self::BaseUri | Self::Sandbox => DirectiveCategory::Document,
            Self::FormAction | Self::FrameAncestors => DirectiveCategory::Navigation,
            Self::ReportUri | Self::ReportTo => DirectiveCategory::Reporting,
            Self::UpgradeInsecureRequests => DirectiveCategory::Extension,
            _ => DirectiveCategory::Fetch,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DirectiveKind {
    type Err = CspError;

    /// Resolve a name through the registry (either name form, any case).
    fn from_str(s: &str) -> Result<Self> {
        registry::lookup(s)
    }
}

/// Grouping used by the CSP specification's table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveCategory {
    Fetch,
    Document,
    Navigation,
    Reporting,
    Other,
    /// Defined outside CSP3 (e.g. `upgrade-insecure-requests`).
    Extension,
}

/// The value grammar of a directive.
///
/// Shapes are the "supertypes" of directive kinds: every `*-src` directive
/// except `frame-ancestors` shares [`DirectiveShape::SourceList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveShape {
    SourceList,
    AncestorSourceList,
    SandboxTokens,
    Webrtc,
    ReportUri,
    ReportTo,
    NoValue,
    Unrecognized,
}

impl DirectiveShape {
    /// Legal value kinds, in the order the parser tries them.
    ///
    /// The order matters: `'none'` must be tried before keywords, and hashes
    /// before nonces.
    pub fn value_kinds(self) -> &'static [ValueKind] {
        match self {
            Self::SourceList => &[
                ValueKind::NoneSource,
                ValueKind::Keyword,
                ValueKind::Hash,
                ValueKind::Nonce,
                ValueKind::Host,
                ValueKind::Scheme,
            ],
            Self::AncestorSourceList => &[
                ValueKind::NoneSource,
                ValueKind::SelfSource,
                ValueKind::Host,
                ValueKind::Scheme,
            ],
            Self::SandboxTokens => &[ValueKind::Sandbox],
            Self::Webrtc => &[ValueKind::Webrtc],
            Self::ReportUri => &[ValueKind::Uri],
            Self::ReportTo => &[ValueKind::ReportTo],
            Self::NoValue => &[],
            Self::Unrecognized => &[ValueKind::Unrecognized],
        }
    }

    pub fn accepts(self, kind: ValueKind) -> bool {
        self.value_kinds().contains(&kind)
    }

    /// `'none'` may not be combined with anything else.
    pub fn is_none_exclusive(self) -> bool {
        matches!(self, Self::SourceList | Self::AncestorSourceList)
    }

    /// Number of values the grammar requires, for single-value directives.
    pub fn required_arity(self) -> Option<usize> {
        match self {
            Self::Webrtc | Self::ReportTo => Some(1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    separator: String,
    item: ValueItem,
    /// Wire spelling, kept only when it differs from the item's rendering.
    spelling: Option<String>,
}

impl Entry {
    fn new(separator: impl Into<String>, item: ValueItem) -> Self {
        Self {
            separator: separator.into(),
            item,
            spelling: None,
        }
    }

    fn write_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.spelling {
            Some(s) => f.write_str(s),
            None => write!(f, "{}", self.item),
        }
    }
}

/// One directive of a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    kind: Option<DirectiveKind>,
    name: String,
    entries: Vec<Entry>,
}

impl Directive {
    /// Build a directive with its canonical name and single-space separators.
    pub fn new(kind: DirectiveKind, values: impl IntoIterator<Item = ValueItem>) -> Result<Self> {
        let entries = values
            .into_iter()
            .map(|item| Entry::new(DEFAULT_VALUE_SEPARATOR, item))
            .collect();
        Self::from_entries(Some(kind), kind.name().to_string(), entries)
    }

    /// Like [`Directive::new`], but also runs [`Directive::validate`].
    pub fn strict(kind: DirectiveKind, values: impl IntoIterator<Item = ValueItem>) -> Result<Self> {
        let directive = Self::new(kind, values)?;
        directive.validate()?;
        Ok(directive)
    }

    /// Build a directive with an explicit name spelling and separators.
    ///
    /// `separators[0]` goes between the name and the first value.
    pub fn with_separators(
        kind: DirectiveKind,
        name: &str,
        values: Vec<ValueItem>,
        separators: Vec<String>,
    ) -> Result<Self> {
        if !name.eq_ignore_ascii_case(kind.name()) {
            return Err(CspError::MalformedName(name.to_string()));
        }
        if separators.len() != values.len() {
            return Err(CspError::SeparatorCount {
                expected: values.len(),
                found: separators.len(),
            });
        }
        let sep = &patterns::VALUE_ITEM_SEPARATOR;
        if let Some(bad) = separators.iter().find(|s| !sep.is_match(s)) {
            return Err(CspError::MalformedSeparator(bad.clone(), sep.name()));
        }
        let entries = separators
            .into_iter()
            .zip(values)
            .map(|(separator, item)| Entry::new(separator, item))
            .collect();
        Self::from_entries(Some(kind), name.to_string(), entries)
    }

    /// A directive whose name is not in the registry. Its values are kept
    /// as given; use [`crate::UnrecognizedValueItem`] for opaque tokens.
    ///
    /// Names the parser would resolve to a kind are rejected with
    /// [`CspError::RegisteredName`].
    pub fn unrecognized(name: &str, values: impl IntoIterator<Item = ValueItem>) -> Result<Self> {
        if !patterns::NOT_SEPARATOR.is_match(name) {
            return Err(CspError::MalformedName(name.to_string()));
        }
        if registry::is_registered(name) {
            return Err(CspError::RegisteredName(name.to_string()));
        }
        let entries = values
            .into_iter()
            .map(|item| Entry::new(DEFAULT_VALUE_SEPARATOR, item))
            .collect();
        Self::from_entries(None, name.to_string(), entries)
    }

    /// Parser entry point: `tokens` are `(separator, item, wire text)`.
    pub(crate) fn from_parsed<'t>(
        kind: Option<DirectiveKind>,
        name: &str,
        tokens: impl IntoIterator<Item = (&'t str, ValueItem, &'t str)>,
    ) -> Result<Self> {
        let entries = tokens
            .into_iter()
            .map(|(separator, item, wire)| {
                let mut entry = Entry::new(separator, item);
                if entry.item.to_string() != wire {
                    entry.spelling = Some(wire.to_string());
                }
                entry
            })
            .collect();
        Self::from_entries(kind, name.to_string(), entries)
    }

    fn from_entries(kind: Option<DirectiveKind>, name: String, entries: Vec<Entry>) -> Result<Self> {
        let shape = kind.map_or(DirectiveShape::Unrecognized, DirectiveKind::shape);
        if shape.is_none_exclusive()
            && entries.len() > 1
            && entries.iter().any(|e| e.item.is_none_source())
        {
            return Err(CspError::NoneNotExclusive { directive: name });
        }
        Ok(Self {
            kind,
            name,
            entries,
        })
    }

    /// `None` for directives that are not in the registry.
    pub fn kind(&self) -> Option<DirectiveKind> {
        self.kind
    }

    pub fn shape(&self) -> DirectiveShape {
        self.kind
            .map_or(DirectiveShape::Unrecognized, DirectiveKind::shape)
    }

    pub fn is_recognized(&self) -> bool {
        self.kind.is_some()
    }

    /// The name as written, which may differ in case from the canonical one.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &ValueItem> + '_ {
        self.entries.iter().map(|e| &e.item)
    }

    /// Separators in front of each value; the first follows the name.
    pub fn separators(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.separator.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value portion: every item joined by its recorded separator.
    pub fn value(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push_str(&entry.separator);
            }
            match &entry.spelling {
                Some(s) => out.push_str(s),
                None => out.push_str(&entry.item.to_string()),
            }
        }
        out
    }

    /// Return a new directive with `item` appended after a single space.
    pub fn append(&self, item: ValueItem) -> Result<Self> {
        let mut entries = self.entries.clone();
        entries.push(Entry::new(DEFAULT_VALUE_SEPARATOR, item));
        Self::from_entries(self.kind, self.name.clone(), entries)
    }

    /// Strict validity check: value arity of single-value directives and the
    /// legality of every item for this directive's shape.
    ///
    /// Construction and parsing are lenient about both; this is the place
    /// where they are enforced.
    pub fn validate(&self) -> Result<()> {
        let shape = self.shape();
        if let Some(expected) = shape.required_arity() {
            if self.len() != expected {
                return Err(CspError::Arity {
                    directive: self.name.clone(),
                    expected,
                    found: self.len(),
                });
            }
        }
        if let Some(bad) = self.values().find(|v| !shape.accepts(v.kind())) {
            return Err(CspError::IllegalValue {
                directive: self.name.clone(),
                value: bad.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for entry in &self.entries {
            f.write_str(&entry.separator)?;
            entry.write_item(f)?;
        }
        Ok(())
    }
}

impl FromStr for Directive {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse::parse_directive(s)
    }
}
