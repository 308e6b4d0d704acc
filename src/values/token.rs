// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Value items of the non source-list directives, plus the passthrough item.

use std::fmt;
use std::str::FromStr;

use crate::error::{CspError, Result};
use crate::patterns;
use crate::values::ValueKind;

fn malformed(kind: ValueKind, value: &str) -> CspError {
    CspError::MalformedValue {
        kind,
        value: value.to_string(),
    }
}

/// Sandbox flags. Unlike other CSP keywords these are not quoted, and they
/// match case-insensitively.
///
/// <https://html.spec.whatwg.org/multipage/iframe-embed-object.html#attr-iframe-sandbox>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SandboxToken {
    AllowDownloads,
    AllowForms,
    AllowModals,
    AllowOrientationLock,
    AllowPointerLock,
    AllowPopups,
    AllowPopupsToEscapeSandbox,
    AllowPresentation,
    AllowSameOrigin,
    AllowScripts,
    AllowTopNavigation,
    AllowTopNavigationByUserActivation,
    AllowTopNavigationToCustomProtocols,
}

impl SandboxToken {
    pub const ALL: &'static [SandboxToken] = &[
        Self::AllowDownloads,
        Self::AllowForms,
        Self::AllowModals,
        Self::AllowOrientationLock,
        Self::AllowPointerLock,
        Self::AllowPopups,
        Self::AllowPopupsToEscapeSandbox,
        Self::AllowPresentation,
        Self::AllowSameOrigin,
        Self::AllowScripts,
        Self::AllowTopNavigation,
        Self::AllowTopNavigationByUserActivation,
        Self::AllowTopNavigationToCustomProtocols,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllowDownloads => "allow-downloads",
            Self::AllowForms => "allow-forms",
            Self::AllowModals => "allow-modals",
            Self::AllowOrientationLock => "allow-orientation-lock",
            Self::AllowPointerLock => "allow-pointer-lock",
            Self::AllowPopups => "allow-popups",
            Self::AllowPopupsToEscapeSandbox => "allow-popups-to-escape-sandbox",
            Self::AllowPresentation => "allow-presentation",
            Self::AllowSameOrigin => "allow-same-origin",
            Self::AllowScripts => "allow-scripts",
            Self::AllowTopNavigation => "allow-top-navigation",
            Self::AllowTopNavigationByUserActivation => "allow-top-navigation-by-user-activation",
            Self::AllowTopNavigationToCustomProtocols => {
                "allow-top-navigation-to-custom-protocols"
            }
        }
    }

    pub fn new(token: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| malformed(ValueKind::Sandbox, token))
    }
}

impl FromStr for SandboxToken {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for SandboxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// <https://w3c.github.io/webappsec-csp/#directive-webrtc>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebrtcToken {
    Allow,
    Block,
}

impl WebrtcToken {
    pub const ALL: &'static [WebrtcToken] = &[Self::Allow, Self::Block];

    /// Wire form, including the single quotes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "'allow'",
            Self::Block => "'block'",
        }
    }

    /// Accepts `allow`/`block` with or without quotes.
    pub fn new(value: &str) -> Result<Self> {
        let bare = value
            .strip_prefix('\'')
            .and_then(|v| v.strip_suffix('\''))
            .unwrap_or(value);
        match bare {
            "allow" => Ok(Self::Allow),
            "block" => Ok(Self::Block),
            _ => Err(malformed(ValueKind::Webrtc, value)),
        }
    }
}

impl FromStr for WebrtcToken {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        if !patterns::WEBRTC_VALUE.is_match(s) {
            return Err(malformed(ValueKind::Webrtc, s));
        }
        Self::new(s)
    }
}

impl fmt::Display for WebrtcToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting endpoint name used by `report-to`.
///
/// <https://w3c.github.io/webappsec-csp/#directive-report-to>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportToToken(String);

impl ReportToToken {
    pub fn new(token: &str) -> Result<Self> {
        if !patterns::TOKEN.is_match(token) {
            return Err(malformed(ValueKind::ReportTo, token));
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ReportToToken {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ReportToToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RFC 3986 URI-reference, as used by `report-uri`.
///
/// <https://w3c.github.io/webappsec-csp/#directive-report-uri>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriReference(String);

impl UriReference {
    pub fn new(uri: &str) -> Result<Self> {
        if uri.is_empty() || !patterns::URI_REFERENCE.is_match(uri) {
            return Err(malformed(ValueKind::Uri, uri));
        }
        Ok(Self(uri.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UriReference {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for UriReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque token kept verbatim when no known grammar matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnrecognizedValueItem(String);

impl UnrecognizedValueItem {
    /// Accepts any non-empty text without whitespace, `;` or `,`.
    pub fn new(value: &str) -> Result<Self> {
        if !patterns::NOT_SEPARATOR.is_match(value) {
            return Err(malformed(ValueKind::Unrecognized, value));
        }
        Ok(Self(value.to_string()))
    }

    /// Parser fallback; the caller already split `value` out of a larger text.
    pub(crate) fn verbatim(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UnrecognizedValueItem {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for UnrecognizedValueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
