// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Source expressions: the value items of source-list directives.
//!
//! Every type accepts a human-friendly form through `new` (quotes and
//! prefixes optional) and the exact wire form through `FromStr`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CspError, Result};
use crate::patterns;
use crate::values::ValueKind;

const NONCE_PREFIX: &str = "nonce-";

fn strip_ticks(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(s)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn malformed(kind: ValueKind, value: &str) -> CspError {
    CspError::MalformedValue {
        kind,
        value: value.to_string(),
    }
}

/// `'nonce-<base64-value>'`
///
/// <https://w3c.github.io/webappsec-csp/#grammardef-nonce-source>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonceSource {
    nonce: String,
}

impl NonceSource {
    /// Accepts the bare nonce (`Zm9v`), with prefix (`nonce-Zm9v`) or quoted.
    pub fn new(nonce: &str) -> Result<Self> {
        let inner = strip_ticks(nonce);
        let inner = strip_prefix_ignore_case(inner, NONCE_PREFIX).unwrap_or(inner);
        if !patterns::BASE64_VALUE.is_match(inner) {
            return Err(malformed(ValueKind::Nonce, nonce));
        }
        Ok(Self {
            nonce: inner.to_string(),
        })
    }

    /// The base64 nonce, without quotes or prefix.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

impl FromStr for NonceSource {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        if !patterns::NONCE_SOURCE.is_match(s) {
            return Err(malformed(ValueKind::Nonce, s));
        }
        Self::new(s)
    }
}

impl fmt::Display for NonceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{NONCE_PREFIX}{}'", self.nonce)
    }
}

/// <https://w3c.github.io/webappsec-csp/#grammardef-hash-algorithm>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: &'static [HashAlgorithm] = &[Self::Sha256, Self::Sha384, Self::Sha512];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| malformed(ValueKind::Hash, s))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `'<hash-algorithm>-<base64-value>'`
///
/// <https://w3c.github.io/webappsec-csp/#grammardef-hash-source>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashSource {
    algorithm: HashAlgorithm,
    digest: String,
}

impl HashSource {
    /// Accepts `sha256-<digest>`, optionally quoted.
    pub fn new(value: &str) -> Result<Self> {
        let inner = strip_ticks(value);
        let (algo, digest) = inner
            .split_once('-')
            .ok_or_else(|| malformed(ValueKind::Hash, value))?;
        let algorithm = algo
            .parse::<HashAlgorithm>()
            .map_err(|_| malformed(ValueKind::Hash, value))?;
        Self::with_algorithm(algorithm, digest)
    }

    pub fn with_algorithm(algorithm: HashAlgorithm, digest: &str) -> Result<Self> {
        if !patterns::BASE64_VALUE.is_match(digest) {
            return Err(malformed(ValueKind::Hash, digest));
        }
        Ok(Self {
            algorithm,
            digest: digest.to_string(),
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl FromStr for HashSource {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        if !patterns::HASH_SOURCE.is_match(s) {
            return Err(malformed(ValueKind::Hash, s));
        }
        Self::new(s)
    }
}

impl fmt::Display for HashSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}-{}'", self.algorithm, self.digest)
    }
}

/// `<scheme>:`
///
/// <https://w3c.github.io/webappsec-csp/#grammardef-scheme-source>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemeSource {
    scheme: String,
}

impl SchemeSource {
    /// Accepts the scheme with or without its trailing colon.
    pub fn new(scheme: &str) -> Result<Self> {
        let bare = scheme.strip_suffix(':').unwrap_or(scheme);
        if !patterns::SCHEME.is_match(bare) {
            return Err(malformed(ValueKind::Scheme, scheme));
        }
        Ok(Self {
            scheme: bare.to_string(),
        })
    }

    /// The scheme, without the colon.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl FromStr for SchemeSource {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        if !patterns::SCHEME_SOURCE.is_match(s) {
            return Err(malformed(ValueKind::Scheme, s));
        }
        Self::new(s)
    }
}

impl fmt::Display for SchemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)
    }
}

/// <https://w3c.github.io/webappsec-csp/#grammardef-host-source>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostSource {
    host: String,
}

impl HostSource {
    pub fn new(host: &str) -> Result<Self> {
        if !patterns::HOST_SOURCE.is_match(host) {
            return Err(malformed(ValueKind::Host, host));
        }
        Ok(Self {
            host: host.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl FromStr for HostSource {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

/// Quoted keyword sources.
///
/// `'self'` appears here as [`KeywordSource::SelfOrigin`]; `frame-ancestors`
/// uses [`crate::ValueItem::SelfSource`] instead, as no other keyword is legal
/// there.
///
/// <https://w3c.github.io/webappsec-csp/#grammardef-keyword-source>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordSource {
    SelfOrigin,
    UnsafeInline,
    UnsafeEval,
    StrictDynamic,
    UnsafeHashes,
    ReportSample,
    UnsafeAllowRedirects,
    WasmUnsafeEval,
}

impl KeywordSource {
    pub const ALL: &'static [KeywordSource] = &[
        Self::SelfOrigin,
        Self::UnsafeInline,
        Self::UnsafeEval,
        Self::StrictDynamic,
        Self::UnsafeHashes,
        Self::ReportSample,
        Self::UnsafeAllowRedirects,
        Self::WasmUnsafeEval,
    ];

    /// Wire form, including the single quotes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfOrigin => "'self'",
            Self::UnsafeInline => "'unsafe-inline'",
            Self::UnsafeEval => "'unsafe-eval'",
            Self::StrictDynamic => "'strict-dynamic'",
            Self::UnsafeHashes => "'unsafe-hashes'",
            Self::ReportSample => "'report-sample'",
            Self::UnsafeAllowRedirects => "'unsafe-allow-redirects'",
            Self::WasmUnsafeEval => "'wasm-unsafe-eval'",
        }
    }

    /// Accepts the keyword with or without quotes, e.g. `unsafe-inline`.
    pub fn new(keyword: &str) -> Result<Self> {
        let bare = strip_ticks(keyword);
        Self::ALL
            .iter()
            .copied()
            .find(|k| strip_ticks(k.as_str()) == bare)
            .ok_or_else(|| malformed(ValueKind::Keyword, keyword))
    }
}

impl FromStr for KeywordSource {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| malformed(ValueKind::Keyword, s))
    }
}

impl fmt::Display for KeywordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
