// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Precompiled matchers for every lexical production of the CSP grammar.
//!
//! Grammar references:
//! - <https://w3c.github.io/webappsec-csp/#framework-directives>
//! - <https://datatracker.ietf.org/doc/html/rfc3986#appendix-A>
//! - <https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.2>
//!
//! Matchers only expose full-string matching. The separator matchers can
//! additionally split a string while keeping the literal separators, which is
//! what the parser needs to reproduce its input byte for byte.
//!
//! All matchers are backed by `regex`, which runs in time linear in the input
//! and is therefore safe on header text coming from untrusted responses.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use crate::values::{KeywordSource, SandboxToken, WebrtcToken};

// https://tools.ietf.org/html/rfc5234#appendix-B.1
const ALPHA: &str = "[A-Za-z]";
const WSP: &str = r"[\t\n\x0C\r ]";

// https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.2
const TOKEN_BODY: &str = r"[!#$%&'*+\-.^_`|~A-Za-z0-9]+";

// https://w3c.github.io/webappsec-csp/#grammardef-base64-value
const BASE64_BODY: &str = r"[A-Za-z0-9+/\-_]+={0,2}";

// https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
const SCHEME_BODY: &str = r"[A-Za-z][A-Za-z0-9+\-.]*";

const UNRESERVED: &str = r"[A-Za-z0-9\-._~]";
const PCT_ENCODED: &str = "%[0-9A-Fa-f]{2}";
// rfc3986 sub-delims without ";" and ",", which CSP reserves as separators
// https://w3c.github.io/webappsec-csp/#grammardef-path-part
const SUB_DELIMS: &str = "[!$&'()*+=]";

const HOST_CHAR: &str = r"[A-Za-z0-9\-]";

fn pchar() -> String {
    format!("(?:{UNRESERVED}|{PCT_ENCODED}|{SUB_DELIMS}|[:@])")
}

fn path_absolute() -> String {
    let pchar = pchar();
    format!("/(?:{pchar}+(?:/{pchar}*)*)?")
}

// https://w3c.github.io/webappsec-csp/#grammardef-host-source
fn host_source_body() -> String {
    let host_part = format!(r"(?:\*|(?:\*\.)?{HOST_CHAR}+(?:\.{HOST_CHAR}+)*\.?)");
    let port_part = r"(?:\*|[0-9]+)";
    format!(
        "(?:{SCHEME_BODY}://)?{host_part}(?::{port_part})?(?:{})?",
        path_absolute()
    )
}

// https://datatracker.ietf.org/doc/html/rfc3986#section-4.1
fn uri_reference_body() -> String {
    let pchar = pchar();
    let segment = format!("{pchar}*");
    let segment_nz = format!("{pchar}+");
    let segment_nz_nc = format!("(?:{UNRESERVED}|{PCT_ENCODED}|{SUB_DELIMS}|@)+");

    let dec_octet = "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9][0-9]|[0-9])";
    let ipv4 = format!(r"{dec_octet}\.{dec_octet}\.{dec_octet}\.{dec_octet}");
    let h16 = "[0-9A-Fa-f]{1,4}";
    let ls32 = format!("(?:{h16}:{h16}|{ipv4})");
    let ipv6 = [
        format!("(?:{h16}:){{6}}{ls32}"),
        format!("::(?:{h16}:){{5}}{ls32}"),
        format!("(?:{h16})?::(?:{h16}:){{4}}{ls32}"),
        format!("(?:(?:{h16}:){{0,1}}{h16})?::(?:{h16}:){{3}}{ls32}"),
        format!("(?:(?:{h16}:){{0,2}}{h16})?::(?:{h16}:){{2}}{ls32}"),
        format!("(?:(?:{h16}:){{0,3}}{h16})?::{h16}:{ls32}"),
        format!("(?:(?:{h16}:){{0,4}}{h16})?::{ls32}"),
        format!("(?:(?:{h16}:){{0,5}}{h16})?::{h16}"),
        format!("(?:(?:{h16}:){{0,6}}{h16})?::"),
    ]
    .join("|");
    let ipvfuture = format!(r"v[0-9A-Fa-f]+\.(?:{UNRESERVED}|{SUB_DELIMS}|:)+");
    let ip_literal = format!(r"\[(?:{ipv6}|{ipvfuture})\]");
    let reg_name = format!("(?:{UNRESERVED}|{PCT_ENCODED}|{SUB_DELIMS})*");

    let host = format!("(?:{ip_literal}|{ipv4}|{reg_name})");
    let userinfo = format!("(?:{UNRESERVED}|{PCT_ENCODED}|{SUB_DELIMS}|:)*");
    let authority = format!("(?:{userinfo}@)?{host}(?::[0-9]*)?");

    let path_abempty = format!("(?:/{segment})*");
    let path_absolute = path_absolute();
    let path_rootless = format!("{segment_nz}(?:/{segment})*");
    let path_noscheme = format!("{segment_nz_nc}(?:/{segment})*");

    let query = format!("(?:{pchar}|[/?])*");
    let fragment = query.clone();

    let hier_part = format!("(?://{authority}{path_abempty}|{path_absolute}|{path_rootless})?");
    let uri = format!(r"{SCHEME_BODY}:{hier_part}(?:\?{query})?(?:#{fragment})?");

    let relative_part =
        format!("(?://{authority}{path_abempty}|{path_absolute}|{path_noscheme})?");
    let relative_ref = format!(r"{relative_part}(?:\?{query})?(?:#{fragment})?");

    format!("(?:{uri})|(?:{relative_ref})")
}

fn alternatives<'a>(literals: impl IntoIterator<Item = &'a str>) -> String {
    literals
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

/// A named grammar production that only answers full-string matches.
#[derive(Debug)]
pub struct Pattern {
    name: &'static str,
    regex: Regex,
}

impl Pattern {
    fn build(name: &'static str, body: &str, case_insensitive: bool) -> Self {
        // Unicode case folding would let e.g. U+017F match 's' in 'self'.
        let regex = RegexBuilder::new(&format!("^(?:{body})$"))
            .case_insensitive(case_insensitive)
            .unicode(!case_insensitive)
            .build()
            .unwrap_or_else(|e| panic!("invalid {name} pattern: {e}"));
        Self { name, regex }
    }

    fn new(name: &'static str, body: &str) -> Self {
        Self::build(name, body, false)
    }

    fn case_insensitive(name: &'static str, body: &str) -> Self {
        Self::build(name, body, true)
    }

    /// Name of the grammar production.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if the entire `text` matches the production.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Result of splitting text on a separator production.
///
/// There is always exactly one more segment than separators; `offsets` holds
/// the byte position of each segment in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'t> {
    pub segments: Vec<&'t str>,
    pub separators: Vec<&'t str>,
    pub offsets: Vec<usize>,
}

/// A separator production, usable both for full matches and for splitting.
#[derive(Debug)]
pub struct Separator {
    pattern: Pattern,
    search: Regex,
}

impl Separator {
    fn new(name: &'static str, body: &str) -> Self {
        let search =
            Regex::new(body).unwrap_or_else(|e| panic!("invalid {name} separator: {e}"));
        Self {
            pattern: Pattern::new(name, body),
            search,
        }
    }

    pub fn name(&self) -> &'static str {
        self.pattern.name()
    }

    /// Returns `true` if the entire `text` is one separator.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Split `text` on every occurrence of the separator, keeping the separators.
    pub fn split<'t>(&self, text: &'t str) -> Split<'t> {
        let mut segments = Vec::new();
        let mut separators = Vec::new();
        let mut offsets = Vec::new();
        let mut last = 0usize;
        for m in self.search.find_iter(text) {
            segments.push(&text[last..m.start()]);
            offsets.push(last);
            separators.push(m.as_str());
            last = m.end();
        }
        segments.push(&text[last..]);
        offsets.push(last);
        Split {
            segments,
            separators,
            offsets,
        }
    }
}

pub static TOKEN: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("token", TOKEN_BODY));

pub static BASE64_VALUE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("base64-value", BASE64_BODY));

pub static SCHEME: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("scheme", SCHEME_BODY));

pub static HOST_SOURCE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("host-source", &host_source_body()));

pub static URI_REFERENCE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("uri-reference", &uri_reference_body()));

pub static KEYWORD_SOURCE: LazyLock<Pattern> = LazyLock::new(|| {
    let body = alternatives(KeywordSource::ALL.iter().map(|k| k.as_str()));
    Pattern::new("keyword-source", &body)
});

pub static WEBRTC_VALUE: LazyLock<Pattern> = LazyLock::new(|| {
    let body = alternatives(WebrtcToken::ALL.iter().map(|w| w.as_str()));
    Pattern::new("webrtc-value", &body)
});

pub static SANDBOX_VALUE: LazyLock<Pattern> = LazyLock::new(|| {
    let body = alternatives(SandboxToken::ALL.iter().map(|t| t.as_str()));
    Pattern::case_insensitive("sandbox-value", &body)
});

pub static NONCE_SOURCE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::case_insensitive("nonce-source", &format!("'nonce-{BASE64_BODY}'"))
});

pub static HASH_SOURCE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::case_insensitive(
        "hash-source",
        &format!("'(?:sha256|sha384|sha512)-{BASE64_BODY}'"),
    )
});

pub static SCHEME_SOURCE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("scheme-source", &format!("{SCHEME_BODY}:")));

pub static NONE_SOURCE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::case_insensitive("none-source", "'none'"));

pub static SELF_SOURCE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::case_insensitive("self-source", "'self'"));

// https://w3c.github.io/webappsec-csp/#grammardef-directive-name
pub static DIRECTIVE_NAME: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("directive-name", &format!(r"(?:{ALPHA}|[0-9\-])+")));

/// Any run of characters that cannot be mistaken for a separator.
pub static NOT_SEPARATOR: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("not-separator", r"[^\t\n\x0C\r ;,]+"));

// https://infra.spec.whatwg.org/#ascii-whitespace
pub static ASCII_WHITESPACE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new("ascii-whitespace", WSP));

/// Sits between a directive name and its first value, and between values.
pub static VALUE_ITEM_SEPARATOR: LazyLock<Separator> =
    LazyLock::new(|| Separator::new("value-item-separator", &format!("{WSP}+")));

/// Sits between two directives of a policy.
pub static DIRECTIVE_SEPARATOR: LazyLock<Separator> =
    LazyLock::new(|| Separator::new("directive-separator", &format!("{WSP}*;{WSP}*")));

/// Sits between two policies of a policy list.
pub static POLICY_SEPARATOR: LazyLock<Separator> =
    LazyLock::new(|| Separator::new("policy-separator", &format!("{WSP}*,{WSP}*")));

/// Returns `true` if `text` is empty or made only of ASCII whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| ASCII_WHITESPACE.is_match(c.encode_utf8(&mut [0; 4])))
}
