// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Content-Security-Policy header values: model, parser, serializer and linter.
//!
//! Policies can be built from typed values or parsed from header text.
//! Parsing keeps every separator and the original spelling of names and
//! case-insensitive keywords, so `parse_policy(t)?.to_string() == t` for any
//! accepted `t`.
//!
//! ```
//! use csp_policy::{parse_policy, Directive, DirectiveKind, ValueItem};
//!
//! let policy = parse_policy("default-src 'self';  img-src *").unwrap();
//! assert_eq!(policy.to_string(), "default-src 'self';  img-src *");
//!
//! let policy = policy.add(
//!     Directive::new(DirectiveKind::ObjectSrc, [ValueItem::NoneSource]).unwrap(),
//! );
//! assert_eq!(policy.get(DirectiveKind::ObjectSrc).unwrap().value(), "'none'");
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod helpers;
pub mod lint;
pub mod parse;
pub mod patterns;
pub mod policy;
pub mod policy_list;
pub mod registry;
pub mod rules;
pub mod values;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use directive::{Directive, DirectiveCategory, DirectiveKind, DirectiveShape};
pub use error::{CspError, ParseError, Result};
pub use parse::{parse_directive, parse_policy, parse_policy_list};
pub use policy::{Policy, Selector};
pub use policy_list::{PolicyList, CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY_REPORT_ONLY};
pub use values::{
    HashAlgorithm, HashSource, HostSource, KeywordSource, NonceSource, ReportToToken,
    SandboxToken, SchemeSource, UnrecognizedValueItem, UriReference, ValueItem, ValueKind,
    WebrtcToken,
};
