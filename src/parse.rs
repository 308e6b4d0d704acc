// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Text to model.
//!
//! Parsing is lenient about content and strict about structure: unknown
//! directive names and unclassifiable value tokens are kept verbatim, while
//! untrimmed input and empty directives or policies are errors. Everything
//! accepted renders back to the exact input text.

use crate::directive::{Directive, DirectiveShape};
use crate::error::{CspError, ParseError, Result};
use crate::patterns::{self, Split};
use crate::policy::Policy;
use crate::policy_list::PolicyList;
use crate::registry;
use crate::values::{self, UnrecognizedValueItem, ValueItem};

/// Parse a single directive such as `script-src 'self' https:`.
///
/// `text` must not start or end with whitespace.
pub fn parse_directive(text: &str) -> Result<Directive> {
    if text.is_empty() {
        return Err(ParseError::MissingName.into());
    }
    let split = patterns::VALUE_ITEM_SEPARATOR.split(text);
    reject_empty_segments(&split, |_, offset| ParseError::Untrimmed { position: offset })?;

    let name = split.segments[0];
    let kind = match registry::lookup_wire(name) {
        Ok(kind) => Some(kind),
        Err(e) => {
            tracing::debug!(directive = %name, error = %e, "keeping unrecognized directive");
            None
        }
    };
    let shape = kind.map_or(DirectiveShape::Unrecognized, |k| k.shape());
    let tokens = &split.segments[1..];

    let mut items: Vec<ValueItem> = tokens
        .iter()
        .map(|token| values::classify(token, shape.value_kinds()))
        .collect();

    // 'none' next to other values cannot be a none-source.
    if shape.is_none_exclusive() && items.len() > 1 {
        for (item, token) in items.iter_mut().zip(tokens) {
            if item.is_none_source() {
                tracing::debug!(directive = %name, %token, "'none' is not alone; keeping it unrecognized");
                *item = ValueItem::Unrecognized(UnrecognizedValueItem::verbatim(token));
            }
        }
    }

    let entries = split
        .separators
        .iter()
        .zip(items)
        .zip(tokens)
        .map(|((sep, item), token)| (*sep, item, *token));
    Directive::from_parsed(kind, name, entries)
}

/// Parse a policy: directives separated by `;`.
pub fn parse_policy(text: &str) -> Result<Policy> {
    if patterns::is_blank(text) {
        return Err(CspError::EmptyPolicy);
    }
    let split = patterns::DIRECTIVE_SEPARATOR.split(text);
    reject_empty_segments(&split, |index, _| ParseError::EmptyDirective { index })?;

    let directives = split
        .segments
        .iter()
        .map(|segment| parse_directive(segment))
        .collect::<Result<Vec<_>>>()?;
    let separators = split.separators.iter().map(|s| s.to_string()).collect();
    Ok(Policy::from_parts(directives, separators))
}

/// Parse a policy list: policies separated by `,`.
///
/// Leading and trailing ASCII whitespace is allowed here (header field
/// values commonly carry it) and is kept for rendering.
pub fn parse_policy_list(text: &str) -> Result<PolicyList> {
    let is_ws = |c: char| c.is_ascii_whitespace();
    let body = text.trim_matches(is_ws);
    if body.is_empty() {
        return Err(CspError::EmptyPolicyList);
    }
    let start = text.len() - text.trim_start_matches(is_ws).len();
    let leading = &text[..start];
    let trailing = &text[start + body.len()..];

    let split = patterns::POLICY_SEPARATOR.split(body);
    reject_empty_segments(&split, |index, _| ParseError::EmptyPolicy { index })?;

    let policies = split
        .segments
        .iter()
        .map(|segment| parse_policy(segment))
        .collect::<Result<Vec<_>>>()?;
    let separators = split.separators.iter().map(|s| s.to_string()).collect();
    Ok(PolicyList::from_parts(policies, separators, leading, trailing))
}

fn reject_empty_segments(
    split: &Split<'_>,
    error: impl Fn(usize, usize) -> ParseError,
) -> Result<()> {
    match split.segments.iter().position(|s| s.is_empty()) {
        Some(index) => Err(error(index, split.offsets[index]).into()),
        None => Ok(()),
    }
}
