// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Error types shared by the model, registry and parser.

use crate::values::ValueKind;

/// Errors produced while building, looking up or parsing CSP objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CspError {
    /// A value item's text does not match its grammar.
    #[error("malformed {kind} value '{value}'")]
    MalformedValue { kind: ValueKind, value: String },

    #[error("malformed directive name '{0}'")]
    MalformedName(String),

    #[error("'{0}' names a registered directive; build it from its kind")]
    RegisteredName(String),

    #[error("malformed separator {0:?}, expected {1}")]
    MalformedSeparator(String, &'static str),

    #[error("'none' may not be combined with other values in '{directive}'")]
    NoneNotExclusive { directive: String },

    #[error("directive '{directive}' takes exactly {expected} value(s), found {found}")]
    Arity {
        directive: String,
        expected: usize,
        found: usize,
    },

    #[error("{value} is not a legal value for directive '{directive}'")]
    IllegalValue { directive: String, value: String },

    #[error("a policy must contain at least one directive")]
    EmptyPolicy,

    #[error("a policy list must contain at least one policy")]
    EmptyPolicyList,

    #[error("expected {expected} separator(s), found {found}")]
    SeparatorCount { expected: usize, found: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no such directive: '{0}'")]
    NoSuchDirective(String),

    #[error("duplicate directive definition: '{0}'")]
    DuplicateDirective(String),

    /// `Policy::get`/`Policy::remove` found nothing for the selector.
    #[error("no directive matches {0}")]
    Lookup(String),
}

/// Structural problems in text handed to the parser.
///
/// None of these are recovered from by the parser; callers should fix (usually
/// trim) the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no directive name found in directive string")]
    MissingName,

    #[error("mismatch between tokens and separators at byte {position}; is the input trimmed?")]
    Untrimmed { position: usize },

    #[error("empty directive at position {index} in policy")]
    EmptyDirective { index: usize },

    #[error("empty policy at position {index} in policy list")]
    EmptyPolicy { index: usize },
}

pub type Result<T, E = CspError> = std::result::Result<T, E>;
