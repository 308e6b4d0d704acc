// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

/// Helpers for the CSP `directive-name` grammar (`1*( ALPHA / DIGIT / "-" )`).
pub fn is_directive_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Return the first character of `s` that cannot appear in a directive name,
/// or `None` if every character is valid.
pub fn find_invalid_directive_name_char(s: &str) -> Option<char> {
    s.chars().find(|&c| !is_directive_name_char(c))
}
