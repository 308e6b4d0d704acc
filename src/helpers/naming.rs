// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

/// Convert a kebab-case directive name to its identifier form:
/// `script-src-elem` becomes `ScriptSrcElem`.
pub fn kebab_to_pascal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for part in s.split('-') {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }
    out
}

/// Key used by the registry for both name forms: ASCII-lowercased.
pub fn registry_key(s: &str) -> String {
    s.to_ascii_lowercase()
}
