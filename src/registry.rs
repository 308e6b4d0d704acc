// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Name registry for directive kinds.
//!
//! Every kind is reachable under two keys, both ASCII-lowercased: the
//! kebab-case directive name (`script-src`) and its identifier form
//! (`scriptsrc`, from `ScriptSrc`). Header text only ever uses the kebab
//! form, so the parser resolves names with [`lookup_wire`].

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::directive::DirectiveKind;
use crate::error::{CspError, Result};
use crate::helpers::naming::{kebab_to_pascal, registry_key};

/// Every registered directive kind.
pub const DIRECTIVES: &[DirectiveKind] = &[
    DirectiveKind::ChildSrc,
    DirectiveKind::ConnectSrc,
    DirectiveKind::DefaultSrc,
    DirectiveKind::FontSrc,
    DirectiveKind::FrameSrc,
    DirectiveKind::ImgSrc,
    DirectiveKind::ManifestSrc,
    DirectiveKind::MediaSrc,
    DirectiveKind::ObjectSrc,
    DirectiveKind::ScriptSrc,
    DirectiveKind::ScriptSrcElem,
    DirectiveKind::ScriptSrcAttr,
    DirectiveKind::StyleSrc,
    DirectiveKind::StyleSrcElem,
    DirectiveKind::StyleSrcAttr,
    DirectiveKind::WorkerSrc,
    DirectiveKind::Webrtc,
    DirectiveKind::BaseUri,
    DirectiveKind::Sandbox,
    DirectiveKind::FormAction,
    DirectiveKind::FrameAncestors,
    DirectiveKind::ReportUri,
    DirectiveKind::ReportTo,
    DirectiveKind::UpgradeInsecureRequests,
];

static REGISTRY: LazyLock<HashMap<String, DirectiveKind>> =
    LazyLock::new(|| build(DIRECTIVES).unwrap_or_else(|e| panic!("{e}")));

/// Build the lookup map for `table`.
///
/// Two kinds claiming the same key (in either name form) is an error.
pub fn build(table: &[DirectiveKind]) -> Result<HashMap<String, DirectiveKind>> {
    let mut map = HashMap::with_capacity(table.len() * 2);
    for &kind in table {
        let kebab = registry_key(kind.name());
        let ident = registry_key(&kebab_to_pascal(kind.name()));
        let keys = if kebab == ident { vec![kebab] } else { vec![kebab, ident] };
        for key in keys {
            if map.insert(key.clone(), kind).is_some() {
                return Err(CspError::DuplicateDirective(key));
            }
        }
    }
    tracing::trace!(entries = map.len(), "built directive registry");
    Ok(map)
}

/// Resolve a directive name in either form, ignoring ASCII case.
pub fn lookup(name: &str) -> Result<DirectiveKind> {
    REGISTRY
        .get(&registry_key(name))
        .copied()
        .ok_or_else(|| CspError::NoSuchDirective(name.to_string()))
}

/// Resolve a directive name as it appears in header text: the kebab form
/// only, ignoring ASCII case. `scriptsrc` is not `script-src` on the wire.
pub fn lookup_wire(name: &str) -> Result<DirectiveKind> {
    match REGISTRY.get(&registry_key(name)) {
        Some(&kind) if name.eq_ignore_ascii_case(kind.name()) => Ok(kind),
        _ => Err(CspError::NoSuchDirective(name.to_string())),
    }
}

/// Returns `true` if header text naming `name` would resolve to a
/// registered kind.
pub fn is_registered(name: &str) -> bool {
    lookup_wire(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("script-src", DirectiveKind::ScriptSrc)]
    #[case("SCRIPT-SRC", DirectiveKind::ScriptSrc)]
    #[case("ScriptSrc", DirectiveKind::ScriptSrc)]
    #[case("scriptsrcelem", DirectiveKind::ScriptSrcElem)]
    #[case("frame-ancestors", DirectiveKind::FrameAncestors)]
    #[case("Upgrade-Insecure-Requests", DirectiveKind::UpgradeInsecureRequests)]
    #[case("webrtc", DirectiveKind::Webrtc)]
    fn lookup_is_case_insensitive(#[case] name: &str, #[case] expected: DirectiveKind) {
        assert_eq!(lookup(name).unwrap(), expected);
    }

    #[rstest]
    #[case("x-custom")]
    #[case("script_src")]
    #[case("")]
    fn lookup_miss(#[case] name: &str) {
        assert_eq!(
            lookup(name).unwrap_err(),
            CspError::NoSuchDirective(name.to_string())
        );
        assert!(!is_registered(name));
    }

    #[test]
    fn every_kind_resolves_by_its_name() {
        for &kind in DIRECTIVES {
            assert_eq!(lookup(kind.name()).unwrap(), kind);
            assert_eq!(lookup_wire(kind.name()).unwrap(), kind);
        }
    }

    #[rstest]
    #[case("script-src", Some(DirectiveKind::ScriptSrc))]
    #[case("Script-SRC", Some(DirectiveKind::ScriptSrc))]
    #[case("webrtc", Some(DirectiveKind::Webrtc))]
    #[case("ScriptSrc", None)]
    #[case("scriptsrc", None)]
    #[case("defaultsrc", None)]
    #[case("UpgradeInsecureRequests", None)]
    fn wire_lookup_is_kebab_only(#[case] name: &str, #[case] expected: Option<DirectiveKind>) {
        assert_eq!(lookup_wire(name).ok(), expected);
        assert_eq!(is_registered(name), expected.is_some());
    }

    #[test]
    fn duplicate_entries_are_rejected() {
        let err = build(&[DirectiveKind::ImgSrc, DirectiveKind::ImgSrc]).unwrap_err();
        assert_eq!(err, CspError::DuplicateDirective("img-src".into()));
    }

    #[test]
    fn single_word_names_share_one_key() {
        let map = build(&[DirectiveKind::Sandbox]).unwrap();
        assert_eq!(map.len(), 1);
    }
}
