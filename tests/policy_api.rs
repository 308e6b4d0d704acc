// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use csp_policy::{
    registry, CspError, Directive, DirectiveCategory, DirectiveKind, DirectiveShape,
    HashAlgorithm, HashSource, KeywordSource, Policy, PolicyList, SandboxToken, Selector,
    ValueItem, WebrtcToken,
};

fn default_and_object() -> Policy {
    Policy::new([
        Directive::new(DirectiveKind::DefaultSrc, [KeywordSource::SelfOrigin.into()]).unwrap(),
        Directive::new(DirectiveKind::ObjectSrc, [ValueItem::NoneSource]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn construction_and_lookup_scenario() {
    let policy = default_and_object();
    assert_eq!(policy.to_string(), "default-src 'self'; object-src 'none'");
    assert_eq!(
        policy.get(DirectiveKind::ObjectSrc).unwrap().name(),
        "object-src"
    );
    assert_eq!(policy.get("default-src").unwrap().name(), "default-src");
    assert!(matches!(policy.get(2usize), Err(CspError::Lookup(_))));
}

#[test]
fn lookup_error_is_distinct_from_unknown_directive() {
    let err = default_and_object().get("x-missing").unwrap_err();
    assert!(matches!(err, CspError::Lookup(_)));
    assert!(matches!(
        registry::lookup("x-missing"),
        Err(CspError::NoSuchDirective(_))
    ));
}

#[test]
fn empty_policy_rejected() {
    assert_eq!(Policy::new(Vec::new()).unwrap_err(), CspError::EmptyPolicy);
}

#[test]
fn none_exclusivity_both_directions() {
    let none = Directive::new(DirectiveKind::ObjectSrc, [ValueItem::NoneSource]).unwrap();
    assert_eq!(none.to_string(), "object-src 'none'");
    assert!(none.append(KeywordSource::SelfOrigin.into()).is_err());

    let keyword =
        Directive::new(DirectiveKind::ObjectSrc, [KeywordSource::SelfOrigin.into()]).unwrap();
    assert!(matches!(
        keyword.append(ValueItem::NoneSource),
        Err(CspError::NoneNotExclusive { .. })
    ));
}

#[test]
fn add_and_remove_are_persistent() {
    let policy = default_and_object();
    let grown = policy.add(
        Directive::new(
            DirectiveKind::Sandbox,
            [SandboxToken::AllowScripts.into(), SandboxToken::AllowSameOrigin.into()],
        )
        .unwrap(),
    );
    assert_eq!(policy.len(), 2);
    assert_eq!(
        grown.to_string(),
        "default-src 'self'; object-src 'none'; sandbox allow-scripts allow-same-origin"
    );
    let shrunk = grown.remove(Selector::Kind(DirectiveKind::ObjectSrc)).unwrap();
    assert_eq!(
        shrunk.to_string(),
        "default-src 'self'; sandbox allow-scripts allow-same-origin"
    );
}

#[test]
fn shape_selector_matches_supertype() {
    let policy: Policy = "script-src 'self'; sandbox; img-src *".parse().unwrap();
    let names: Vec<&str> = policy
        .iter()
        .filter(|d| d.shape() == DirectiveShape::SourceList)
        .map(Directive::name)
        .collect();
    assert_eq!(names, vec!["script-src", "img-src"]);
    assert_eq!(
        policy.get(DirectiveShape::SourceList).unwrap().name(),
        "script-src"
    );
}

#[test]
fn typed_values_render() {
    let d = Directive::strict(
        DirectiveKind::StyleSrc,
        [
            HashSource::with_algorithm(HashAlgorithm::Sha512, "Zm9vYmFy").unwrap().into(),
            KeywordSource::UnsafeInline.into(),
        ],
    )
    .unwrap();
    assert_eq!(d.to_string(), "style-src 'sha512-Zm9vYmFy' 'unsafe-inline'");

    let w = Directive::strict(DirectiveKind::Webrtc, [WebrtcToken::Allow.into()]).unwrap();
    assert_eq!(w.to_string(), "webrtc 'allow'");
}

#[test]
fn categories_cover_every_kind() {
    for &kind in registry::DIRECTIVES {
        let category = kind.category();
        if kind.name().ends_with("-src") && kind != DirectiveKind::WorkerSrc {
            assert_eq!(category, DirectiveCategory::Fetch, "{kind}");
        }
    }
}

#[test]
fn policy_list_from_header_values() {
    let list = PolicyList::from_header_values(["default-src 'self'", "img-src *, font-src 'none'"])
        .unwrap();
    assert_eq!(list.len(), 3);
    assert!(matches!(
        PolicyList::from_header_values(Vec::<&str>::new()),
        Err(CspError::EmptyPolicyList)
    ));
}
