// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

mod common;

use csp_policy::{
    parse_directive, parse_policy, parse_policy_list, CspError, Directive, DirectiveKind,
    KeywordSource, NonceSource, ParseError, Policy, ValueItem,
};
use rstest::rstest;

#[rstest]
#[case("script-src 'self'")]
#[case("SCRIPT-SRC 'self'")]
#[case("sCript-SrC\t'self'\n'nonce-Zm9v'")]
#[case("default-src 'self' https://*.example.com:443/path/ data: blob:")]
#[case("style-src 'unsafe-inline' 'sha384-oqVuAfXRKap7fdgcCY5uykM6+R9GqQ8K/uxy9rx7HNQlGYl1kPzQho1wx4JwY8wC'")]
#[case("script-src 'strict-dynamic' 'unsafe-hashes' 'report-sample' 'wasm-unsafe-eval'")]
#[case("frame-ancestors 'self' https://partner.example")]
#[case("sandbox allow-forms Allow-Popups")]
#[case("webrtc 'block'")]
#[case("report-uri https://example.com/csp-report /local")]
#[case("report-to csp-endpoint")]
#[case("upgrade-insecure-requests")]
#[case("totally-unknown-directive foo bar")]
#[case("img-src\x0C*")]
fn directive_round_trip(#[case] text: &str) {
    common::init_tracing();
    assert_eq!(parse_directive(text).unwrap().to_string(), text);
}

#[rstest]
#[case("default-src 'self'; object-src 'none'")]
#[case("default-src 'self';object-src 'none' ;  img-src *")]
#[case("Default-Src 'NONE'; x-thing a b; script-src 'NONCE-abc=' 'Sha256-Zm9v'")]
#[case("upgrade-insecure-requests; block-all-mixed-content")]
fn policy_round_trip(#[case] text: &str) {
    assert_eq!(parse_policy(text).unwrap().to_string(), text);
}

#[rstest]
#[case("default-src 'self', img-src *")]
#[case(" default-src 'self' ,img-src *  ,  script-src 'none'\t")]
fn policy_list_round_trip(#[case] text: &str) {
    assert_eq!(parse_policy_list(text).unwrap().to_string(), text);
}

#[test]
fn mixed_whitespace_scenario() {
    let text = "sCript-SrC\t'self'\n'nonce-Zm9v'";
    let d = parse_directive(text).unwrap();
    assert_eq!(d.name(), "sCript-SrC");
    assert_eq!(d.kind(), Some(DirectiveKind::ScriptSrc));
    let values: Vec<ValueItem> = d.values().cloned().collect();
    assert_eq!(
        values,
        vec![
            KeywordSource::SelfOrigin.into(),
            NonceSource::new("Zm9v").unwrap().into(),
        ]
    );
    assert_eq!(d.to_string(), text);
}

#[test]
fn case_insensitive_resolution_keeps_spelling() {
    let upper = parse_directive("SCRIPT-SRC 'self'").unwrap();
    let lower = parse_directive("script-src 'self'").unwrap();
    assert_eq!(upper.kind(), lower.kind());
    assert_eq!(upper.to_string(), "SCRIPT-SRC 'self'");
}

#[test]
fn unrecognized_passthrough() {
    let d = parse_directive("totally-unknown-directive foo bar").unwrap();
    assert_eq!(d.name(), "totally-unknown-directive");
    assert_eq!(d.kind(), None);
    let values: Vec<String> = d.values().map(|v| v.to_string()).collect();
    assert_eq!(values, vec!["foo", "bar"]);
    assert!(d.values().all(ValueItem::is_unrecognized));
}

#[test]
fn constructed_directive_reparses_equal() {
    let d = Directive::new(
        DirectiveKind::ScriptSrc,
        [
            KeywordSource::SelfOrigin.into(),
            NonceSource::new("Zm9v").unwrap().into(),
            csp_policy::HostSource::new("https://cdn.example.com").unwrap().into(),
        ],
    )
    .unwrap();
    assert_eq!(parse_directive(&d.to_string()).unwrap(), d);
}

#[test]
fn constructed_policy_reparses_equal() {
    let p = Policy::new([
        Directive::new(DirectiveKind::DefaultSrc, [KeywordSource::SelfOrigin.into()]).unwrap(),
        Directive::new(DirectiveKind::ObjectSrc, [ValueItem::NoneSource]).unwrap(),
        Directive::new(DirectiveKind::FrameAncestors, [ValueItem::SelfSource]).unwrap(),
    ])
    .unwrap();
    assert_eq!(parse_policy(&p.to_string()).unwrap(), p);
}

#[rstest]
#[case("", CspError::Parse(ParseError::MissingName))]
#[case(" script-src 'self'", CspError::Parse(ParseError::Untrimmed { position: 0 }))]
fn directive_rejects_structural_errors(#[case] text: &str, #[case] expected: CspError) {
    assert_eq!(parse_directive(text).unwrap_err(), expected);
}

#[test]
fn from_str_impls_delegate_to_parser() {
    let d: Directive = "img-src *".parse().unwrap();
    let p: Policy = "img-src *; font-src 'none'".parse().unwrap();
    assert_eq!(p.get(0usize).unwrap(), &d);
}
