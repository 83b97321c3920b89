//! Black-box coverage against the public API: the RFC 3986 §5.4 resolution table (already unit
//! tested alongside `resolve` itself; here we only check the seed scenarios end to end, through the
//! crate root, to make sure the re-exports actually wire up) plus round-trip and idempotence
//! properties via `proptest`.

use locus_uri::{parse, parse_with, remove_dot_segments, HostValidation, Segment, Uri};
use proptest::collection::vec as pvec;
use proptest::prelude::*;

#[test]
fn seed_scenario_http_with_path_and_query() {
    let _ = env_logger::try_init();
    let uri = parse("http://user:pw@www.example.com:8080/a/b?x=1&y=2#frag").unwrap();
    assert_eq!(uri.scheme(), Some("http"));
    assert_eq!(uri.userinfo(), Some(&b"user:pw"[..]));
    assert_eq!(uri.host(), Some(&b"www.example.com"[..]));
    assert_eq!(uri.port(), Some(8080));
    assert_eq!(uri.query(), Some(&b"x=1&y=2"[..]));
    assert_eq!(uri.fragment(), Some(&b"frag"[..]));
}

#[test]
fn seed_scenario_urn_has_no_authority() {
    let uri = parse("urn:book:fantasy:Hobbit").unwrap();
    assert_eq!(uri.host(), None);
    assert!(!uri.is_relative_reference());
}

#[test]
fn seed_scenario_ipv6_garbage_byte_rejected() {
    assert!(parse("http://[::fxff:1.2.3.4]/").is_err());
}

#[test]
fn seed_scenario_strict_host_validation_catches_group_overflow() {
    // Nine groups -- too many for a `::`-free address -- is accepted under `Lax` (no grouping
    // check) but rejected under `Strict`.
    let input = "http://[1:2:3:4:5:6:7:8:9]/";
    assert!(parse_with(input, HostValidation::Lax).is_ok());
    assert!(parse_with(input, HostValidation::Strict).is_err());
}

#[test]
fn seed_scenario_resolve_dot_dot_above_base_path() {
    let base = parse("http://a/b/c/d;p?q").unwrap();
    let reference = parse("../../g").unwrap();
    assert_eq!(base.resolve(&reference).to_string(), "http://a/g");
}

#[test]
fn seed_scenario_remove_dot_segments_example() {
    let segments: Vec<Segment> = ["", "a", "b", "c", ".", "..", "..", "g"].iter().map(|s| Segment::from(*s)).collect();
    let normalized = remove_dot_segments(&segments);
    let strs: Vec<String> = normalized.iter().map(|s| s.to_string()).collect();
    assert_eq!(strs, vec!["", "a", "g"]);
}

#[test]
fn equivalent_authority_empty_path_forms_compare_equal() {
    assert_eq!(parse("http://example.com").unwrap(), parse("http://example.com/").unwrap());
}

fn arbitrary_path_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        Just(b'/'),
        Just(b'.'),
        Just(b'~'),
        Just(b'-'),
        Just(b'_'),
        Just(b':'),
        Just(b'@'),
        b'a'..=b'z',
        b'0'..=b'9',
    ]
}

fn arbitrary_path() -> impl Strategy<Value = String> {
    pvec(arbitrary_path_byte(), 0..24).prop_map(|bytes| String::from_utf8(bytes).unwrap())
}

proptest! {
    /// Parsing, then serializing, a syntactically valid `http` URI built from an unreserved/pchar
    /// alphabet always reproduces a URI that parses back to the same value. This doesn't assert
    /// byte-for-byte string equality (the serializer's case-folding and percent-encoding choices
    /// aren't always the identity on the input), only that the *value* is stable across one
    /// serialize/parse cycle.
    #[test]
    fn parse_serialize_parse_round_trips_to_the_same_value(path in arbitrary_path()) {
        let input = format!("http://example.com/{path}");
        if let Ok(uri) = parse(&input) {
            let serialized = uri.to_string();
            let reparsed = parse(&serialized).expect("serializer must always produce parseable output");
            prop_assert_eq!(uri, reparsed);
        }
    }

    /// `remove_dot_segments` is idempotent: normalizing an already-normalized path is a no-op.
    #[test]
    fn remove_dot_segments_is_idempotent(path in arbitrary_path()) {
        let segments = parse(&format!("http://example.com/{path}")).unwrap().path().to_vec();
        let once = remove_dot_segments(&segments);
        let twice = remove_dot_segments(&once);
        prop_assert_eq!(once, twice);
    }

    /// Resolving a reference against itself as the base is the identity on the reference's own
    /// fields it doesn't inherit from anywhere (scheme and authority are always present when both
    /// sides are the same absolute URI, so nothing is pulled from a base that isn't already there).
    #[test]
    fn resolving_an_absolute_uri_against_itself_is_itself(path in arbitrary_path()) {
        let input = format!("http://example.com/{path}");
        if let Ok(uri) = parse(&input) {
            let resolved: Uri = uri.resolve(&uri);
            prop_assert_eq!(resolved.to_string(), uri.to_string());
        }
    }
}
