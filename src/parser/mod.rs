//! §4.4: the top-level splitter. Peels scheme, authority, path, query and fragment off the input
//! in the order the grammar actually disambiguates them (scheme before the first `/`, authority
//! behind `//`, query/fragment after whichever of `?`/`#` comes first).

mod authority;
mod path;

pub use authority::HostValidation;

use crate::charset::{ALPHA, QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, SCHEME_NOT_FIRST};
use crate::error::{Component, ParseError};
use crate::percent;
use crate::uri::{Segment, Uri};

/// Parses `input` under the default (lax) host-validation policy. See [`parse_with`] to choose
/// strict IPv6 validation (§9 open question).
pub fn parse(input: &str) -> Result<Uri, ParseError> {
    parse_with(input, HostValidation::Lax)
}

pub fn parse_with(input: &str, host_validation: HostValidation) -> Result<Uri, ParseError> {
    log::trace!("parsing uri, {} bytes", input.len());
    let bytes = input.as_bytes();
    let mut uri = Uri::new();

    let consumed = cut_scheme(bytes, &mut uri)?;
    let rest = &bytes[consumed..];

    // Step 2: the earliest of '?'/'#' ends the authority+path region.
    log::trace!("splitting authority+path from query+fragment");
    let qf_start = rest.iter().position(|&b| b == b'?' || b == b'#').unwrap_or(rest.len());
    let (authority_and_path, query_and_fragment) = (&rest[..qf_start], &rest[qf_start..]);

    // Step 3: authority split.
    log::trace!("splitting authority from path");
    let path_bytes: &[u8] = if let Some(after_slashes) = authority_and_path.strip_prefix(b"//" as &[u8]) {
        let authority_end = after_slashes.iter().position(|&b| b == b'/').unwrap_or(after_slashes.len());
        let authority_str = &after_slashes[..authority_end];
        authority::parse_authority(authority_str, host_validation, &mut uri)?;
        &after_slashes[authority_end..]
    } else {
        uri.userinfo = None;
        uri.host = None;
        uri.has_port = false;
        uri.port = 0;
        authority_and_path
    };

    // Step 4: path parse.
    log::trace!("parsing path");
    uri.path = path::parse_path(path_bytes)?;

    // Step 5: an authority with an empty path renders as "/".
    if uri.host.is_some() && uri.path.is_empty() {
        uri.path = vec![Segment::from(Vec::<u8>::new())];
    }

    // Step 6: fragment split.
    log::trace!("splitting query from fragment");
    let (query_source, fragment) = match query_and_fragment.iter().position(|&b| b == b'#') {
        Some(idx) => {
            let decoded =
                percent::decode_element(&query_and_fragment[idx + 1..], QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, Component::Fragment)?;
            (&query_and_fragment[..idx], Some(decoded))
        }
        None => (query_and_fragment, None),
    };
    uri.fragment = fragment;

    // Step 7: query.
    log::trace!("parsing query");
    uri.query = if query_source.is_empty() {
        None
    } else {
        let decoded = percent::decode_element(&query_source[1..], QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, Component::Query)?;
        Some(decoded)
    };

    log::trace!("parse succeeded: scheme={:?} host={:?}", uri.scheme(), uri.host().is_some());
    Ok(uri)
}

/// §4.4 step 1. Confines the colon search to the prefix before the first `/`; a colon found there
/// must begin a valid `scheme`, or the whole parse fails. No colon in that window means no scheme
/// at all (a relative reference) and nothing is consumed.
fn cut_scheme(input: &[u8], uri: &mut Uri) -> Result<usize, ParseError> {
    let first_slash = input.iter().position(|&b| b == b'/').unwrap_or(input.len());
    let window = &input[..first_slash];

    let Some(colon) = window.iter().position(|&b| b == b':') else {
        uri.scheme = None;
        return Ok(0);
    };

    let candidate = &window[..colon];
    validate_scheme(candidate)?;

    // `validate_scheme` guarantees every byte here is ASCII, so casting straight to `char` (rather
    // than going through `String::from_utf8` and a fallible conversion) can't fail.
    let scheme: String = candidate.iter().map(|&b| b.to_ascii_lowercase() as char).collect();
    uri.scheme = Some(scheme);
    Ok(colon + 1)
}

fn validate_scheme(candidate: &[u8]) -> Result<(), ParseError> {
    match candidate.first() {
        None => return Err(ParseError::SchemeEmpty),
        Some(&b) if ALPHA.contains(b) => {}
        Some(&b) => return Err(ParseError::SchemeChar { position: 0, found: b }),
    }
    for (i, &b) in candidate.iter().enumerate().skip(1) {
        if !SCHEME_NOT_FIRST.contains(b) {
            return Err(ParseError::SchemeChar { position: i, found: b });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_http_with_path() {
        let uri = parse("http://www.example.com/foo/bar").unwrap();
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.host(), Some(&b"www.example.com"[..]));
        let path: Vec<_> = uri.path().iter().map(|s| s.to_string()).collect();
        assert_eq!(path, vec!["", "foo", "bar"]);
        assert_eq!(uri.port(), None);
        assert!(!uri.has_query());
        assert!(!uri.has_fragment());
    }

    #[test]
    fn scenario_urn_no_authority() {
        let uri = parse("urn:book:fantasy:Hobbit").unwrap();
        assert_eq!(uri.scheme(), Some("urn"));
        assert_eq!(uri.host(), None);
        let path: Vec<_> = uri.path().iter().map(|s| s.to_string()).collect();
        assert_eq!(path, vec!["book:fantasy:Hobbit"]);
    }

    #[test]
    fn scenario_ipv6_host() {
        let uri = parse("http://[2001:db8:85a3:8d3:1319:8a2e:370:7348]/").unwrap();
        assert_eq!(uri.host(), Some(&b"2001:db8:85a3:8d3:1319:8a2e:370:7348"[..]));

        assert!(parse("http://[::fxff:1.2.3.4]/").is_err());
    }

    #[test]
    fn scenario_fragment_empty_but_present() {
        let uri = parse("http://example.com#").unwrap();
        assert!(uri.has_fragment());
        assert_eq!(uri.fragment(), Some(&b""[..]));
    }

    #[test]
    fn empty_path_authority_equivalence() {
        let a = parse("http://example.com").unwrap();
        let b = parse("http://example.com/").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scheme_case_insensitivity() {
        assert_eq!(parse("http://example.com/").unwrap(), parse("HTTP://example.com/").unwrap());
    }

    #[test]
    fn reg_name_host_case_insensitivity() {
        let uri = parse("//www.Example.COM/").unwrap();
        assert_eq!(uri.host(), Some(&b"www.example.com"[..]));
    }

    #[test]
    fn scheme_rejection_set() {
        assert!(parse(":").is_err());
        assert!(parse("0://example.com").is_err());
        assert!(parse(".://example.com").is_err());
    }

    #[test]
    fn non_ascii_reg_name_percent_encoded_on_input() {
        let uri = parse("//%E1%88%B4.example.com").unwrap();
        assert_eq!(uri.host(), Some("ሴ.example.com".as_bytes()));
    }

    #[test]
    fn path_corner_cases() {
        assert!(parse("").unwrap().path().is_empty());
        assert_eq!(parse("/").unwrap().path().len(), 1);
        assert_eq!(parse("/foo").unwrap().path().len(), 2);
        assert_eq!(parse("foo/").unwrap().path().len(), 2);
    }

    #[test]
    fn port_bounds() {
        for port in [0u32, 1, 80, 8080, 65535] {
            let uri = parse(&format!("http://host:{port}/")).unwrap();
            assert_eq!(uri.port(), Some(port as u16));
        }
        assert!(parse("http://host:65536/").is_err());
    }
}
