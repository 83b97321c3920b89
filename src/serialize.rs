//! §4.9: canonical serialization, the inverse of parsing. `Display` produces the minimal-but-correct
//! encoded string: upper-case percent-escapes, an IP-literal host gets its brackets back, and a
//! literal `+` in the query/fragment is always escaped even though it's grammatically legal there
//! (§4.13 -- a bare `+` in a query string is too often read as encoded whitespace to emit one).

use std::fmt;

use crate::charset::{HEXDIG, PCHAR_NOT_PCT_ENCODED, QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, REG_NAME_NOT_PCT_ENCODED, USER_INFO_NOT_PCT_ENCODED};
use crate::percent::{self, hex_digit_upper};
use crate::uri::Uri;

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::new();

        if let Some(scheme) = &self.scheme {
            out.extend_from_slice(scheme.as_bytes());
            out.push(b':');
        }

        if let Some(host) = &self.host {
            out.extend_from_slice(b"//");
            if let Some(userinfo) = &self.userinfo {
                percent::encode_element(userinfo, USER_INFO_NOT_PCT_ENCODED, &mut out);
                out.push(b'@');
            }
            if is_ip_literal(host) {
                out.push(b'[');
                out.extend_from_slice(host);
                out.push(b']');
            } else {
                percent::encode_element(host, REG_NAME_NOT_PCT_ENCODED, &mut out);
            }
            if self.has_port {
                out.push(b':');
                out.extend_from_slice(self.port.to_string().as_bytes());
            }
        }

        // `parse_path` collapses the root path "/" down to a single empty segment rather than the
        // two empty segments a plain `split('/')` would produce, so that one case is special-cased
        // back out here; every other path is exactly the inverse of that split, so a plain join
        // reproduces it.
        if self.path.len() == 1 && self.path[0].is_empty() {
            out.push(b'/');
        } else {
            // §4.9(3): without an authority, a path starting with "//" would be reparsed as one --
            // the first two segments being empty is exactly what an original "//..." input splits
            // into. A leading no-op "/." segment breaks that without changing the path's meaning
            // (`remove_dot_segments` erases it on the way back in).
            if self.host.is_none() && self.path.len() >= 2 && self.path[0].is_empty() && self.path[1].is_empty() {
                out.extend_from_slice(b"/.");
            }
            for (index, segment) in self.path.iter().enumerate() {
                if index > 0 {
                    out.push(b'/');
                }
                percent::encode_element(segment.as_bytes(), PCHAR_NOT_PCT_ENCODED, &mut out);
            }
        }

        if let Some(query) = &self.query {
            out.push(b'?');
            encode_query_or_fragment(query, &mut out);
        }

        if let Some(fragment) = &self.fragment {
            out.push(b'#');
            encode_query_or_fragment(fragment, &mut out);
        }

        f.write_str(&String::from_utf8_lossy(&out))
    }
}

fn encode_query_or_fragment(input: &[u8], out: &mut Vec<u8>) {
    for &b in input {
        if b == b'+' {
            out.extend_from_slice(b"%2B");
        } else if QUERY_OR_FRAGMENT_NOT_PCT_ENCODED.contains(b) {
            out.push(b);
        } else {
            out.push(b'%');
            out.push(hex_digit_upper(b >> 4));
            out.push(hex_digit_upper(b & 0x0f));
        }
    }
}

/// A reg-name never carries a raw `:` (the host state machine hands `:` off to the port), so a
/// stored host containing one -- or matching the `"v" 1*HEXDIG "."` `IPvFuture` lead-in -- must have
/// come from a bracketed `IP-literal`, whose brackets were stripped on the way in (§3).
fn is_ip_literal(host: &[u8]) -> bool {
    if host.contains(&b':') {
        return true;
    }
    match host.split_first() {
        Some((b'v' | b'V', rest)) => rest.iter().take_while(|&&b| HEXDIG.contains(b)).count() > 0 && rest.contains(&b'.'),
        _ => false,
    }
}
