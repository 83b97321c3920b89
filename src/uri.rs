//! The in-memory URI value and its invariants (§3).

use std::fmt;
use std::hash::{Hash, Hasher};

/// One decoded path segment. Segments are stored as raw decoded bytes rather than `String` because
/// `pchar` only guarantees a percent-decoded byte is *allowed*, not that it is valid UTF-8 --
/// assuming otherwise would silently corrupt a URI carrying arbitrary encoded octets in its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Segment(pub(crate) Vec<u8>);

impl Segment {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Segment {
    fn from(bytes: Vec<u8>) -> Self {
        Segment(bytes)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// A complete, in-memory URI, per RFC 3986.
///
/// Three fields -- `userinfo`, `query`, `fragment` -- are modeled as `Option<Vec<u8>>` rather than
/// `Vec<u8>` with a separate "present" flag, because `None` and `Some(vec![])` are genuinely
/// different URIs (`http://host` vs. `http://host?`) and must round-trip differently. `host` is the
/// same shape for the same reason (`userinfo@host` with an empty host is distinct from no
/// authority at all).
#[derive(Debug, Clone, Default)]
pub struct Uri {
    pub(crate) scheme: Option<String>,
    pub(crate) userinfo: Option<Vec<u8>>,
    pub(crate) host: Option<Vec<u8>>,
    pub(crate) has_port: bool,
    pub(crate) port: u16,
    pub(crate) path: Vec<Segment>,
    pub(crate) query: Option<Vec<u8>>,
    pub(crate) fragment: Option<Vec<u8>>,
}

impl Uri {
    /// Constructs an empty URI: no scheme, no authority, an empty path, no query, no fragment.
    pub fn new() -> Uri {
        Uri::default()
    }

    // ----- accessors -----

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn userinfo(&self) -> Option<&[u8]> {
        self.userinfo.as_deref()
    }

    pub fn host(&self) -> Option<&[u8]> {
        self.host.as_deref()
    }

    pub fn has_port(&self) -> bool {
        self.has_port
    }

    pub fn port(&self) -> Option<u16> {
        self.has_port.then_some(self.port)
    }

    pub fn path(&self) -> &[Segment] {
        &self.path
    }

    pub fn query(&self) -> Option<&[u8]> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&[u8]> {
        self.fragment.as_deref()
    }

    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    pub fn has_fragment(&self) -> bool {
        self.fragment.is_some()
    }

    /// Invariant 1: a URI with no scheme is a relative reference.
    pub fn is_relative_reference(&self) -> bool {
        self.scheme.is_none()
    }

    /// Invariant 3: with neither scheme nor authority, the first path segment must not contain a
    /// colon, so that the path can't be mistaken for a scheme on re-parse (`path-noscheme`).
    pub fn contains_relative_path(&self) -> bool {
        self.is_relative_reference()
            && self.host.is_none()
            && matches!(self.path.first(), Some(seg) if seg.as_bytes().contains(&b':'))
    }

    // ----- setters -----

    /// Sets the scheme. A zero-length scheme is rejected, per invariant 4 ("never present").
    /// Does not validate the full `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )` grammar -- that's
    /// the parser's job on input; a setter trusts its caller the way the teacher's own `Headers`
    /// setters trust a validated `&str` once `is_token_string` has already been checked upstream.
    pub fn set_scheme(&mut self, scheme: Option<&str>) {
        self.scheme = match scheme {
            Some(s) if !s.is_empty() => Some(s.to_ascii_lowercase()),
            _ => None,
        };
    }

    pub fn set_userinfo(&mut self, userinfo: Option<&[u8]>) {
        self.userinfo = userinfo.map(|b| b.to_vec());
    }

    pub fn set_host(&mut self, host: Option<&[u8]>) {
        self.host = host.map(|b| b.to_vec());
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
        self.has_port = true;
    }

    pub fn clear_port(&mut self) {
        self.has_port = false;
        self.port = 0;
    }

    pub fn set_path(&mut self, segments: Vec<Segment>) {
        self.path = segments;
    }

    pub fn set_query(&mut self, query: Option<&[u8]>) {
        self.query = query.map(|b| b.to_vec());
    }

    pub fn clear_query(&mut self) {
        self.query = None;
    }

    pub fn set_fragment(&mut self, fragment: Option<&[u8]>) {
        self.fragment = fragment.map(|b| b.to_vec());
    }

    pub fn clear_fragment(&mut self) {
        self.fragment = None;
    }

    /// Resolves `reference` against `self` as the base, per §4.8. Inherent-method form of
    /// [`crate::resolve::resolve`].
    pub fn resolve(&self, reference: &Uri) -> Uri {
        crate::resolve::resolve(self, reference)
    }
}

/// §3 invariant 5 / §8's equality universal property: field-wise, with the port compared only
/// when both sides have one. Modeling `has_port`/`port` as a pair here (rather than bundling them
/// into a single `Option<u16>` on the struct) is what forces this manual impl to exist at all --
/// it's the one place that pair has to be treated as a unit.
impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.userinfo == other.userinfo
            && self.host == other.host
            && self.port_for_eq() == other.port_for_eq()
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl Uri {
    fn port_for_eq(&self) -> Option<u16> {
        self.has_port.then_some(self.port)
    }
}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.userinfo.hash(state);
        self.host.hash(state);
        self.port_for_eq().hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.fragment.hash(state);
    }
}
