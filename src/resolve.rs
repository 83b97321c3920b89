//! §4.8 / RFC 3986 §5.2.2: transform a (possibly relative) reference against a base `Uri` into a
//! target `Uri`. Strict mode throughout -- a reference whose scheme happens to equal the base's
//! scheme is still treated as an absolute reference (RFC 3986 §5.2.2's backwards-compatibility
//! carve-out for `"http:g"` is explicitly not implemented; see DESIGN.md).

use crate::normalize::remove_dot_segments;
use crate::uri::{Segment, Uri};

/// Resolves `reference` against `base`, per §4.8. Free-function form of [`Uri::resolve`].
pub fn resolve(base: &Uri, reference: &Uri) -> Uri {
    let mut target = Uri::new();

    if let Some(scheme) = reference.scheme() {
        target.set_scheme(Some(scheme));
        copy_authority(&mut target, reference);
        target.set_path(remove_dot_segments(reference.path()));
        target.set_query(reference.query());
    } else if reference.host().is_some() {
        copy_authority(&mut target, reference);
        target.set_path(remove_dot_segments(reference.path()));
        target.set_query(reference.query());
        target.set_scheme(base.scheme());
    } else {
        if reference.path().is_empty() {
            target.set_path(base.path().to_vec());
            target.set_query(reference.query().or_else(|| base.query()));
        } else if starts_with_slash(reference.path()) {
            target.set_path(remove_dot_segments(reference.path()));
            target.set_query(reference.query());
        } else {
            let merged = merge(base, reference.path());
            target.set_path(remove_dot_segments(&merged));
            target.set_query(reference.query());
        }
        copy_authority(&mut target, base);
        target.set_scheme(base.scheme());
    }

    target.set_fragment(reference.fragment());
    target
}

fn copy_authority(target: &mut Uri, source: &Uri) {
    target.set_userinfo(source.userinfo());
    target.set_host(source.host());
    match source.port() {
        Some(port) => target.set_port(port),
        None => target.clear_port(),
    }
}

fn starts_with_slash(path: &[Segment]) -> bool {
    path.first().is_some_and(Segment::is_empty)
}

/// RFC 3986 §5.3's `merge`: a base with an authority and an empty (or root, `"/"`) path merges as
/// if its path were `"/"`; otherwise the reference's path replaces everything after the base path's
/// last `/`.
///
/// A root base path is stored as the single empty segment `[""]` (§4.4 step 5 already expands a
/// truly empty authority path to that form before this ever runs), so it's not enough to check
/// `base.path().is_empty()` -- that's only ever true for an authority-less base. The root case has
/// to be recognized by shape instead, and handled the same way as empty: don't pop the leading
/// empty segment, prepend one.
fn merge(base: &Uri, reference_path: &[Segment]) -> Vec<Segment> {
    let base_path = base.path();
    let is_root = base_path.is_empty() || (base_path.len() == 1 && base_path[0].is_empty());
    if base.host().is_some() && is_root {
        let mut merged = vec![Segment::from(Vec::<u8>::new())];
        merged.extend_from_slice(reference_path);
        merged
    } else {
        let mut merged = base_path.to_vec();
        merged.pop();
        merged.extend_from_slice(reference_path);
        merged
    }
}
