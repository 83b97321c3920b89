//! §4.7: `remove_dot_segments`, applied directly to the decoded segment list rather than the raw
//! string buffer algorithm in RFC 3986 §5.2.4 (the two are equivalent once segments are already
//! split and decoded, and operating on the list avoids re-encoding round trips).

use crate::uri::Segment;

/// Removes `.` and `..` segments from `segments`, per §4.7. Preserves a leading empty segment
/// (absoluteness) and appends a trailing empty segment whenever the input ends at a directory
/// boundary (a `.`, a `..`, or an already-empty segment) and the output doesn't already end in one.
pub fn remove_dot_segments(segments: &[Segment]) -> Vec<Segment> {
    let is_absolute = segments.first().is_some_and(|s| s.is_empty());

    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    if is_absolute {
        out.push(Segment::from(Vec::<u8>::new()));
    }

    let floor = if is_absolute { 1 } else { 0 };
    let mut ended_at_boundary = false;

    for (index, seg) in segments.iter().enumerate() {
        if index == 0 && is_absolute {
            continue; // already represented by the leading empty segment pushed above
        }

        match seg.as_bytes() {
            b"." => ended_at_boundary = true,
            b".." => {
                if out.len() > floor {
                    out.pop();
                }
                ended_at_boundary = true;
            }
            other => {
                out.push(seg.clone());
                ended_at_boundary = other.is_empty();
            }
        }
    }

    if ended_at_boundary && !out.last().is_some_and(Segment::is_empty) {
        out.push(Segment::from(Vec::<u8>::new()));
    }

    out
}
