//! §4.6: split a path string into segments, then decode each one.

use crate::charset::PCHAR_NOT_PCT_ENCODED;
use crate::error::{Component, ParseError};
use crate::percent;
use crate::uri::Segment;

/// Splits `input` into raw (not yet percent-decoded) segments, then decodes each one against
/// `pchar`.
///
/// Three cases, per §4.6:
/// - empty input -> no segments at all (not even one empty one);
/// - the exact string `"/"` -> a single empty segment (the absolute root);
/// - anything else -> an ordinary split on `/`, so a leading slash yields a leading empty segment,
///   consecutive slashes yield empty interior segments, and a trailing slash yields a trailing
///   empty segment.
pub fn parse_path(input: &[u8]) -> Result<Vec<Segment>, ParseError> {
    let raw: Vec<&[u8]> = if input.is_empty() {
        Vec::new()
    } else if input == b"/" {
        vec![&input[0..0]]
    } else {
        input.split(|&b| b == b'/').collect()
    };

    raw.into_iter()
        .map(|seg| percent::decode_element(seg, PCHAR_NOT_PCT_ENCODED, Component::Path).map(Segment::from))
        .collect()
}
