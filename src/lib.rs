//! A complete, in-memory RFC 3986 URI: a parser, a canonical serializer, the `remove_dot_segments`
//! path normalizer, and the §5.2.2 reference resolution algorithm.
//!
//! ```
//! use locus_uri::{parse, Uri};
//!
//! let base: Uri = parse("http://a/b/c/d;p?q").unwrap();
//! let reference: Uri = parse("../g").unwrap();
//! assert_eq!(base.resolve(&reference).to_string(), "http://a/b/g");
//! ```
//!
//! Parsing and resolution never panic on malformed input; [`parse`] returns a [`ParseError`]
//! instead. Serialization and resolution themselves can't fail -- every [`Uri`] that exists is
//! already valid, so there's no error path to report.

mod charset;
mod error;
mod normalize;
mod parser;
mod percent;
mod resolve;
mod serialize;
mod uri;

pub use error::{Component, ParseError};
pub use normalize::remove_dot_segments;
pub use parser::{parse, parse_with, HostValidation};
pub use resolve::resolve;
pub use uri::{Segment, Uri};
