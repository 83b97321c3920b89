use thiserror::Error;

/// The single failure mode of [`crate::parse`]: the input does not conform to the RFC 3986
/// grammar. `resolve` and serialization never produce this (see the crate root docs).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed scheme: empty scheme candidate before ':'")]
    SchemeEmpty,

    #[error("malformed scheme: illegal byte {found:#04x} at position {position}")]
    SchemeChar { position: usize, found: u8 },

    #[error("malformed percent-escape at byte offset {0}")]
    PercentEscape(usize),

    #[error("illegal character {found:?} in {component} at byte offset {position}")]
    IllegalChar { component: Component, position: usize, found: u8 },

    #[error("port is not purely decimal")]
    PortNotDecimal,

    #[error("port {0} exceeds 16 bits")]
    PortOutOfRange(u64),

    #[error("unbalanced brackets in IP-literal host")]
    UnbalancedIpLiteral,

    #[error("illegal character in IPvFuture host at byte offset {0}")]
    IpFutureChar(usize),
}

/// The component an [`ParseError::IllegalChar`] was found in, for callers that want to react
/// differently (e.g. log at a different level) depending on which production rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    UserInfo,
    Host,
    Path,
    Query,
    Fragment,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Component::UserInfo => "userinfo",
            Component::Host => "host",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        })
    }
}
