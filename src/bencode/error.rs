use thiserror::Error;

/// Errors produced while decoding bencoded data.
#[derive(Debug, Error)]
pub enum BencodeError {
    /// Fewer bytes remain than the smallest valid entity (`0:`, `le`, ...).
    #[error("input truncated: need at least 2 bytes, have {0}")]
    Truncated(usize),

    #[error("malformed integer: {0}")]
    MalformedInteger(String),

    #[error("unterminated list")]
    UnterminatedList,

    #[error("unterminated dictionary")]
    UnterminatedDictionary,

    #[error("invalid string length: {0}")]
    InvalidLength(String),

    #[error("unrecognized tag: {:?}", char::from(*.0))]
    UnrecognizedTag(u8),

    #[error("trailing data after value")]
    TrailingData,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
