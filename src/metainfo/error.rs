use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when reading torrent documents or magnet links.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The document contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The document root is not a dictionary.
    #[error("root is not a dictionary")]
    NotADictionary,

    /// A required field is missing.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value or type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// The announce URL does not use a tracker scheme.
    #[error("invalid announce url: {0:?}")]
    InvalidAnnounceUrl(String),

    /// The info hash is not 20 bytes (or 40 hex characters).
    #[error("invalid info hash: {0}")]
    InvalidInfoHash(String),

    /// The magnet link is malformed.
    #[error("invalid magnet link: {0}")]
    InvalidMagnetLink(String),
}
