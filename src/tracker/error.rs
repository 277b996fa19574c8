use thiserror::Error;

use crate::metainfo::MetainfoError;

/// Broad class of a [`TrackerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: URL, torrent document, bencode.
    Parse,
    /// The tracker answered, but not with a usable scrape.
    Protocol,
    /// Name resolution, socket I/O or a timeout.
    Network,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timeout during {0}")]
    Timeout(&'static str),

    #[error("cannot resolve hostname: {0}")]
    Resolve(String),

    #[error("metainfo error: {0}")]
    Metainfo(#[from] MetainfoError),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("no port specified for UDP url: {0}")]
    MissingPort(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("authentication not supported in urls: {0}")]
    CredentialsInUrl(String),

    #[error("path must end in /announce or /scrape, got: {0}")]
    UnsupportedPath(String),

    #[error("response larger than {0} bytes")]
    ResponseTooLarge(usize),

    #[error("bad HTTP status: {0}")]
    BadStatus(String),

    #[error("invalid scrape response: {0}")]
    InvalidScrapeResponse(String),

    #[error("tracker returned error: {0}")]
    TrackerFailure(String),

    #[error("bad connect response: {0}")]
    BadConnectResponse(String),

    #[error("bad scrape response: {0}")]
    BadScrapeResponse(String),

    #[error("no trackers available")]
    NoTrackersAvailable,
}

impl TrackerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrackerError::Io(_) | TrackerError::Timeout(_) | TrackerError::Resolve(_) => {
                ErrorKind::Network
            }
            TrackerError::Metainfo(_)
            | TrackerError::InvalidUrl(_)
            | TrackerError::UnsupportedProtocol(_)
            | TrackerError::MissingPort(_)
            | TrackerError::InvalidPort(_)
            | TrackerError::CredentialsInUrl(_)
            | TrackerError::UnsupportedPath(_) => ErrorKind::Parse,
            TrackerError::ResponseTooLarge(_)
            | TrackerError::BadStatus(_)
            | TrackerError::InvalidScrapeResponse(_)
            | TrackerError::TrackerFailure(_)
            | TrackerError::BadConnectResponse(_)
            | TrackerError::BadScrapeResponse(_)
            | TrackerError::NoTrackersAvailable => ErrorKind::Protocol,
        }
    }
}
