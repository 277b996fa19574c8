//! Protocol constants and limits.
//!
//! Wire values come from [BEP-15] (UDP tracker protocol) and [BEP-48]
//! (tracker scrape); the limits bound memory use against hostile input.
//!
//! [BEP-15]: http://bittorrent.org/beps/bep_0015.html
//! [BEP-48]: http://bittorrent.org/beps/bep_0048.html

// ============================================================================
// Client identification
// ============================================================================

/// User agent string for HTTP scrape requests
pub const USER_AGENT: &str = concat!("rscrape/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Bencode limits
// ============================================================================

/// Maximum container nesting accepted by the decoders
pub const MAX_BENCODE_DEPTH: usize = 64;

/// Largest byte string the stream decoder will allocate (1 MiB)
pub const MAX_STREAM_STRING_LEN: usize = 1024 * 1024;

/// Longest integer or length prefix either decoder reads: a sign plus the
/// 19 digits of `i64::MAX`, or the 20 digits of `u64::MAX`
pub const MAX_NUMBER_TEXT_LEN: usize = 20;

// ============================================================================
// HTTP tracker
// ============================================================================

/// Port used when an `http://` URL names none
pub const DEFAULT_HTTP_PORT: u16 = 80;

/// Port used when an `https://` URL names none
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Upper bound on a buffered scrape response, headers included
pub const MAX_HTTP_RESPONSE_SIZE: usize = 4096;

// ============================================================================
// UDP tracker (BEP-15)
// ============================================================================

/// Magic connection id sent in every connect request
pub const UDP_PROTOCOL_ID: u64 = 0x0000_0417_2710_1980;

pub const UDP_ACTION_CONNECT: u32 = 0;
pub const UDP_ACTION_SCRAPE: u32 = 2;
pub const UDP_ACTION_ERROR: u32 = 3;

/// Receive buffer for a single datagram
pub const UDP_RECV_BUFFER_SIZE: usize = 2048;

// ============================================================================
// Multi-tracker
// ============================================================================

/// Maximum number of announce URLs tried for one torrent
pub const MAX_TRACKER_ATTEMPTS: usize = 64;
