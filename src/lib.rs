//! rscrape - BitTorrent metainfo inspection and tracker scraping
//!
//! Decodes bencoded torrent documents, computes their info hash, and asks
//! HTTP and UDP trackers how many peers are seeding and leeching.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode decoding and canonical encoding
//! - [`metainfo`] - Torrent documents, info hashes, magnet links
//! - [`tracker`] - BEP-15/48 HTTP and UDP scrape clients and the multi-tracker orchestrator
//! - [`report`] - Human-readable torrent reports

pub mod bencode;
pub mod config;
pub mod constants;
pub mod metainfo;
pub mod report;
pub mod tracker;

pub use bencode::{decode, decode_reader, encode, lookup, BencodeError, Value};
pub use config::ScrapeConfig;
pub use metainfo::{info_hash, InfoHash, MagnetLink, MetainfoError, Torrent};
pub use tracker::{scrape, scrape_torrent, ErrorKind, ScrapeResult, TrackerError};
