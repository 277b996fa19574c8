//! Torrent documents, info hashes and magnet links ([BEP-3], [BEP-9], [BEP-12]).
//!
//! A `.torrent` file is a bencoded dictionary. The scrape path needs only
//! three things from it:
//!
//! - **info** - hashed as stored to produce the [`InfoHash`]
//! - **announce** - primary tracker URL
//! - **announce-list** - tiers of mirror tracker URLs (BEP-12)
//!
//! [`Torrent`] exposes these plus the descriptive fields shown in reports,
//! and [`Torrent::validate`] checks the structure a well-formed file has.
//! [`MagnetLink`] extracts the info hash and trackers from a magnet URI.
//!
//! # Examples
//!
//! ```
//! use rscrape::bencode::decode;
//! use rscrape::metainfo::{InfoHash, Torrent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = decode(b"d4:infod4:name1:aee")?;
//! let torrent = Torrent::new(&root)?;
//! let hash: InfoHash = torrent.info_hash()?;
//! assert_eq!(hash, InfoHash::of(torrent.info().unwrap()));
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-9]: http://bittorrent.org/beps/bep_0009.html
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod error;
mod info_hash;
mod magnet;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::{info_hash, InfoHash};
pub use magnet::{is_magnet_uri, MagnetLink};
pub use torrent::{FileEntry, Torrent};
