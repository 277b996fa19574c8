//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Only canonical forms are accepted: integers and string lengths may not
//! carry leading zeros and `i-0e` is rejected. Together with dictionaries
//! keeping their stored order, this makes decoding followed by [`encode`]
//! byte-identical for every accepted input, which is what keeps info hashes
//! stable.
//!
//! # Examples
//!
//! ```
//! use rscrape::bencode::{decode, encode, Value};
//!
//! let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
//! assert_eq!(value.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
//! assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
//!
//! let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
//! assert_eq!(encode(&list), b"li1ei2ee");
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::Truncated`] - Input shorter than two bytes, or empty where a value should start
//! - [`BencodeError::MalformedInteger`] - No digits, missing `e`, overflow, leading zeros
//! - [`BencodeError::UnterminatedList`] / [`BencodeError::UnterminatedDictionary`]
//! - [`BencodeError::InvalidLength`] - Bad string length or not enough bytes
//! - [`BencodeError::UnrecognizedTag`] - Unknown lead byte
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (64 levels)
//! - [`BencodeError::TrailingData`] - Extra data after the value ([`decode`] only)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_file, decode_prefix, decode_reader};
pub use encode::{encode, encode_to};
pub(crate) use encode::encode_into;
pub use error::BencodeError;
pub use value::{lookup, Value};

#[cfg(test)]
mod tests;
