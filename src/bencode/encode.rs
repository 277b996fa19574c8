use std::io::{self, Write};

use sha1::{Digest, Sha1};

use super::value::Value;

/// Destination for canonical bencode bytes.
pub(crate) trait Sink {
    fn put(&mut self, bytes: &[u8]);
}

impl Sink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl Sink for Sha1 {
    fn put(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

struct IoSink<'a, W: Write> {
    writer: &'a mut W,
    error: Option<io::Error>,
}

impl<W: Write> Sink for IoSink<'_, W> {
    fn put(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            if let Err(e) = self.writer.write_all(bytes) {
                self.error = Some(e);
            }
        }
    }
}

/// Encodes a bencode value to a byte vector.
///
/// The output is the canonical form of the grammar:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, entries in stored order
///
/// Dictionaries are not re-sorted, so a decoded value re-encodes to exactly
/// the bytes it was decoded from.
///
/// # Examples
///
/// ```
/// use rscrape::bencode::{encode, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(value, &mut buf);
    buf
}

/// Streams the canonical encoding of `value` into `writer`.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> io::Result<()> {
    let mut sink = IoSink {
        writer,
        error: None,
    };
    encode_into(value, &mut sink);
    match sink.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub(crate) fn encode_into<S: Sink>(value: &Value, sink: &mut S) {
    match value {
        Value::Integer(i) => {
            sink.put(b"i");
            sink.put(i.to_string().as_bytes());
            sink.put(b"e");
        }
        Value::Bytes(b) => {
            sink.put(b.len().to_string().as_bytes());
            sink.put(b":");
            sink.put(b);
        }
        Value::List(l) => {
            sink.put(b"l");
            for item in l {
                encode_into(item, sink);
            }
            sink.put(b"e");
        }
        Value::Dict(d) => {
            sink.put(b"d");
            for (key, val) in d {
                encode_into(key, sink);
                encode_into(val, sink);
            }
            sink.put(b"e");
        }
    }
}
