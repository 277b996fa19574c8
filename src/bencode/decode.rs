use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use bytes::Bytes;

use super::error::BencodeError;
use super::value::Value;
use crate::constants::{MAX_BENCODE_DEPTH, MAX_NUMBER_TEXT_LEN, MAX_STREAM_STRING_LEN};

/// Decodes a complete bencoded buffer.
///
/// The buffer must hold exactly one value; anything after it is reported as
/// [`BencodeError::TrailingData`]. Use [`decode_prefix`] to decode a value
/// embedded in a larger buffer.
///
/// # Examples
///
/// ```
/// use rscrape::bencode::{decode, Value};
///
/// let value = decode(b"l4:spame").unwrap();
/// assert_eq!(value, Value::List(vec![Value::string("spam")]));
/// assert!(decode(b"i42eextra").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let (value, consumed) = decode_prefix(data)?;

    if consumed != data.len() {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}

/// Decodes the value at the start of `data` and returns it along with the
/// number of bytes it occupied.
///
/// ```
/// use rscrape::bencode::decode_prefix;
///
/// let (value, consumed) = decode_prefix(b"i42etail").unwrap();
/// assert_eq!(value.as_integer(), Some(42));
/// assert_eq!(consumed, 4);
/// ```
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    if data.len() < 2 {
        return Err(BencodeError::Truncated(data.len()));
    }

    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;
    Ok((value, pos))
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    if depth > MAX_BENCODE_DEPTH {
        return Err(BencodeError::NestingTooDeep);
    }

    let Some(&tag) = data.get(*pos) else {
        return Err(BencodeError::Truncated(0));
    };

    match tag {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_bytes(data, pos),
        c => Err(BencodeError::UnrecognizedTag(c)),
    }
}

fn scan_digits(data: &[u8], pos: &mut usize) {
    while *pos < data.len() && data[*pos].is_ascii_digit() {
        *pos += 1;
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    *pos += 1;

    let start = *pos;
    if *pos < data.len() && data[*pos] == b'-' {
        *pos += 1;
    }
    scan_digits(data, pos);

    if *pos >= data.len() || data[*pos] != b'e' {
        return Err(BencodeError::MalformedInteger("expected 'e' terminator".into()));
    }

    let value = parse_integer(&data[start..*pos])?;
    *pos += 1;
    Ok(Value::Integer(value))
}

/// Error text for a digit run, cut short so a hostile run stays out of the message.
fn shown(text: &[u8]) -> String {
    if text.len() > MAX_NUMBER_TEXT_LEN {
        format!("{}...", String::from_utf8_lossy(&text[..MAX_NUMBER_TEXT_LEN]))
    } else {
        String::from_utf8_lossy(text).into_owned()
    }
}

/// Parses `-?[0-9]+` in canonical form (no leading zeros, no `-0`).
fn parse_integer(text: &[u8]) -> Result<i64, BencodeError> {
    let digits = text.strip_prefix(b"-").unwrap_or(text);
    let shown = shown(text);

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(BencodeError::MalformedInteger(format!("no digits in {shown:?}")));
    }

    if (digits[0] == b'0' && digits.len() > 1) || (digits == b"0" && text.len() > 1) {
        return Err(BencodeError::MalformedInteger(format!("non-canonical {shown}")));
    }

    // Digits are ASCII, so the slice is valid UTF-8.
    std::str::from_utf8(text)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| BencodeError::MalformedInteger(format!("{shown} out of range")))
}

fn parse_length(text: &[u8]) -> Result<usize, BencodeError> {
    let shown = shown(text);

    if text.len() > 1 && text[0] == b'0' {
        return Err(BencodeError::InvalidLength(format!("non-canonical {shown}")));
    }

    std::str::from_utf8(text)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| BencodeError::InvalidLength(format!("{shown:?}")))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    let start = *pos;
    scan_digits(data, pos);

    if *pos >= data.len() || data[*pos] != b':' {
        return Err(BencodeError::InvalidLength("expected ':' after length".into()));
    }

    let len = parse_length(&data[start..*pos])?;
    *pos += 1;

    let available = data.len() - *pos;
    if len > available {
        return Err(BencodeError::InvalidLength(format!(
            "declared {len} bytes, {available} available"
        )));
    }

    let bytes = Bytes::copy_from_slice(&data[*pos..*pos + len]);
    *pos += len;

    Ok(Value::Bytes(bytes))
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut list = Vec::new();

    loop {
        match data.get(*pos) {
            None => return Err(BencodeError::UnterminatedList),
            Some(b'e') => break,
            Some(_) => list.push(decode_value(data, pos, depth + 1)?),
        }
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    *pos += 1;
    let mut dict = Vec::new();

    loop {
        match data.get(*pos) {
            None => return Err(BencodeError::UnterminatedDictionary),
            Some(b'e') => break,
            Some(_) => {}
        }

        let key = decode_value(data, pos, depth + 1)?;
        if *pos >= data.len() {
            return Err(BencodeError::UnterminatedDictionary);
        }
        let value = decode_value(data, pos, depth + 1)?;
        dict.push((key, value));
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}

/// Decodes exactly one value from a buffered reader.
///
/// Bytes are consumed only as far as the end of the value; whatever follows
/// stays in the reader. Strings longer than 1 MiB are rejected before any
/// allocation is made for them.
///
/// ```
/// use std::io::{BufRead, Cursor};
/// use rscrape::bencode::decode_reader;
///
/// let mut input = Cursor::new(b"i7ei8e".to_vec());
/// assert_eq!(decode_reader(&mut input).unwrap().as_integer(), Some(7));
/// assert_eq!(input.fill_buf().unwrap(), b"i8e");
/// ```
pub fn decode_reader<R: BufRead>(reader: &mut R) -> Result<Value, BencodeError> {
    read_value(reader, 0)
}

/// Opens `path` and decodes the value at its start.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Value, BencodeError> {
    let mut reader = BufReader::new(File::open(path)?);
    decode_reader(&mut reader)
}

fn peek<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

/// Appends the digit run at the reader's position to `out`. Returns `false`
/// without consuming further once `out` would exceed [`MAX_NUMBER_TEXT_LEN`].
fn read_digits<R: BufRead>(reader: &mut R, out: &mut Vec<u8>) -> io::Result<bool> {
    while let Some(b) = peek(reader)? {
        if !b.is_ascii_digit() {
            break;
        }
        if out.len() == MAX_NUMBER_TEXT_LEN {
            return Ok(false);
        }
        out.push(b);
        reader.consume(1);
    }
    Ok(true)
}

fn read_value<R: BufRead>(reader: &mut R, depth: usize) -> Result<Value, BencodeError> {
    if depth > MAX_BENCODE_DEPTH {
        return Err(BencodeError::NestingTooDeep);
    }

    let tag = peek(reader)?.ok_or(BencodeError::Truncated(0))?;

    match tag {
        b'i' => {
            reader.consume(1);
            let mut text = Vec::new();
            if peek(reader)? == Some(b'-') {
                text.push(b'-');
                reader.consume(1);
            }
            if !read_digits(reader, &mut text)? {
                return Err(BencodeError::MalformedInteger(format!(
                    "{}... out of range",
                    shown(&text)
                )));
            }
            if peek(reader)? != Some(b'e') {
                return Err(BencodeError::MalformedInteger("expected 'e' terminator".into()));
            }
            reader.consume(1);
            Ok(Value::Integer(parse_integer(&text)?))
        }
        b'l' => {
            reader.consume(1);
            let mut list = Vec::new();
            loop {
                match peek(reader)? {
                    None => return Err(BencodeError::UnterminatedList),
                    Some(b'e') => break,
                    Some(_) => list.push(read_value(reader, depth + 1)?),
                }
            }
            reader.consume(1);
            Ok(Value::List(list))
        }
        b'd' => {
            reader.consume(1);
            let mut dict = Vec::new();
            loop {
                match peek(reader)? {
                    None => return Err(BencodeError::UnterminatedDictionary),
                    Some(b'e') => break,
                    Some(_) => {}
                }
                let key = read_value(reader, depth + 1)?;
                if peek(reader)?.is_none() {
                    return Err(BencodeError::UnterminatedDictionary);
                }
                let value = read_value(reader, depth + 1)?;
                dict.push((key, value));
            }
            reader.consume(1);
            Ok(Value::Dict(dict))
        }
        b'0'..=b'9' => {
            let mut text = Vec::new();
            if !read_digits(reader, &mut text)? {
                return Err(BencodeError::InvalidLength(format!(
                    "{}... out of range",
                    shown(&text)
                )));
            }
            if peek(reader)? != Some(b':') {
                return Err(BencodeError::InvalidLength("expected ':' after length".into()));
            }
            reader.consume(1);

            let len = parse_length(&text)?;
            if len > MAX_STREAM_STRING_LEN {
                return Err(BencodeError::InvalidLength(format!(
                    "{len} bytes exceeds limit of {MAX_STREAM_STRING_LEN}"
                )));
            }

            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf).map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => {
                    BencodeError::InvalidLength(format!("declared {len} bytes, stream ended"))
                }
                _ => BencodeError::Io(e),
            })?;
            Ok(Value::Bytes(Bytes::from(buf)))
        }
        c => Err(BencodeError::UnrecognizedTag(c)),
    }
}
