use std::io::{BufRead, Cursor};

use bytes::Bytes;
use proptest::prelude::*;
use tempfile::TempDir;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(
        decode(b"i9223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(decode(b"i e"), Err(BencodeError::MalformedInteger(_))));
    assert!(matches!(decode(b"ie"), Err(BencodeError::MalformedInteger(_))));
    assert!(matches!(decode(b"i-e"), Err(BencodeError::MalformedInteger(_))));
    assert!(matches!(decode(b"i12"), Err(BencodeError::MalformedInteger(_))));
    assert!(matches!(decode(b"i-0e"), Err(BencodeError::MalformedInteger(_))));
    assert!(matches!(decode(b"i03e"), Err(BencodeError::MalformedInteger(_))));
    assert!(matches!(
        decode(b"i9223372036854775808e"),
        Err(BencodeError::MalformedInteger(_))
    ));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(
        decode(b"4:spam").unwrap(),
        Value::Bytes(Bytes::from_static(b"spam"))
    );
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(Bytes::from_static(b"")));
    assert_eq!(
        decode(b"3:\x00\xff\x80").unwrap(),
        Value::Bytes(Bytes::from_static(b"\x00\xff\x80"))
    );
}

#[test]
fn test_decode_bytes_invalid() {
    assert!(matches!(decode(b"4:abc"), Err(BencodeError::InvalidLength(_))));
    assert!(matches!(decode(b"04:spam"), Err(BencodeError::InvalidLength(_))));
    assert!(matches!(decode(b"4spam"), Err(BencodeError::InvalidLength(_))));
    assert!(matches!(
        decode(b"99999999999999999999999:x"),
        Err(BencodeError::InvalidLength(_))
    ));
}

#[test]
fn test_decode_too_short() {
    assert!(matches!(decode(b""), Err(BencodeError::Truncated(0))));
    assert!(matches!(decode(b"i"), Err(BencodeError::Truncated(1))));
    assert!(matches!(decode(b"5"), Err(BencodeError::Truncated(1))));
}

#[test]
fn test_decode_unrecognized_tag() {
    assert!(matches!(decode(b"x1e"), Err(BencodeError::UnrecognizedTag(b'x'))));
    assert!(matches!(decode(b"-1:a"), Err(BencodeError::UnrecognizedTag(b'-'))));
    assert!(matches!(decode(b"ee"), Err(BencodeError::UnrecognizedTag(b'e'))));
}

#[test]
fn test_decode_list() {
    assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
    assert_eq!(
        decode(b"l4:spame").unwrap(),
        Value::List(vec![Value::string("spam")])
    );

    let result = decode(b"l4:spami42ee").unwrap();
    let list = result.as_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], Value::Bytes(Bytes::from_static(b"spam")));
    assert_eq!(list[1], Value::Integer(42));
}

#[test]
fn test_decode_unterminated() {
    assert!(matches!(decode(b"li1e"), Err(BencodeError::UnterminatedList)));
    assert!(matches!(decode(b"l4:spam"), Err(BencodeError::UnterminatedList)));
    assert!(matches!(decode(b"d3:cow3:moo"), Err(BencodeError::UnterminatedDictionary)));
    assert!(matches!(decode(b"d3:cow"), Err(BencodeError::UnterminatedDictionary)));
}

#[test]
fn test_decode_dict() {
    assert_eq!(decode(b"de").unwrap(), Value::Dict(vec![]));

    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let dict = result.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict[0].0, Value::string("cow"));
    assert_eq!(result.get(b"cow"), Some(&Value::string("moo")));
    assert_eq!(result.get(b"spam"), Some(&Value::string("eggs")));
}

#[test]
fn test_decode_dict_keeps_stored_order() {
    let data = b"d4:spam4:eggs3:cow3:mooe";
    let value = decode(data).unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict[0].0, Value::string("spam"));
    assert_eq!(dict[1].0, Value::string("cow"));
    assert_eq!(encode(&value), data);
}

#[test]
fn test_lookup_first_match_wins() {
    let value = decode(b"d1:ai1e1:ai2ei3e1:be").unwrap();
    assert_eq!(value.get(b"a"), Some(&Value::Integer(1)));
    // the non-string key i3e is skipped by lookup
    assert_eq!(lookup(&value, b"3"), None);
    assert_eq!(value.get(b"A"), None);
    assert_eq!(Value::Integer(1).get(b"a"), None);
}

#[test]
fn test_decode_prefix_reports_consumed() {
    let (value, consumed) = decode_prefix(b"l4:spamei1e").unwrap();
    assert_eq!(value, Value::List(vec![Value::string("spam")]));
    assert_eq!(consumed, 8);
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(decode(b"i42eextra"), Err(BencodeError::TrailingData)));
}

#[test]
fn test_nesting_too_deep() {
    let mut data = vec![b'l'; 200];
    data.extend(vec![b'e'; 200]);
    assert!(matches!(decode(&data), Err(BencodeError::NestingTooDeep)));

    let mut reader = Cursor::new(data);
    assert!(matches!(
        decode_reader(&mut reader),
        Err(BencodeError::NestingTooDeep)
    ));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
}

#[test]
fn test_encode_dict() {
    let value = Value::dict([("cow", Value::string("moo"))]);
    assert_eq!(encode(&value), b"d3:cow3:mooe");
}

#[test]
fn test_encode_to_writer() {
    let value = decode(b"d4:listl4:spami42eee").unwrap();
    let mut out = Vec::new();
    encode_to(&value, &mut out).unwrap();
    assert_eq!(out, b"d4:listl4:spami42eee");
}

#[test]
fn test_known_vector_roundtrip() {
    let original = b"d3:cow3:moo4:spam4:eggse";
    let decoded = decode(original).unwrap();
    assert_eq!(
        decoded,
        Value::dict([("cow", Value::string("moo")), ("spam", Value::string("eggs"))])
    );
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_reader_stops_after_value() {
    let mut reader = Cursor::new(b"d3:cow3:mooe4:rest".to_vec());
    let value = decode_reader(&mut reader).unwrap();
    assert_eq!(value.get(b"cow"), Some(&Value::string("moo")));
    assert_eq!(reader.fill_buf().unwrap(), b"4:rest");
}

fn reader_err(input: &[u8]) -> BencodeError {
    decode_reader(&mut Cursor::new(input.to_vec())).unwrap_err()
}

#[test]
fn test_reader_errors() {
    assert!(matches!(reader_err(b""), BencodeError::Truncated(0)));
    assert!(matches!(reader_err(b"i e"), BencodeError::MalformedInteger(_)));
    assert!(matches!(reader_err(b"i-0e"), BencodeError::MalformedInteger(_)));
    assert!(matches!(reader_err(b"li1e"), BencodeError::UnterminatedList));
    assert!(matches!(reader_err(b"d1:a"), BencodeError::UnterminatedDictionary));
    assert!(matches!(reader_err(b"4:abc"), BencodeError::InvalidLength(_)));
    assert!(matches!(reader_err(b"?"), BencodeError::UnrecognizedTag(b'?')));
}

#[test]
fn test_reader_rejects_long_digit_runs() {
    let mut input = b"i".to_vec();
    input.extend(std::iter::repeat(b'1').take(1 << 20));
    input.push(b'e');
    let mut reader = Cursor::new(input);
    match decode_reader(&mut reader) {
        Err(BencodeError::MalformedInteger(msg)) => assert!(msg.len() < 64, "{msg}"),
        other => panic!("expected MalformedInteger, got {other:?}"),
    }
    assert!(reader.position() < 64);

    let mut input = vec![b'9'; 1 << 20];
    input.push(b':');
    let mut reader = Cursor::new(input);
    assert!(matches!(
        decode_reader(&mut reader),
        Err(BencodeError::InvalidLength(msg)) if msg.len() < 64
    ));
    assert!(reader.position() < 64);

    let widest = format!("i{}e", i64::MIN);
    let mut reader = Cursor::new(widest.into_bytes());
    assert_eq!(decode_reader(&mut reader).unwrap(), Value::Integer(i64::MIN));
}

#[test]
fn test_long_digit_runs_in_buffer_errors() {
    let mut input = vec![b'1'; 4096];
    input.push(b':');
    match decode(&input) {
        Err(BencodeError::InvalidLength(msg)) => assert!(msg.len() < 64, "{msg}"),
        other => panic!("expected InvalidLength, got {other:?}"),
    }
}

#[test]
fn test_decoders_agree_on_short_tails() {
    for input in [&b"d1:ae"[..], b"l4:spami", b"li1e5", b"d1:a1"] {
        let buffered = decode(input).unwrap_err().to_string();
        let streamed = reader_err(input).to_string();
        assert_eq!(buffered, streamed, "{:?}", String::from_utf8_lossy(input));
    }
    assert!(matches!(decode(b"d1:ae"), Err(BencodeError::UnrecognizedTag(b'e'))));
    assert!(matches!(decode(b"l4:spami"), Err(BencodeError::MalformedInteger(_))));
}

#[test]
fn test_reader_string_limit() {
    let mut reader = Cursor::new(b"1048577:".to_vec());
    assert!(matches!(
        decode_reader(&mut reader),
        Err(BencodeError::InvalidLength(_))
    ));
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), "integer");

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert!(!value.is_dict());
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..24).prop_map(|b| Value::Bytes(Bytes::from(b))),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            proptest::collection::vec((inner.clone(), inner), 0..6).prop_map(Value::Dict),
        ]
    })
}

#[test]
fn test_decode_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sample.torrent");
    std::fs::write(&path, b"d3:cow3:moo4:spam4:eggse").unwrap();

    let value = decode_file(&path).unwrap();
    assert_eq!(value.get(b"spam").and_then(Value::as_str), Some("eggs"));

    let missing = decode_file(temp.path().join("missing.torrent"));
    assert!(matches!(missing, Err(BencodeError::Io(_))));
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(value in arb_value()) {
        let bytes = encode(&value);
        prop_assert_eq!(decode(&bytes).unwrap(), value.clone());
        prop_assert_eq!(decode_reader(&mut Cursor::new(bytes)).unwrap(), value);
    }

    #[test]
    fn prop_reencode_is_identity(value in arb_value()) {
        let bytes = encode(&value);
        prop_assert_eq!(encode(&decode(&bytes).unwrap()), bytes);
    }
}
