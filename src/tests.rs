use std::collections::BTreeMap;

use bytes::Bytes;

use super::*;

/// Encodes, checks the exact wire bytes, then decodes back and compares.
fn verify(value: &Value, expected: &[u8]) {
    let encoded = encode(value);
    assert_eq!(encoded, expected);
    assert_eq!(&decode(&encoded).unwrap(), value);
}

fn decode_err(input: &[u8]) -> DecodeError {
    decode(input).unwrap_err()
}

#[test]
fn test_integer_fixtures() {
    verify(&Value::Integer(1234), b"i1234e");
    verify(&Value::Integer(-1234), b"i-1234e");
    verify(&Value::Integer(0), b"i0e");
    verify(&Value::Integer(i64::MAX), b"i9223372036854775807e");
    verify(&Value::Integer(i64::MIN), b"i-9223372036854775808e");
}

#[test]
fn test_string_fixtures() {
    verify(&Value::string("foobar"), b"6:foobar");
    verify(&Value::string(""), b"0:");
    // Strings are raw bytes, not text
    verify(&Value::String(Bytes::from_static(b"\x00\xff\x7f")), b"3:\x00\xff\x7f");
}

#[test]
fn test_boolean_fixtures() {
    verify(&Value::Boolean(true), b"b1");
    verify(&Value::Boolean(false), b"b0");
}

#[test]
fn test_array_fixture() {
    let mut arr = Value::array();
    arr.append("foo").unwrap();
    arr.append(1234i64).unwrap();
    arr.append(true).unwrap();
    verify(&arr, b"l3:fooi1234eb1e");

    verify(&Value::array(), b"le");
}

#[test]
fn test_dict_fixture() {
    let mut arr = Value::array();
    arr.append("foo").unwrap();
    arr.append(1234i64).unwrap();
    arr.append(true).unwrap();

    let mut dict = Value::dict();
    dict.set("bar", arr).unwrap();
    dict.set("foo", "test").unwrap();
    verify(&dict, b"d3:barl3:fooi1234eb1e3:foo4:teste");

    verify(&Value::dict(), b"de");
}

#[test]
fn test_dict_key_order_is_canonical() {
    // Insertion order does not matter; output is always key-sorted.
    let mut forward = Value::dict();
    forward.set("a", 1i64).unwrap();
    forward.set("b", 2i64).unwrap();
    forward.set("c", 3i64).unwrap();

    let mut backward = Value::dict();
    backward.set("c", 3i64).unwrap();
    backward.set("b", 2i64).unwrap();
    backward.set("a", 1i64).unwrap();

    assert_eq!(forward, backward);
    assert_eq!(encode(&forward), encode(&backward));
    assert_eq!(encode(&forward), b"d1:ai1e1:bi2e1:ci3ee");
}

#[test]
fn test_roundtrip() {
    // Keys already sorted, so decode/encode reproduces the exact input.
    let original: &[u8] =
        b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_nested_structures() {
    let data: &[u8] = b"d4:listl4:spami42eb0e4:nestd1:xleee";
    let decoded = decode(data).unwrap();
    assert_eq!(encode(&decoded), data);

    let list = decoded.get(b"list").unwrap().as_array().unwrap();
    assert_eq!(list[0].as_str(), Some("spam"));
    assert_eq!(list[1].as_integer(), Ok(42));
    assert_eq!(list[2].as_boolean(), Ok(false));
}

#[test]
fn test_decode_error_diagnostics() {
    assert_eq!(decode_err(b"i1234").to_string(), "Expected 'e'");
    assert_eq!(decode_err(b"dx").to_string(), "Expected a digit");
    assert_eq!(decode_err(b"d-5").to_string(), "Expected a digit");
    assert_eq!(decode_err(b"d123").to_string(), "Expected ':'");
    assert_eq!(decode_err(b"i").to_string(), "Unexpected end of input");
    assert_eq!(decode_err(b"i 1e").to_string(), "Expected a digit or '-'");
    assert_eq!(
        decode_err(b"i1111111111111111111111e").to_string(),
        "Invalid integer"
    );
    assert_eq!(decode_err(b"i- 1e").to_string(), "Invalid integer");
    assert_eq!(decode_err(b"i-0e").to_string(), "Zero with a minus sign");
    assert_eq!(decode_err(b"i05e").to_string(), "Integer has leading zeroes");
    assert_eq!(
        decode_err(b"06:foobar").to_string(),
        "String length has leading zeroes"
    );
    assert_eq!(decode_err(b"123").to_string(), "Expected ':'");
    assert_eq!(decode_err(b"5:foo").to_string(), "Unexpected end of input");
    assert_eq!(decode_err(b"l").to_string(), "Unexpected end of input");
}

#[test]
fn test_decode_error_variants() {
    assert_eq!(decode_err(b""), DecodeError::UnexpectedEof);
    assert_eq!(decode_err(b"ie"), DecodeError::ExpectedDigitOrMinus);
    assert_eq!(decode_err(b"i-e"), DecodeError::InvalidInteger);
    assert_eq!(decode_err(b"i00e"), DecodeError::IntegerLeadingZeroes);
    assert_eq!(decode_err(b"i-05e"), DecodeError::IntegerLeadingZeroes);
    assert_eq!(decode_err(b"x"), DecodeError::UnknownCharacter);
    assert_eq!(decode_err(b"d"), DecodeError::UnexpectedEof);
    assert_eq!(decode_err(b"d3:foo"), DecodeError::UnexpectedEof);
    assert_eq!(decode_err(b"li1e"), DecodeError::UnexpectedEof);
    assert_eq!(decode_err(b"b"), DecodeError::UnexpectedEof);
    assert_eq!(decode_err(b"bx"), DecodeError::ExpectedBoolean);
    assert_eq!(decode_err(b"b2"), DecodeError::ExpectedBoolean);
}

#[test]
fn test_string_length_past_end_of_input() {
    // A declared length beyond the remaining bytes is not a truncated read.
    assert_eq!(decode_err(b"10:foo"), DecodeError::UnexpectedEof);
    assert_eq!(
        decode_err(b"99999999999999999999999:x"),
        DecodeError::InvalidStringLength
    );
}

#[test]
fn test_whole_input_strictness() {
    let input = b"i1234ex";
    assert_eq!(decode_err(input), DecodeError::TrailingData);
    assert_eq!(decode_err(input).to_string(), "Left over data in input");

    let (value, consumed) = decode_prefix(input).unwrap();
    assert_eq!(value, Value::Integer(1234));
    assert_eq!(consumed, 6);
    assert_eq!(&input[consumed..], b"x");
}

#[test]
fn test_decode_prefix_consumes_nested_value() {
    let input = b"d1:al3:fooi1eee2:xx";
    let (value, consumed) = decode_prefix(input).unwrap();
    assert_eq!(consumed, 15);
    assert_eq!(&input[consumed..], b"2:xx");

    let inner = value.get(b"a").unwrap().as_array().unwrap();
    assert_eq!(inner.len(), 2);
}

#[test]
fn test_duplicate_key_asymmetry() {
    // Untrusted input with a repeated key is rejected outright...
    assert_eq!(
        decode_err(b"d3:fooi1e3:fooi2ee"),
        DecodeError::DuplicateKey
    );

    // ...but programmatic insertion overwrites, last write wins.
    let mut dict = Value::dict();
    dict.set("foo", 1i64).unwrap();
    dict.set("foo", 2i64).unwrap();
    assert_eq!(dict.get(b"foo").unwrap().as_integer(), Ok(2));
    assert_eq!(dict.as_dict().unwrap().len(), 1);
}

#[test]
fn test_dict_keys_must_be_strings() {
    // A non-string where a key is expected is the same error class as a
    // malformed top-level string.
    assert_eq!(decode_err(b"di1ei2ee"), DecodeError::ExpectedDigit);
    assert_eq!(decode_err(b"dlei2ee"), DecodeError::ExpectedDigit);
}

#[test]
fn test_absent_key_yields_undefined() {
    let value = decode(b"d3:bari123ee").unwrap();

    let absent = value.get(b"foo").unwrap();
    assert_eq!(absent, &Value::Undefined);
    assert_eq!(absent.kind(), Kind::Undefined);
    assert_eq!(
        absent.as_integer().unwrap_err().to_string(),
        "Expected type integer, but got undefined"
    );
}

#[test]
fn test_wrong_kind_accessor_names_both_kinds() {
    let value = decode(b"d3:bari123e3:foob1e").unwrap();

    let err = value.get(b"foo").unwrap().as_integer().unwrap_err();
    assert_eq!(err.to_string(), "Expected type integer, but got boolean");
    assert_eq!(
        err,
        TypeError::Mismatch {
            expected: Kind::Integer,
            actual: Kind::Boolean,
        }
    );

    assert_eq!(
        value.get(b"bar").unwrap().as_string().unwrap_err().to_string(),
        "Expected type string, but got integer"
    );
    assert_eq!(
        Value::Integer(1).as_dict().unwrap_err().to_string(),
        "Expected type dictionary, but got integer"
    );
    assert_eq!(
        Value::string("x").as_array().unwrap_err().to_string(),
        "Expected type array, but got string"
    );
}

#[test]
fn test_mutators_require_matching_kind() {
    let mut value = Value::Integer(1);
    assert!(value.set("key", 1i64).is_err());
    assert!(value.append(1i64).is_err());
    assert!(value.get(b"key").is_err());

    assert_eq!(
        Value::Integer(1).get(b"key").unwrap_err().to_string(),
        "Expected type dictionary, but got integer"
    );
}

#[test]
fn test_narrow_integer() {
    let value = Value::Integer(300);
    assert_eq!(value.narrow_integer::<i64>(), Ok(300));
    assert_eq!(value.narrow_integer::<u16>(), Ok(300));
    assert_eq!(value.narrow_integer::<u8>(), Err(TypeError::IntegerOutOfRange));

    let negative = Value::Integer(-1);
    assert_eq!(negative.narrow_integer::<i32>(), Ok(-1));
    assert_eq!(
        negative.narrow_integer::<u64>(),
        Err(TypeError::IntegerOutOfRange)
    );

    // Narrowing a non-integer is a kind mismatch, not a range failure.
    assert_eq!(
        Value::string("x").narrow_integer::<u8>(),
        Err(TypeError::Mismatch {
            expected: Kind::Integer,
            actual: Kind::String,
        })
    );
}

#[test]
fn test_structural_equality() {
    assert_eq!(Value::Undefined, Value::Undefined);
    assert_ne!(Value::Undefined, Value::Integer(0));
    assert_ne!(Value::Boolean(false), Value::Integer(0));
    assert_ne!(Value::string("1"), Value::Integer(1));

    let a = decode(b"d1:xl1:ai1eee").unwrap();
    let b = decode(b"d1:xl1:ai1eee").unwrap();
    let c = decode(b"d1:xl1:ai2eee").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_deep_copy_is_independent() {
    let mut original = Value::dict();
    original.set("key", "value").unwrap();

    let mut copy = original.clone();
    copy.set("key", "changed").unwrap();

    assert_eq!(original.get(b"key").unwrap().as_str(), Some("value"));
    assert_eq!(copy.get(b"key").unwrap().as_str(), Some("changed"));
}

#[test]
fn test_nesting_depth_guard() {
    let mut input = Vec::new();
    input.extend(std::iter::repeat(b'l').take(100));
    input.extend_from_slice(b"i1e");
    input.extend(std::iter::repeat(b'e').take(100));
    assert_eq!(decode(&input), Err(DecodeError::NestingTooDeep));

    // Well under the limit decodes fine.
    let mut input = Vec::new();
    input.extend(std::iter::repeat(b'l').take(20));
    input.extend_from_slice(b"i1e");
    input.extend(std::iter::repeat(b'e').take(20));
    assert!(decode(&input).is_ok());
}

#[test]
#[should_panic(expected = "undefined value")]
fn test_encode_undefined_panics() {
    encode(&Value::Undefined);
}

#[test]
fn test_encode_to_writer() {
    let mut arr = Value::array();
    arr.append("foo").unwrap();
    arr.append(1234i64).unwrap();

    let mut out = Vec::new();
    encode_to(&arr, &mut out).unwrap();
    assert_eq!(out, b"l3:fooi1234ee");
}

#[test]
fn test_default_and_from_impls() {
    assert_eq!(Value::default(), Value::Undefined);

    assert_eq!(Value::from(42i64), Value::Integer(42));
    assert_eq!(Value::from(true), Value::Boolean(true));
    assert_eq!(Value::from("spam"), Value::string("spam"));
    assert_eq!(Value::from(String::from("spam")), Value::string("spam"));
    assert_eq!(
        Value::from(Bytes::from_static(b"spam")),
        Value::string("spam")
    );
    assert_eq!(Value::from(Vec::new()), Value::array());
    assert_eq!(Value::from(BTreeMap::new()), Value::dict());
}

#[test]
fn test_accessor_conveniences() {
    let value = decode(b"d3:raw3:\xff\x00\xff3:txt4:spame").unwrap();

    assert_eq!(value.get(b"txt").unwrap().as_str(), Some("spam"));
    // Not UTF-8, so the str view is unavailable while the byte view works.
    assert_eq!(value.get(b"raw").unwrap().as_str(), None);
    assert_eq!(
        value.get(b"raw").unwrap().as_string().unwrap().as_ref(),
        b"\xff\x00\xff"
    );

    let dict = value.into_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert!(Value::Integer(1).into_dict().is_err());
    assert!(Value::Integer(1).into_array().is_err());
}

#[test]
fn test_mutable_container_access() {
    let mut value = decode(b"l1:ae").unwrap();
    value.as_array_mut().unwrap().push(Value::Integer(2));
    assert_eq!(encode(&value), b"l1:ai2ee");

    let mut value = decode(b"d1:ai1ee").unwrap();
    value
        .as_dict_mut()
        .unwrap()
        .insert(Bytes::from_static(b"b"), Value::Integer(2));
    assert_eq!(encode(&value), b"d1:ai1e1:bi2ee");
}
