use std::collections::BTreeMap;

use bytes::Bytes;
use tracing::trace;

use crate::error::DecodeError;
use crate::value::Value;

const MAX_DEPTH: usize = 64;

/// Decodes a complete bencode document.
///
/// The whole input must be consumed by the value; anything left over fails
/// with [`DecodeError::TrailingData`]. Use [`decode_prefix`] to read a single
/// value from a longer stream.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first grammar expectation the input
/// violates. No value is produced on failure.
///
/// # Examples
///
/// ```
/// use rbenc::{decode, Value};
///
/// let value = decode(b"l4:spami42ee").unwrap();
/// let list = value.as_array().unwrap();
/// assert_eq!(list[0].as_str(), Some("spam"));
/// assert_eq!(list[1].as_integer(), Ok(42));
///
/// assert!(decode(b"i42etrailing").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    let mut cur = Cursor::new(data);
    let value = decode_value(&mut cur, 0)?;
    if cur.peek().is_some() {
        return Err(DecodeError::TrailingData);
    }
    trace!("decoded {} bytes", data.len());
    Ok(value)
}

/// Decodes exactly one bencode value from the front of the input.
///
/// Returns the value together with the number of bytes it occupied, leaving
/// any remaining bytes untouched for the caller.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first grammar expectation the input
/// violates.
///
/// # Examples
///
/// ```
/// use rbenc::{decode_prefix, Value};
///
/// let (value, consumed) = decode_prefix(b"i1234ex").unwrap();
/// assert_eq!(value, Value::Integer(1234));
/// assert_eq!(consumed, 6);
/// ```
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut cur = Cursor::new(data);
    let value = decode_value(&mut cur, 0)?;
    trace!("decoded value in {} of {} bytes", cur.pos, data.len());
    Ok((value, cur.pos))
}

/// Sequential byte cursor with single-byte lookahead.
///
/// The lead byte alone selects every production, so this is all the parser
/// needs; there is no backtracking.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Cursor { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn next(&mut self) -> Result<u8, DecodeError> {
        let b = self.peek().ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 1;
        Ok(b)
    }

    /// Advances past a byte already seen with [`peek`](Self::peek).
    fn bump(&mut self) {
        self.pos += 1;
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).ok_or(DecodeError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(DecodeError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

fn decode_value(cur: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::NestingTooDeep);
    }

    match cur.peek().ok_or(DecodeError::UnexpectedEof)? {
        b'0'..=b'9' => Ok(Value::String(decode_string(cur)?)),
        b'i' => decode_integer(cur),
        b'b' => {
            if cfg!(feature = "booleans") {
                decode_boolean(cur)
            } else {
                Err(DecodeError::UnknownCharacter)
            }
        }
        b'd' => decode_dict(cur, depth),
        b'l' => decode_array(cur, depth),
        _ => Err(DecodeError::UnknownCharacter),
    }
}

/// The string production: decimal length, `:`, raw bytes.
///
/// Also used directly for dictionary keys, which must be strings.
fn decode_string(cur: &mut Cursor<'_>) -> Result<Bytes, DecodeError> {
    match cur.peek() {
        None => return Err(DecodeError::UnexpectedEof),
        Some(b) if !b.is_ascii_digit() => return Err(DecodeError::ExpectedDigit),
        Some(_) => {}
    }

    let start = cur.pos;
    while matches!(cur.peek(), Some(b) if b.is_ascii_digit()) {
        cur.bump();
    }
    let digits = &cur.data[start..cur.pos];

    if digits.len() > 1 && digits[0] == b'0' {
        return Err(DecodeError::StringLengthLeadingZeroes);
    }
    let len: usize = std::str::from_utf8(digits)
        .map_err(|_| DecodeError::InvalidStringLength)?
        .parse()
        .map_err(|_| DecodeError::InvalidStringLength)?;

    match cur.peek() {
        Some(b':') => cur.bump(),
        _ => return Err(DecodeError::ExpectedColon),
    }

    Ok(Bytes::copy_from_slice(cur.take(len)?))
}

fn decode_integer(cur: &mut Cursor<'_>) -> Result<Value, DecodeError> {
    cur.bump(); // 'i'

    let first = cur.peek().ok_or(DecodeError::UnexpectedEof)?;
    if !first.is_ascii_digit() && first != b'-' {
        return Err(DecodeError::ExpectedDigitOrMinus);
    }

    let start = cur.pos;
    cur.bump(); // sign or first digit
    while matches!(cur.peek(), Some(b) if b.is_ascii_digit()) {
        cur.bump();
    }
    let run = &cur.data[start..cur.pos];

    let digits = if run[0] == b'-' { &run[1..] } else { run };
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(DecodeError::IntegerLeadingZeroes);
    }

    let value: i64 = std::str::from_utf8(run)
        .map_err(|_| DecodeError::InvalidInteger)?
        .parse()
        .map_err(|_| DecodeError::InvalidInteger)?;

    if value == 0 && run[0] == b'-' {
        return Err(DecodeError::NegativeZero);
    }

    match cur.peek() {
        Some(b'e') => cur.bump(),
        _ => return Err(DecodeError::ExpectedEnd),
    }

    Ok(Value::Integer(value))
}

fn decode_boolean(cur: &mut Cursor<'_>) -> Result<Value, DecodeError> {
    cur.bump(); // 'b'

    match cur.next()? {
        b'1' => Ok(Value::Boolean(true)),
        b'0' => Ok(Value::Boolean(false)),
        _ => Err(DecodeError::ExpectedBoolean),
    }
}

fn decode_dict(cur: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    cur.bump(); // 'd'
    let mut dict = BTreeMap::new();

    loop {
        match cur.peek() {
            Some(b'e') => {
                cur.bump();
                break;
            }
            Some(_) => {}
            None => return Err(DecodeError::UnexpectedEof),
        }

        let key = decode_string(cur)?;
        if dict.contains_key(&key) {
            return Err(DecodeError::DuplicateKey);
        }
        let value = decode_value(cur, depth + 1)?;
        dict.insert(key, value);
    }

    Ok(Value::Dict(dict))
}

fn decode_array(cur: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
    cur.bump(); // 'l'
    let mut array = Vec::new();

    loop {
        match cur.peek() {
            Some(b'e') => {
                cur.bump();
                break;
            }
            Some(_) => array.push(decode_value(cur, depth + 1)?),
            None => return Err(DecodeError::UnexpectedEof),
        }
    }

    Ok(Value::Array(array))
}
