use thiserror::Error;

use crate::value::Kind;

/// Errors raised while parsing untrusted input against the bencode grammar.
///
/// Decoding is expected to fail on malformed input, so callers should treat
/// these as ordinary results. The `Display` string of each variant names the
/// exact grammar expectation that was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended at a position where more bytes were required.
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// A string length (or dictionary key) did not start with a digit.
    #[error("Expected a digit")]
    ExpectedDigit,

    /// The first byte of an integer body was neither a digit nor `-`.
    #[error("Expected a digit or '-'")]
    ExpectedDigitOrMinus,

    /// A string length was not followed by `:`.
    #[error("Expected ':'")]
    ExpectedColon,

    /// An integer body was not terminated by `e`.
    #[error("Expected 'e'")]
    ExpectedEnd,

    /// A boolean marker was followed by something other than `0` or `1`.
    #[error("Expected '0' or '1'")]
    ExpectedBoolean,

    /// An integer body could not be parsed as a 64-bit signed integer.
    #[error("Invalid integer")]
    InvalidInteger,

    /// A string length could not be parsed as an unsigned integer.
    #[error("Invalid string length")]
    InvalidStringLength,

    /// An integer carried leading zeroes (only `i0e` encodes zero).
    #[error("Integer has leading zeroes")]
    IntegerLeadingZeroes,

    /// The integer `-0`, which has no valid encoding.
    #[error("Zero with a minus sign")]
    NegativeZero,

    /// A string length carried leading zeroes.
    #[error("String length has leading zeroes")]
    StringLengthLeadingZeroes,

    /// A dictionary contained the same key twice.
    #[error("Duplicate key in dictionary")]
    DuplicateKey,

    /// A byte that does not start any bencode production.
    #[error("Unknown character in input")]
    UnknownCharacter,

    /// Bytes remained after the value in a whole-input decode.
    #[error("Left over data in input")]
    TrailingData,

    /// Structural nesting exceeded the recursion limit.
    #[error("Nesting too deep")]
    NestingTooDeep,
}

/// Errors raised when a [`Value`] is asked to act as a kind it is not.
///
/// Unlike [`DecodeError`], a `TypeError` signals a logic error in the caller:
/// a schema assumption about already-decoded data did not hold.
///
/// [`Value`]: crate::Value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An accessor was called on a value of a different kind.
    #[error("Expected type {expected}, but got {actual}")]
    Mismatch {
        /// The kind the accessor requires.
        expected: Kind,
        /// The kind the value actually has.
        actual: Kind,
    },

    /// A 64-bit integer does not fit the narrower width requested.
    #[error("Integer does not fit the requested width")]
    IntegerOutOfRange,
}
