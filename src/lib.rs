//! rbenc - Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses. This crate provides an owned [`Value`] tree together with a
//! strict decoder and a canonical encoder.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | Boolean | `b1` / `b0` | `b1` → true |
//! | Array | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Booleans are a non-standard extension. Decoding them can be turned off by
//! disabling the default `booleans` feature, which makes the decoder reject
//! `b` like any other unknown byte.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbenc::{decode, Value};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Ok(42));
//!
//! // Decode a string
//! let value = decode(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a dictionary and look up a key
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").unwrap().as_str(), Some("bar"));
//!
//! // Absent keys yield the undefined sentinel instead of an error
//! assert_eq!(value.get(b"missing").unwrap(), &Value::Undefined);
//! ```
//!
//! ## Encoding bencode data
//!
//! ```
//! use rbenc::{encode, Value};
//!
//! let mut torrent = Value::dict();
//! torrent.set("name", "example.txt").unwrap();
//! torrent.set("length", 1024i64).unwrap();
//!
//! // Dictionary keys are always emitted in ascending byte order, so the
//! // output is canonical: equal values encode to identical bytes.
//! assert_eq!(encode(&torrent), b"d6:lengthi1024e4:name11:example.txte");
//! ```
//!
//! ## Reading one value from a longer stream
//!
//! ```
//! use rbenc::{decode, decode_prefix, Value};
//!
//! let input = b"i1234ex";
//!
//! // The whole-input form rejects the trailing byte...
//! assert!(decode(input).is_err());
//!
//! // ...while the prefix form stops right after the value.
//! let (value, consumed) = decode_prefix(input).unwrap();
//! assert_eq!(value, Value::Integer(1234));
//! assert_eq!(&input[consumed..], b"x");
//! ```
//!
//! # Error Handling
//!
//! Failures split into two deliberately separate types:
//!
//! - [`DecodeError`] - malformed untrusted input; ordinary, recoverable
//!   results of parsing.
//! - [`TypeError`] - a [`Value`] accessor was used against the value's actual
//!   kind; a logic error in the caller.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub mod manifest;

pub use decode::{decode, decode_prefix};
pub use encode::{encode, encode_to};
pub use error::{DecodeError, TypeError};
pub use manifest::{FileEntry, Manifest, ManifestError};
pub use value::{Kind, Value};

#[cfg(test)]
mod tests;
