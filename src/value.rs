use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

use crate::error::TypeError;

/// Shared lookup sentinel, see [`Value::get`].
static UNDEFINED: Value = Value::Undefined;

/// The kind of a [`Value`].
///
/// Used in [`TypeError`] diagnostics; the `Display` impl renders the
/// lowercase name that appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The absent-lookup sentinel. Cannot be serialized.
    Undefined,
    /// A byte string.
    String,
    /// A signed 64-bit integer.
    Integer,
    /// A boolean (extension).
    Boolean,
    /// A dictionary with byte string keys.
    Dict,
    /// An ordered list of values.
    Array,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Undefined => "undefined",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Boolean => "boolean",
            Kind::Dict => "dictionary",
            Kind::Array => "array",
        })
    }
}

/// A bencode value.
///
/// This enum represents any bencode value and provides methods for type-safe
/// access. String payloads are opaque byte sequences (they may or may not be
/// valid UTF-8), and dictionaries keep their keys in ascending byte order,
/// which is also the order they are encoded in.
///
/// The extra `Undefined` variant is the result of looking up an absent
/// dictionary key. It is never produced by decoding and can never be encoded.
///
/// # Examples
///
/// ```
/// use rbenc::Value;
///
/// // Creating values directly
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// // Using From implementations
/// let int: Value = 42i64.into();
/// let string: Value = "hello".into();
///
/// // Accessing values
/// assert_eq!(int.as_integer(), Ok(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// The absent-lookup sentinel, also the `Default`. Not serializable.
    #[default]
    Undefined,
    /// A byte string (may or may not be valid UTF-8).
    String(Bytes),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A boolean. Non-standard extension, encoded as `b1`/`b0`.
    Boolean(bool),
    /// A dictionary with byte string keys (sorted by key in bencode encoding).
    Dict(BTreeMap<Bytes, Value>),
    /// An ordered list of values.
    Array(Vec<Value>),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::String(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates an empty dictionary value.
    pub fn dict() -> Self {
        Value::Dict(BTreeMap::new())
    }

    /// Creates an empty array value.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Undefined => Kind::Undefined,
            Value::String(_) => Kind::String,
            Value::Integer(_) => Kind::Integer,
            Value::Boolean(_) => Kind::Boolean,
            Value::Dict(_) => Kind::Dict,
            Value::Array(_) => Kind::Array,
        }
    }

    fn mismatch(&self, expected: Kind) -> TypeError {
        TypeError::Mismatch {
            expected,
            actual: self.kind(),
        }
    }

    /// Returns the byte string payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_string().unwrap().as_ref(), b"hello");
    /// assert!(Value::Integer(1).as_string().is_err());
    /// ```
    pub fn as_string(&self) -> Result<&Bytes, TypeError> {
        match self {
            Value::String(b) => Ok(b),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// Returns the value as a UTF-8 string slice, if it is a valid UTF-8
    /// byte string.
    ///
    /// Returns `None` if the value is not a string or if the bytes are not
    /// valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// assert_eq!(Value::string("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::Integer(42).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Returns the integer payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// assert_eq!(Value::Integer(42).as_integer(), Ok(42));
    /// assert!(Value::string("hello").as_integer().is_err());
    /// ```
    pub fn as_integer(&self) -> Result<i64, TypeError> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    /// Returns the integer payload narrowed to a smaller width.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not an integer, or
    /// [`TypeError::IntegerOutOfRange`] if the 64-bit payload does not fit
    /// the requested type.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::{TypeError, Value};
    ///
    /// let value = Value::Integer(300);
    /// assert_eq!(value.narrow_integer::<u32>(), Ok(300));
    /// assert_eq!(value.narrow_integer::<u8>(), Err(TypeError::IntegerOutOfRange));
    /// ```
    pub fn narrow_integer<T: TryFrom<i64>>(&self) -> Result<T, TypeError> {
        T::try_from(self.as_integer()?).map_err(|_| TypeError::IntegerOutOfRange)
    }

    /// Returns the boolean payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not a boolean.
    pub fn as_boolean(&self) -> Result<bool, TypeError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch(Kind::Boolean)),
        }
    }

    /// Returns a reference to the dictionary payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not a dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// let dict = value.as_dict().unwrap();
    /// assert!(dict.contains_key(b"foo".as_slice()));
    /// ```
    pub fn as_dict(&self) -> Result<&BTreeMap<Bytes, Value>, TypeError> {
        match self {
            Value::Dict(d) => Ok(d),
            _ => Err(self.mismatch(Kind::Dict)),
        }
    }

    /// Returns a mutable reference to the dictionary payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not a dictionary.
    pub fn as_dict_mut(&mut self) -> Result<&mut BTreeMap<Bytes, Value>, TypeError> {
        match self {
            Value::Dict(d) => Ok(d),
            _ => Err(TypeError::Mismatch {
                expected: Kind::Dict,
                actual: self.kind(),
            }),
        }
    }

    /// Consumes the value and returns the dictionary payload.
    ///
    /// This avoids cloning the dictionary when ownership is needed.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not a dictionary.
    pub fn into_dict(self) -> Result<BTreeMap<Bytes, Value>, TypeError> {
        match self {
            Value::Dict(d) => Ok(d),
            other => Err(other.mismatch(Kind::Dict)),
        }
    }

    /// Returns a reference to the array payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// let list = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
    /// assert_eq!(list.as_array().unwrap().len(), 2);
    /// ```
    pub fn as_array(&self) -> Result<&Vec<Value>, TypeError> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    /// Returns a mutable reference to the array payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not an array.
    pub fn as_array_mut(&mut self) -> Result<&mut Vec<Value>, TypeError> {
        match self {
            Value::Array(a) => Ok(a),
            _ => Err(TypeError::Mismatch {
                expected: Kind::Array,
                actual: self.kind(),
            }),
        }
    }

    /// Consumes the value and returns the array payload.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the value is not an array.
    pub fn into_array(self) -> Result<Vec<Value>, TypeError> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch(Kind::Array)),
        }
    }

    /// Looks up a key in a dictionary value.
    ///
    /// An absent key yields the [`Value::Undefined`] sentinel rather than an
    /// error, so chained lookups stay terse; a kind accessor on the sentinel
    /// then reports the broken assumption precisely.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] only if the receiver is not a
    /// dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::{decode, Value};
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").unwrap().as_str(), Some("bar"));
    /// assert_eq!(value.get(b"missing").unwrap(), &Value::Undefined);
    /// ```
    pub fn get(&self, key: &[u8]) -> Result<&Value, TypeError> {
        Ok(self.as_dict()?.get(key).unwrap_or(&UNDEFINED))
    }

    /// Inserts or overwrites a dictionary entry.
    ///
    /// A duplicate key replaces the previous entry (last write wins). This is
    /// deliberately weaker than the decoder, which rejects duplicate keys in
    /// untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the receiver is not a dictionary.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// let mut dict = Value::dict();
    /// dict.set("port", 6881i64).unwrap();
    /// dict.set("port", 6882i64).unwrap();
    /// assert_eq!(dict.get(b"port").unwrap().as_integer(), Ok(6882));
    /// ```
    pub fn set(&mut self, key: impl Into<Bytes>, value: impl Into<Value>) -> Result<(), TypeError> {
        self.as_dict_mut()?.insert(key.into(), value.into());
        Ok(())
    }

    /// Appends a value to an array.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::Mismatch`] if the receiver is not an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbenc::Value;
    ///
    /// let mut list = Value::array();
    /// list.append("foo").unwrap();
    /// list.append(1234i64).unwrap();
    /// assert_eq!(list.as_array().unwrap().len(), 2);
    /// ```
    pub fn append(&mut self, value: impl Into<Value>) -> Result<(), TypeError> {
        self.as_array_mut()?.push(value.into());
        Ok(())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Bytes::from(s))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::String(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(d: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(d)
    }
}
