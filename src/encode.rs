use std::io::{self, Write};

use crate::value::Value;

/// Encodes a value to its canonical bencode byte form.
///
/// Encoding is deterministic: structurally equal values always produce
/// byte-identical output, with dictionary entries emitted in ascending key
/// order.
///
/// # Panics
///
/// Panics if the value, or any value nested inside it, is
/// [`Value::Undefined`]. The sentinel only ever results from a failed
/// dictionary lookup, so trying to serialize one is a logic error in the
/// caller, not a recoverable condition.
///
/// # Examples
///
/// ```
/// use rbenc::{encode, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let mut dict = Value::dict();
/// dict.set("b", 2i64).unwrap();
/// dict.set("a", 1i64).unwrap();
/// assert_eq!(encode(&dict), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf).expect("writing to a Vec<u8> does not fail");
    buf
}

/// Encodes a value into an arbitrary byte sink.
///
/// This is a direct structural walk with no buffering beyond the sink itself,
/// so it is suitable for writing straight to a file or socket.
///
/// # Errors
///
/// Returns any error reported by the writer.
///
/// # Panics
///
/// Panics on [`Value::Undefined`], see [`encode`].
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> io::Result<()> {
    match value {
        Value::Undefined => panic!("attempted to encode an undefined value"),
        Value::String(b) => {
            write!(writer, "{}:", b.len())?;
            writer.write_all(b)
        }
        Value::Integer(i) => write!(writer, "i{}e", i),
        Value::Boolean(b) => writer.write_all(if *b { b"b1" } else { b"b0" }),
        Value::Dict(d) => {
            writer.write_all(b"d")?;
            for (key, val) in d {
                write!(writer, "{}:", key.len())?;
                writer.write_all(key)?;
                encode_to(val, writer)?;
            }
            writer.write_all(b"e")
        }
        Value::Array(items) => {
            writer.write_all(b"l")?;
            for item in items {
                encode_to(item, writer)?;
            }
            writer.write_all(b"e")
        }
    }
}
