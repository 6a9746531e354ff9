use bytes::BufMut;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Number, Value, serializer::FormattingProfile, serializer::float};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Renders [`Value`]s under one [`FormattingProfile`].
///
/// Output is exactly one self-contained JSON text with no trailing newline or
/// delimiter. Floats that are NaN or infinite come out as the bare tokens
/// `NaN`, `Infinity` and `-Infinity`, which strict parsers must reject; that
/// is intended.
///
/// Like the generator, rendering uses an explicit stack, so nesting depth is
/// not bounded by the native call stack.
///
/// # Example
/// ```
/// use jsonspout::{FormattingProfile, Serializer, Value};
///
/// let value = Value::Array(vec![Value::from(1_i64), Value::from(f64::NAN)]);
/// let compact = Serializer::new(FormattingProfile::default().with_separators(",", ":"));
/// assert_eq!(compact.serialize(&value), b"[1,NaN]");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Serializer {
    profile: FormattingProfile,
}

/// Pending output, popped in order.
enum Token<'a> {
    Value(&'a Value, usize),
    Entry(&'a str, &'a Value, usize),
    Separator(usize),
    Close(u8, usize),
}

impl Serializer {
    pub const fn new(profile: FormattingProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> &FormattingProfile {
        &self.profile
    }

    /// Renders `value` into a fresh buffer.
    pub fn serialize(&self, value: &Value) -> Vec<u8> {
        let mut out = Vec::new();
        self.serialize_into(value, &mut out);
        out
    }

    /// Appends the rendering of `value` to `out`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn serialize_into<B: BufMut>(&self, value: &Value, out: &mut B) {
        let mut stack = vec![Token::Value(value, 0)];
        while let Some(token) = stack.pop() {
            match token {
                Token::Value(value, level) => self.write_value(value, level, out, &mut stack),
                Token::Entry(key, value, level) => {
                    self.write_string(key, out);
                    out.put_slice(self.profile.key_separator.as_bytes());
                    stack.push(Token::Value(value, level));
                }
                Token::Separator(level) => {
                    out.put_slice(self.profile.item_separator.as_bytes());
                    self.write_newline(level, out);
                }
                Token::Close(bracket, level) => {
                    self.write_newline(level, out);
                    out.put_u8(bracket);
                }
            }
        }
    }

    fn write_value<'a, B: BufMut>(
        &self,
        value: &'a Value,
        level: usize,
        out: &mut B,
        stack: &mut Vec<Token<'a>>,
    ) {
        match value {
            Value::Null => out.put_slice(b"null"),
            Value::Bool(true) => out.put_slice(b"true"),
            Value::Bool(false) => out.put_slice(b"false"),
            Value::Number(Number::Int(n)) => out.put_slice(n.to_string().as_bytes()),
            Value::Number(Number::Float(n)) => out.put_slice(float::repr(*n).as_bytes()),
            Value::String(s) => self.write_string(s, out),
            Value::Array(items) if items.is_empty() => out.put_slice(b"[]"),
            Value::Object(object) if object.is_empty() => out.put_slice(b"{}"),
            Value::Array(items) => {
                out.put_u8(b'[');
                self.write_newline(level + 1, out);
                stack.push(Token::Close(b']', level));
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push(Token::Value(item, level + 1));
                    if i > 0 {
                        stack.push(Token::Separator(level + 1));
                    }
                }
            }
            Value::Object(object) => {
                out.put_u8(b'{');
                self.write_newline(level + 1, out);
                stack.push(Token::Close(b'}', level));
                let entries: Vec<_> = object.iter().collect();
                for (i, (key, value)) in entries.into_iter().enumerate().rev() {
                    stack.push(Token::Entry(key, value, level + 1));
                    if i > 0 {
                        stack.push(Token::Separator(level + 1));
                    }
                }
            }
        }
    }

    /// Writes a newline plus `level` indents, or nothing when compact.
    fn write_newline<B: BufMut>(&self, level: usize, out: &mut B) {
        if let Some(width) = self.profile.indent {
            out.put_u8(b'\n');
            out.put_bytes(b' ', width * level);
        }
    }

    fn write_string<B: BufMut>(&self, s: &str, out: &mut B) {
        out.put_u8(b'"');
        for c in s.chars() {
            match c {
                '"' => out.put_slice(b"\\\""),
                '\\' => out.put_slice(b"\\\\"),
                '\n' => out.put_slice(b"\\n"),
                '\r' => out.put_slice(b"\\r"),
                '\t' => out.put_slice(b"\\t"),
                '\u{8}' => out.put_slice(b"\\b"),
                '\u{c}' => out.put_slice(b"\\f"),
                c if (c as u32) < 0x20 => write_unit(c as u16, out),
                c if self.profile.ensure_ascii && !(' '..='~').contains(&c) => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        write_unit(*unit, out);
                    }
                }
                c => {
                    let mut buf = [0u8; 4];
                    out.put_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
        out.put_u8(b'"');
    }
}

/// Writes one UTF-16 code unit as `\uXXXX` with lowercase hex.
fn write_unit<B: BufMut>(unit: u16, out: &mut B) {
    out.put_slice(b"\\u");
    for shift in [12, 8, 4, 0] {
        out.put_u8(HEX[usize::from((unit >> shift) & 0xf)]);
    }
}

/// Renders `value` under `profile`.
pub fn serialize(value: &Value, profile: &FormattingProfile) -> Vec<u8> {
    Serializer::new(*profile).serialize(value)
}
