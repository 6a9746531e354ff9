use crate::{Number, Value};

/// A scalar that can live in a `const` table and be turned into a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Str(&'static str),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.to_owned()),
            Self::Int(n) => Value::Number(Number::Int(n)),
            Self::Float(n) => Value::Number(Number::Float(n)),
            Self::Bool(b) => Value::Bool(b),
            Self::Null => Value::Null,
        }
    }
}

/// The fixed pool scalars are drawn from when they are not random characters.
///
/// Order and contents are part of the determinism contract: a draw is an
/// index into this table.
#[allow(clippy::approx_constant)]
pub const SCALARS: [Literal; 36] = [
    Literal::Str("yes"),
    Literal::Str("no"),
    Literal::Str("maybe"),
    Literal::Str(":)"),
    Literal::Str(""),
    Literal::Float(f64::NAN),
    Literal::Float(f64::INFINITY),
    Literal::Float(f64::NEG_INFINITY),
    Literal::Str("\u{1F075}\u{1F08A}\u{1F087}"),
    Literal::Str(r#"[{"This looks like JSON": "but it's actually a string"}]"#),
    Literal::Str("'"),
    Literal::Str("\""),
    Literal::Str("hello, world"),
    Literal::Str("{"),
    Literal::Str("}"),
    Literal::Str("["),
    Literal::Str("]"),
    Literal::Str(r"back\slash"),
    Literal::Str(r#"\"\\"#),
    Literal::Str("\u{0}"),
    Literal::Str("\u{6F22}\u{5B57}"),
    Literal::Int(-1),
    Literal::Int(0),
    Literal::Int(1),
    Literal::Int(2),
    Literal::Int(3),
    Literal::Int(5),
    Literal::Int(8),
    Literal::Float(0.0),
    Literal::Int(10_000),
    Literal::Float(3.14159),
    Literal::Float(6.02e23),
    Literal::Float(1e-30),
    Literal::Bool(true),
    Literal::Bool(false),
    Literal::Null,
];

/// The fixed pool object keys are drawn from when they are not random
/// characters.
pub const KEYS: [&str; 8] = ["", "a", "um", "foo", "quack", ",", ":", "\""];

/// Probability that a scalar or key is random characters instead of a pool
/// entry.
pub const RANDOM_CHARACTERS_PROBABILITY: f64 = 0.2;

/// Largest branching factor, reached at depth 0.
pub const MAX_BRANCHING: usize = 10;

/// Upper bound (inclusive) on the length of an array or object opened at
/// `depth`: `max(10 - depth, 1)`.
pub const fn max_len(depth: usize) -> usize {
    let len = MAX_BRANCHING.saturating_sub(depth);
    if len == 0 { 1 } else { len }
}
