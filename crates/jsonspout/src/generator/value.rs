#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Object, Value,
    generator::{KEYS, RANDOM_CHARACTERS_PROBABILITY, SCALARS, max_len},
    rand::RandSource,
};

/// Start of the supplementary codepoint range random characters may fall in.
const HIGH_RANGE_START: u32 = 0xE000;
/// One past the last Unicode codepoint.
const HIGH_RANGE_END: u32 = 0x11_0000;
/// Start of the UTF-16 surrogate band, which low-range draws stop short of.
const SURROGATE_START: u32 = 0xD800;

/// A random JSON value generator borrowing a stream's random sequence.
///
/// Collections decay with depth: an array or object opened at depth `d` holds
/// `0..=max(10 - d, 1)` slots, and slot `i` is generated at depth `d + i`, so
/// later siblings shrink faster than earlier ones. Depth never decreases
/// along a path.
///
/// Generation walks an explicit stack of open collections instead of
/// recursing, so however deep a value nests, the native call stack stays
/// flat.
///
/// # Example
/// ```
/// use jsonspout::{MersenneTwister, Value, ValueGenerator};
///
/// let mut rng = MersenneTwister::from_seed(0);
/// let document = ValueGenerator::new(&mut rng).generate_document();
/// assert!(matches!(document, Value::Object(_)));
/// ```
pub struct ValueGenerator<'r, R>
where
    R: RandSource,
{
    rng: &'r mut R,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Scalar,
    Array,
    Object,
}

enum Body {
    Array(Vec<Value>),
    Object { entries: Object, key: Option<String> },
}

/// An open array or object waiting for its remaining slots.
struct Frame {
    depth: usize,
    len: usize,
    filled: usize,
    body: Body,
}

impl Frame {
    fn push(&mut self, value: Value) {
        match &mut self.body {
            Body::Array(items) => items.push(value),
            Body::Object { entries, key } => {
                entries.insert(key.take().unwrap_or_default(), value);
            }
        }
        self.filled += 1;
    }

    fn finish(self) -> Value {
        match self.body {
            Body::Array(items) => Value::Array(items),
            Body::Object { entries, .. } => Value::Object(entries),
        }
    }
}

enum Step {
    /// Generate a fresh value at the given depth.
    Open(usize),
    /// Fill the next slot of a collection, or close it.
    Advance(Frame),
    /// Hand a finished value to its parent.
    Close(Value),
}

impl<'r, R> ValueGenerator<'r, R>
where
    R: RandSource,
{
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }

    /// Generates one random value at `depth`: three in five draws are
    /// scalars, one in five an array, one in five an object.
    pub fn generate(&mut self, depth: usize) -> Value {
        self.drive(Step::Open(depth))
    }

    /// Generates one top-level document: always an object at depth 0.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_document(&mut self) -> Value {
        let frame = self.open(0, Kind::Object);
        self.drive(Step::Advance(frame))
    }

    /// Generates a scalar: random characters with probability 0.2, otherwise
    /// an entry of [`SCALARS`].
    pub fn scalar(&mut self) -> Value {
        if self.rng.random() < RANDOM_CHARACTERS_PROBABILITY {
            Value::String(self.characters())
        } else {
            self.rng.choose(&SCALARS).to_value()
        }
    }

    /// Generates an object key: random characters with probability 0.2,
    /// otherwise an entry of [`KEYS`].
    pub fn key(&mut self) -> String {
        if self.rng.random() < RANDOM_CHARACTERS_PROBABILITY {
            self.characters()
        } else {
            (*self.rng.choose(&KEYS)).to_owned()
        }
    }

    /// Generates one to four random codepoints.
    ///
    /// Nine in ten come from `[0, 0xD800)`, the rest from `[0xE000,
    /// 0x110000)`, so draws crowd both edges of the surrogate band and reach
    /// the supplementary planes.
    pub fn characters(&mut self) -> String {
        let len = self.rng.range_inclusive(1, 4);
        (0..len).map(|_| self.codepoint()).collect()
    }

    fn codepoint(&mut self) -> char {
        let cp = if self.rng.range_inclusive(0, 9) != 0 {
            self.rng.below(SURROGATE_START)
        } else {
            HIGH_RANGE_START + self.rng.below(HIGH_RANGE_END - HIGH_RANGE_START)
        };
        // Neither range contains a surrogate, so this never falls back.
        char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn kind(&mut self) -> Kind {
        match self.rng.range_inclusive(0, 4) {
            1 => Kind::Array,
            2 => Kind::Object,
            _ => Kind::Scalar,
        }
    }

    fn open(&mut self, depth: usize, kind: Kind) -> Frame {
        // max_len never exceeds MAX_BRANCHING, so the cast is lossless.
        let len = self.rng.range_inclusive(0, max_len(depth) as u32) as usize;
        let body = match kind {
            Kind::Object => Body::Object {
                entries: Object::with_capacity(len),
                key: None,
            },
            _ => Body::Array(Vec::with_capacity(len)),
        };
        Frame {
            depth,
            len,
            filled: 0,
            body,
        }
    }

    fn drive(&mut self, mut step: Step) -> Value {
        let mut stack: Vec<Frame> = Vec::new();
        loop {
            step = match step {
                Step::Open(depth) => match self.kind() {
                    Kind::Scalar => Step::Close(self.scalar()),
                    kind => Step::Advance(self.open(depth, kind)),
                },
                Step::Advance(mut frame) => {
                    if frame.filled < frame.len {
                        if let Body::Object { key, .. } = &mut frame.body {
                            *key = Some(self.key());
                        }
                        let child_depth = frame.depth + frame.filled;
                        stack.push(frame);
                        Step::Open(child_depth)
                    } else {
                        Step::Close(frame.finish())
                    }
                }
                Step::Close(value) => match stack.pop() {
                    Some(mut parent) => {
                        parent.push(value);
                        Step::Advance(parent)
                    }
                    None => return value,
                },
            };
        }
    }
}
