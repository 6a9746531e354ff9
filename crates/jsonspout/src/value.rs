//! The in-memory JSON model produced by the generator.
//!
//! Values live only long enough to be serialized once; nothing here is
//! retained between documents.

/// A JSON number as the generator produces it.
///
/// Floats are allowed to be NaN or infinite. The serializer renders those as
/// the non-standard tokens `NaN`, `Infinity` and `-Infinity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// A generated JSON value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Returns how many levels of arrays and objects this value nests.
    ///
    /// Scalars have depth 0, `[]` has depth 1.
    pub fn nesting(&self) -> usize {
        // Iterative so that pathological values cannot overflow the stack.
        let mut deepest = 0;
        let mut pending = vec![(self, 0usize)];
        while let Some((value, level)) = pending.pop() {
            match value {
                Self::Array(items) => {
                    deepest = deepest.max(level + 1);
                    pending.extend(items.iter().map(|v| (v, level + 1)));
                }
                Self::Object(object) => {
                    deepest = deepest.max(level + 1);
                    pending.extend(object.values().map(|v| (v, level + 1)));
                }
                _ => {}
            }
        }
        deepest
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(Number::Int(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(Number::Float(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// An insertion-ordered JSON object.
///
/// A key keeps the position of its first insertion. Inserting a key that is
/// already present replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        // Objects hold at most ten entries, a linear scan is fine.
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let mut object = Object::new();
        assert_eq!(object.insert("a".into(), Value::from(1_i64)), None);
        object.insert("b".into(), Value::from(2_i64));
        assert_eq!(
            object.insert("a".into(), Value::from(3_i64)),
            Some(Value::from(1_i64))
        );

        assert_eq!(object.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(object.get("a"), Some(&Value::from(3_i64)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn nesting_counts_container_levels() {
        assert_eq!(Value::Null.nesting(), 0);
        assert_eq!(Value::Array(vec![]).nesting(), 1);

        let inner: Object = [("k".to_owned(), Value::Array(vec![Value::Null]))]
            .into_iter()
            .collect();
        let value = Value::Array(vec![Value::from(1_i64), Value::Object(inner)]);
        assert_eq!(value.nesting(), 3);
    }
}
