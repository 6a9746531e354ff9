use crate::rand::RandSource;

/// Indent choices, weighted six-to-one-to-one towards compact output.
pub const INDENTS: [Option<usize>; 8] = [None, None, None, None, None, None, Some(1), Some(2)];

/// ASCII-escape choices.
pub const ASCII_POLICIES: [bool; 2] = [true, false];

/// `(item, key)` separator pairs. The plain pair is three times as likely as
/// each of the others.
pub const SEPARATORS: [(&str, &str); 8] = [
    (", ", ": "),
    (", ", ": "),
    (", ", ": "),
    (",", ": "),
    (", ", ":"),
    (",", ":"),
    (" , ", " : "),
    ("  ,", ":  "),
];

/// How one top-level document is rendered.
///
/// A profile is drawn once per document and applies to every nested value
/// in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormattingProfile {
    /// `None` renders compactly; `Some(n)` puts every element on its own
    /// line indented by `n` spaces per level.
    pub indent: Option<usize>,
    /// Escape every codepoint outside printable ASCII as `\uXXXX`.
    pub ensure_ascii: bool,
    /// Written between array elements and object entries.
    pub item_separator: &'static str,
    /// Written between an object key and its value.
    pub key_separator: &'static str,
}

impl FormattingProfile {
    /// Draws a profile: indent, then ASCII policy, then separators.
    pub fn random<R: RandSource>(rng: &mut R) -> Self {
        let indent = *rng.choose(&INDENTS);
        let ensure_ascii = *rng.choose(&ASCII_POLICIES);
        let (item_separator, key_separator) = *rng.choose(&SEPARATORS);
        Self {
            indent,
            ensure_ascii,
            item_separator,
            key_separator,
        }
    }

    #[must_use]
    pub const fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub const fn with_ensure_ascii(mut self, ensure_ascii: bool) -> Self {
        self.ensure_ascii = ensure_ascii;
        self
    }

    #[must_use]
    pub const fn with_separators(mut self, item: &'static str, key: &'static str) -> Self {
        self.item_separator = item;
        self.key_separator = key;
        self
    }
}

impl Default for FormattingProfile {
    /// Compact, ASCII-only, `", "` and `": "`.
    fn default() -> Self {
        Self {
            indent: None,
            ensure_ascii: true,
            item_separator: SEPARATORS[0].0,
            key_separator: SEPARATORS[0].1,
        }
    }
}
