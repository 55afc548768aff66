//! ANSI styling for every token of a report.
//!
//! A [`Theme`] is a table of [`Style`]s, one per kind of token. Each style is
//! a prefix and a suffix written around the token text, so a style can carry
//! any escape sequence. [`Theme::ANSI`] is the palette used by default.
//!
//! ```
//! use plaintrace::theme::{Style, Theme};
//!
//! // Bold red strings, everything else unchanged
//! let theme = Theme {
//!     string: Style::new("\x1b[1;31m", "\x1b[0m"),
//!     ..Theme::ANSI
//! };
//! # let _ = theme;
//! ```

use core::fmt::{self, Write};

/// Text written before and after a styled token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Style {
    /// Text written before the token.
    pub prefix: &'static str,
    /// Text written after the token.
    pub suffix: &'static str,
}

impl Style {
    /// Creates a style from its prefix and suffix.
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// Writes `token` wrapped in this style.
    pub fn paint(&self, f: &mut dyn Write, token: impl fmt::Display) -> fmt::Result {
        f.write_str(self.prefix)?;
        write!(f, "{token}")?;
        f.write_str(self.suffix)
    }
}

/// Styles for each kind of token in a report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// String values and string keys, including their quotes.
    pub string: Style,
    /// Integers, floats, booleans and integer keys.
    pub number: Style,
    /// Null and opaque values, shown by type name.
    pub fallback: Style,
    /// The `array` keyword opening a collection.
    pub collection_keyword: Style,
    /// The last segment of a class name.
    pub class_name: Style,
    /// `new`, field visibility keywords and the ` => ` separator.
    pub keyword: Style,
    /// The `N. ` index in front of each frame.
    pub frame_index: Style,
    /// The line number of a frame location.
    pub line_number: Style,
    /// The `Class: message` part of the header.
    pub header_message: Style,
    /// The ` in file … on line …` part of the header.
    pub header_location: Style,
    /// The `Stack trace:` label.
    pub trace_label: Style,
}

impl Theme {
    /// The default palette.
    pub const ANSI: Self = Self {
        string: Style::new("\x1b[33m", "\x1b[0m"),
        number: Style::new("\x1b[35m", "\x1b[0m"),
        fallback: Style::new("\x1b[34m", "\x1b[0m"),
        collection_keyword: Style::new("\x1b[34m", "\x1b[0m"),
        class_name: Style::new("\x1b[34m", "\x1b[0m"),
        keyword: Style::new("\x1b[0;31m", "\x1b[0m"),
        frame_index: Style::new("\x1b[32m", "\x1b[0m"),
        line_number: Style::new("\x1b[33m", "\x1b[0m"),
        header_message: Style::new("\x1b[0;31m", ""),
        header_location: Style::new("\x1b[35m", "\x1b[0m"),
        trace_label: Style::new("\x1b[32m", "\x1b[0m"),
    };

    /// Writes a class name with its last namespace segment highlighted.
    ///
    /// Namespaces may be separated by `\`, `::` or `.`; separators are kept
    /// as they are.
    pub fn write_class_name(&self, f: &mut dyn Write, class_name: &str) -> fmt::Result {
        let (namespace, short_name) = split_class_name(class_name);
        f.write_str(namespace)?;
        self.class_name.paint(f, short_name)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ANSI
    }
}

/// Splits `class_name` after its last namespace separator.
///
/// The first half keeps the separator, so the halves concatenate back to the
/// input.
pub(crate) fn split_class_name(class_name: &str) -> (&str, &str) {
    let split = ["\\", "::", "."]
        .iter()
        .filter_map(|separator| {
            class_name
                .rfind(separator)
                .map(|index| index + separator.len())
        })
        .max()
        .unwrap_or(0);
    class_name.split_at(split)
}
