//! Colorized rendering of captured [`Value`]s.
//!
//! Collections and objects are laid out depending on how many entries they
//! hold:
//!
//! - no entries: `array()`
//! - fewer than [`EXPANDED_MIN_ENTRIES`]: `array(1, 'x')`, on one line
//! - otherwise one entry per line, indented [`INDENT_STEP`] columns deeper
//!   than the collection, with the closing parenthesis on its own line:
//!
//! ```text
//! array(
//!     1,
//!     2,
//!     3
//! )
//! ```
//!
//! Positional collections omit their keys; associative collections show
//! `key => value`. Object fields additionally show their visibility, e.g.
//! `private $id => 4`.

use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::{
    theme::Theme,
    util::{display_helper, write_indent},
    value::{Key, ObjectValue, Value, is_positional},
    visibility::classify,
};

/// Number of columns each nesting level is indented by.
pub const INDENT_STEP: usize = 4;

/// Collections with at least this many entries are laid out one entry per
/// line.
pub const EXPANDED_MIN_ENTRIES: usize = 3;

/// Position of a value inside the structure being rendered.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderContext<'a> {
    /// Column the enclosing collection starts at.
    pub depth: usize,
    /// The class whose fields are being rendered, if any.
    ///
    /// When set, entry keys are stored field names and are shown with their
    /// visibility.
    pub enclosing_class: Option<&'a str>,
}

impl RenderContext<'_> {
    /// A context at `depth` outside of any object.
    pub const fn at_depth(depth: usize) -> Self {
        Self {
            depth,
            enclosing_class: None,
        }
    }
}

#[derive(Copy, Clone)]
enum EntryKey<'v> {
    Hidden,
    Key(&'v Key),
    Field(&'v str),
}

/// Renders [`Value`]s using the styles of a [`Theme`].
///
/// # Examples
///
/// ```
/// use plaintrace::{render::ValueRenderer, theme::Theme, value::Value};
///
/// let renderer = ValueRenderer::new(&Theme::ANSI);
/// let rendered = renderer.render(&Value::from(vec![Value::from(1), Value::from("x")]), 0);
/// assert_eq!(
///     rendered,
///     "\x1b[34marray\x1b[0m(\x1b[35m1\x1b[0m, \x1b[33m'x'\x1b[0m)"
/// );
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ValueRenderer<'t> {
    theme: &'t Theme,
}

impl<'t> ValueRenderer<'t> {
    /// Creates a renderer using `theme`.
    pub const fn new(theme: &'t Theme) -> Self {
        Self { theme }
    }

    /// Renders `value` as if it started on a line indented by `depth`
    /// columns.
    pub fn render(&self, value: &Value, depth: usize) -> String {
        display_helper((*self, value), move |(this, value), f| {
            this.write_value(f, value, depth)
        })
        .to_string()
    }

    /// Renders `values` as the entries of a positional list at `depth`,
    /// without the surrounding `array(` and `)`.
    ///
    /// The result is empty when `values` is empty, and starts with a line
    /// break when the entries are laid out one per line.
    pub fn render_entries(&self, values: &[Value], depth: usize) -> String {
        display_helper((*self, values), move |(this, values), f| {
            this.write_entries(
                f,
                values.iter().map(|value| (EntryKey::Hidden, value)),
                RenderContext::at_depth(depth),
            )
        })
        .to_string()
    }

    /// Writes `value` as if it started on a line indented by `depth` columns.
    pub fn write_value(&self, f: &mut dyn Write, value: &Value, depth: usize) -> fmt::Result {
        let theme = self.theme;
        match value {
            Value::Null => theme.fallback.paint(f, "null"),
            Value::Bool(value) => theme.number.paint(f, value),
            Value::Int(value) => theme.number.paint(f, value),
            Value::Float(value) => theme.number.paint(f, value),
            Value::String(value) => theme.string.paint(f, format_args!("'{value}'")),
            Value::Sequence(values) => self.write_collection(
                f,
                values.iter().map(|value| (EntryKey::Hidden, value)),
                depth,
            ),
            Value::Mapping(mapping) if is_positional(mapping) => self.write_collection(
                f,
                mapping.values().map(|value| (EntryKey::Hidden, value)),
                depth,
            ),
            Value::Mapping(mapping) => self.write_collection(
                f,
                mapping.iter().map(|(key, value)| (EntryKey::Key(key), value)),
                depth,
            ),
            Value::Object(object) => self.write_object(f, object, depth),
            Value::Opaque(type_name) => theme.fallback.paint(f, type_name),
        }
    }

    fn write_collection<'v, I>(&self, f: &mut dyn Write, entries: I, depth: usize) -> fmt::Result
    where
        I: ExactSizeIterator<Item = (EntryKey<'v>, &'v Value)>,
    {
        let count = entries.len();
        self.theme.collection_keyword.paint(f, "array")?;
        f.write_char('(')?;
        self.write_entries(f, entries, RenderContext::at_depth(depth))?;
        close_delimiter(f, count, depth)
    }

    fn write_object(&self, f: &mut dyn Write, object: &ObjectValue, depth: usize) -> fmt::Result {
        let count = object.fields.len();
        self.theme.write_class_name(f, &object.class_name)?;
        f.write_char('(')?;
        self.write_entries(
            f,
            object
                .fields
                .iter()
                .map(|(name, value)| (EntryKey::Field(name), value)),
            RenderContext {
                depth,
                enclosing_class: Some(&object.class_name),
            },
        )?;
        close_delimiter(f, count, depth)
    }

    fn write_entries<'v, I>(
        &self,
        f: &mut dyn Write,
        entries: I,
        context: RenderContext<'_>,
    ) -> fmt::Result
    where
        I: ExactSizeIterator<Item = (EntryKey<'v>, &'v Value)>,
    {
        let expanded = entries.len() >= EXPANDED_MIN_ENTRIES;
        let child_depth = context.depth + INDENT_STEP;

        for (index, (key, value)) in entries.enumerate() {
            if expanded {
                if index != 0 {
                    f.write_char(',')?;
                }
                f.write_char('\n')?;
                write_indent(f, child_depth)?;
            } else if index != 0 {
                f.write_str(", ")?;
            }
            self.write_key(f, key, context.enclosing_class)?;
            self.write_value(f, value, child_depth)?;
        }
        Ok(())
    }

    fn write_key(
        &self,
        f: &mut dyn Write,
        key: EntryKey<'_>,
        enclosing_class: Option<&str>,
    ) -> fmt::Result {
        let theme = self.theme;
        match (key, enclosing_class) {
            (EntryKey::Hidden, _) => return Ok(()),
            (EntryKey::Field(stored_name), Some(class_name)) => {
                let (visibility, name) = classify(stored_name, class_name);
                theme.keyword.paint(f, visibility)?;
                write!(f, " ${name}")?;
            }
            (EntryKey::Field(name), None) => theme.string.paint(f, format_args!("'{name}'"))?,
            (EntryKey::Key(Key::Str(name)), _) => {
                theme.string.paint(f, format_args!("'{name}'"))?;
            }
            (EntryKey::Key(Key::Int(index)), _) => theme.number.paint(f, index)?,
        }
        theme.keyword.paint(f, " => ")
    }
}

fn close_delimiter(f: &mut dyn Write, count: usize, depth: usize) -> fmt::Result {
    if count >= EXPANDED_MIN_ENTRIES {
        f.write_char('\n')?;
        write_indent(f, depth)?;
    }
    f.write_char(')')
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;
    use crate::{
        theme::Style,
        value::{Mapping, ObjectValue},
        visibility::Visibility,
    };

    const NONE: Style = Style::new("", "");
    const PLAIN: Theme = Theme {
        string: NONE,
        number: NONE,
        fallback: NONE,
        collection_keyword: NONE,
        class_name: NONE,
        keyword: NONE,
        frame_index: NONE,
        line_number: NONE,
        header_message: NONE,
        header_location: NONE,
        trace_label: NONE,
    };

    fn plain(value: impl Into<Value>) -> String {
        ValueRenderer::new(&PLAIN).render(&value.into(), 0)
    }

    fn ints(values: &[i64]) -> Value {
        values.iter().copied().collect()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(plain(Value::Null), "null");
        assert_eq!(plain(true), "true");
        assert_eq!(plain(-12), "-12");
        assert_eq!(plain(1.5), "1.5");
        assert_eq!(plain("it works"), "'it works'");
        assert_eq!(plain(Value::opaque("resource")), "resource");
    }

    #[test]
    fn test_scalar_colors() {
        let renderer = ValueRenderer::new(&Theme::ANSI);
        assert_eq!(renderer.render(&Value::from("x"), 0), "\x1b[33m'x'\x1b[0m");
        assert_eq!(renderer.render(&Value::from(7), 0), "\x1b[35m7\x1b[0m");
        assert_eq!(renderer.render(&Value::from(false), 0), "\x1b[35mfalse\x1b[0m");
        assert_eq!(renderer.render(&Value::Null, 0), "\x1b[34mnull\x1b[0m");
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(plain(Vec::<Value>::new()), "array()");
        assert_eq!(plain(Mapping::default()), "array()");
        assert_eq!(plain(ObjectValue::new("Empty")), "Empty()");
    }

    #[test]
    fn test_short_sequence_is_inline() {
        assert_eq!(plain(ints(&[1])), "array(1)");
        assert_eq!(plain(ints(&[1, 2])), "array(1, 2)");
    }

    #[test]
    fn test_long_sequence_is_expanded() {
        assert_eq!(plain(ints(&[1, 2, 3])), "array(\n    1,\n    2,\n    3\n)");
    }

    #[test]
    fn test_expanded_uses_depth() {
        let rendered = ValueRenderer::new(&PLAIN).render(&ints(&[1, 2, 3]), 2);
        assert_eq!(rendered, "array(\n      1,\n      2,\n      3\n  )");
    }

    #[test]
    fn test_nested_expanded_inside_inline() {
        let value = Value::Sequence(vec![ints(&[1, 2, 3])]);
        assert_eq!(
            plain(value),
            "array(array(\n        1,\n        2,\n        3\n    ))"
        );
    }

    #[test]
    fn test_nested_expanded_inside_expanded() {
        let value = Value::Sequence(vec![ints(&[1, 2, 3]), Value::Null, Value::Null]);
        assert_eq!(
            plain(value),
            "array(\n    array(\n        1,\n        2,\n        3\n    ),\n    null,\n    null\n)"
        );
    }

    #[test]
    fn test_associative_mapping_keeps_order() {
        let mut mapping = Mapping::default();
        mapping.insert(Key::from("zeta"), Value::from(1));
        mapping.insert(Key::Int(5), Value::from("x"));
        mapping.insert(Key::from("alpha"), Value::Null);
        assert_eq!(
            plain(mapping),
            "array(\n    'zeta' => 1,\n    5 => 'x',\n    'alpha' => null\n)"
        );
    }

    #[test]
    fn test_dense_mapping_hides_keys() {
        let mut mapping = Mapping::default();
        mapping.insert(Key::Int(0), Value::from("a"));
        mapping.insert(Key::Int(1), Value::from("b"));
        assert_eq!(plain(mapping), "array('a', 'b')");
    }

    #[test]
    fn test_key_colors() {
        let mut mapping = Mapping::default();
        mapping.insert(Key::from("k"), Value::from(1));
        mapping.insert(Key::Int(9), Value::from(2));
        assert_eq!(
            ValueRenderer::new(&Theme::ANSI).render(&mapping.into(), 0),
            "\x1b[34marray\x1b[0m(\
             \x1b[33m'k'\x1b[0m\x1b[0;31m => \x1b[0m\x1b[35m1\x1b[0m, \
             \x1b[35m9\x1b[0m\x1b[0;31m => \x1b[0m\x1b[35m2\x1b[0m)"
        );
    }

    #[test]
    fn test_object_fields_show_visibility() {
        let object = ObjectValue::new(r"App\User")
            .with_field("id", Visibility::Public, 1)
            .with_field("name", Visibility::Protected, "bob")
            .with_field("secret", Visibility::Private, "x");
        assert_eq!(
            plain(object),
            "App\\User(\n    public $id => 1,\n    protected $name => 'bob',\n    \
             private $secret => 'x'\n)"
        );
    }

    #[test]
    fn test_short_object_is_inline() {
        let object = ObjectValue::new("Point")
            .with_field("x", Visibility::Public, 1)
            .with_field("y", Visibility::Public, 2);
        assert_eq!(plain(object), "Point(public $x => 1, public $y => 2)");
    }

    #[test]
    fn test_nested_values_in_object_have_no_visibility() {
        let mut options = Mapping::default();
        options.insert(Key::from("\0*\0raw"), Value::from(true));
        let object = ObjectValue::new("Cmd").with_field("options", Visibility::Private, options);
        assert_eq!(
            plain(object),
            "Cmd(private $options => array('\0*\0raw' => true))"
        );
    }

    #[test]
    fn test_object_class_name_is_highlighted() {
        let rendered =
            ValueRenderer::new(&Theme::ANSI).render(&ObjectValue::new(r"Acme\Mailer").into(), 0);
        assert_eq!(rendered, "Acme\\\x1b[34mMailer\x1b[0m()");
    }

    #[test]
    fn test_render_entries() {
        let renderer = ValueRenderer::new(&PLAIN);
        assert_eq!(renderer.render_entries(&[], 3), "");
        assert_eq!(
            renderer.render_entries(&[Value::from(1), Value::from("x")], 3),
            "1, 'x'"
        );
        assert_eq!(
            renderer.render_entries(&[Value::from(1), Value::from(2), Value::from(3)], 3),
            "\n       1,\n       2,\n       3"
        );
    }

    #[test]
    fn test_shared_object_renders_each_time() {
        let shared = Value::from(ObjectValue::new("Node"));
        let list = Value::Sequence(vec![shared.clone(), shared]);
        assert_eq!(plain(list), "array(Node(), Node())");
    }
}
