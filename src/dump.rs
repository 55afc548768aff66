//! Structural dumps of frame arguments.
//!
//! Unlike the colorized rendering, a dump spells out the type and size of
//! every value:
//!
//! ```text
//! array(2) {
//!   [0]=>
//!   int(1)
//!   [1]=>
//!   string(1) "x"
//! }
//! ```
//!
//! Dumps are written through a size-capped buffer: as soon as the dump would
//! grow past the limit, writing stops and nothing but the limit is kept.

use alloc::string::String;
use core::fmt::{self, Display, Write};

use crate::{
    util::write_indent,
    value::{Key, ObjectValue, Value},
    visibility::{Visibility, decode},
};

const DUMP_INDENT_STEP: usize = 2;

/// The outcome of dumping a frame's arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgumentDump {
    /// The full dump, ending with a line break.
    Complete(String),
    /// The dump was longer than `limit` bytes and was discarded.
    Discarded {
        /// The limit that was exceeded.
        limit: usize,
    },
}

/// Dumps `args` as a positional array, giving up once the dump would be
/// longer than `limit` bytes.
///
/// # Examples
///
/// ```
/// use plaintrace::dump::{ArgumentDump, dump_arguments};
/// use plaintrace::value::Value;
///
/// let args = [Value::from(1), Value::from("x")];
/// assert_eq!(
///     dump_arguments(&args, 1024),
///     ArgumentDump::Complete(
///         "array(2) {\n  [0]=>\n  int(1)\n  [1]=>\n  string(1) \"x\"\n}\n".into()
///     )
/// );
/// assert_eq!(dump_arguments(&args, 8), ArgumentDump::Discarded { limit: 8 });
/// ```
pub fn dump_arguments(args: &[Value], limit: usize) -> ArgumentDump {
    let mut buffer = LimitedBuffer::new(limit);
    let result = write_entries(
        &mut buffer,
        format_args!("array({})", args.len()),
        args.iter().enumerate().map(|(index, value)| (DumpKey::Index(index), value)),
        0,
    );

    match result {
        Ok(()) => ArgumentDump::Complete(buffer.into_inner()),
        Err(fmt::Error) => {
            tracing::debug!(limit, "argument dump discarded");
            ArgumentDump::Discarded { limit }
        }
    }
}

/// A string buffer that refuses writes taking it past `limit` bytes.
struct LimitedBuffer {
    buffer: String,
    limit: usize,
}

impl LimitedBuffer {
    fn new(limit: usize) -> Self {
        Self {
            buffer: String::new(),
            limit,
        }
    }

    fn into_inner(self) -> String {
        self.buffer
    }
}

impl Write for LimitedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.buffer.len().saturating_add(s.len()) > self.limit {
            return Err(fmt::Error);
        }
        self.buffer.push_str(s);
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum DumpKey<'v> {
    Index(usize),
    Key(&'v Key),
    Field(&'v str),
}

impl Display for DumpKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DumpKey::Index(index) => write!(f, "[{index}]"),
            DumpKey::Key(Key::Int(index)) => write!(f, "[{index}]"),
            DumpKey::Key(Key::Str(name)) => write!(f, "[\"{name}\"]"),
            DumpKey::Field(stored_name) => match decode(stored_name) {
                (Visibility::Private, Some(class_name), name) => {
                    write!(f, "[\"{name}\":\"{class_name}\":private]")
                }
                (Visibility::Protected, _, name) => write!(f, "[\"{name}\":protected]"),
                (_, _, name) => write!(f, "[\"{name}\"]"),
            },
        }
    }
}

fn write_value(f: &mut dyn Write, value: &Value, indent: usize) -> fmt::Result {
    match value {
        Value::Null => writeln!(f, "NULL"),
        Value::Bool(value) => writeln!(f, "bool({value})"),
        Value::Int(value) => writeln!(f, "int({value})"),
        Value::Float(value) => writeln!(f, "float({value})"),
        Value::String(value) => writeln!(f, "string({}) \"{value}\"", value.len()),
        Value::Sequence(values) => write_entries(
            f,
            format_args!("array({})", values.len()),
            values
                .iter()
                .enumerate()
                .map(|(index, value)| (DumpKey::Index(index), value)),
            indent,
        ),
        Value::Mapping(mapping) => write_entries(
            f,
            format_args!("array({})", mapping.len()),
            mapping.iter().map(|(key, value)| (DumpKey::Key(key), value)),
            indent,
        ),
        Value::Object(object) => write_object(f, object, indent),
        Value::Opaque(type_name) => writeln!(f, "{type_name}"),
    }
}

fn write_object(f: &mut dyn Write, object: &ObjectValue, indent: usize) -> fmt::Result {
    write_entries(
        f,
        format_args!("object({}) ({})", object.class_name, object.fields.len()),
        object
            .fields
            .iter()
            .map(|(name, value)| (DumpKey::Field(name), value)),
        indent,
    )
}

fn write_entries<'v>(
    f: &mut dyn Write,
    header: impl Display,
    entries: impl Iterator<Item = (DumpKey<'v>, &'v Value)>,
    indent: usize,
) -> fmt::Result {
    writeln!(f, "{header} {{")?;
    let child_indent = indent + DUMP_INDENT_STEP;
    for (key, value) in entries {
        write_indent(f, child_indent)?;
        writeln!(f, "{key}=>")?;
        write_indent(f, child_indent)?;
        write_value(f, value, child_indent)?;
    }
    write_indent(f, indent)?;
    writeln!(f, "}}")
}
