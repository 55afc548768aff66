//! Rendering of a single stack frame.

use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::{
    config::TraceConfig,
    dump::{ArgumentDump, dump_arguments},
    exception::StackFrame,
    render::{INDENT_STEP, ValueRenderer},
    util::{OrBlank, display_helper, write_indent},
};

/// Depth the argument list of a frame is rendered at.
const ARGUMENTS_DEPTH: usize = 3;

/// Column of the closing parenthesis of a multi-line argument list.
const ARGUMENTS_CLOSE_COLUMN: usize = 5;

/// Prefix of every line of an argument dump.
pub const DUMP_LINE_PREFIX: &str = "   | ";

/// Renders retained frames as lines of the stack trace.
///
/// # Examples
///
/// ```
/// use plaintrace::{config::TraceConfig, exception::StackFrame, frames::FrameFormatter};
///
/// let config = TraceConfig {
///     include_argument_dump: false,
///     ..TraceConfig::default()
/// };
/// let frame = StackFrame::method("App", "run").with_args([1]).at("a.ext", 5);
/// let line = FrameFormatter::new(&config).format(&frame, 1);
/// assert!(line.starts_with("\n\x1b[32m  1. \x1b[0m\x1b[34mApp\x1b[0m->run( "));
/// assert!(line.ends_with(" )   a.ext:\x1b[33m5\x1b[0m"));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct FrameFormatter<'a> {
    config: &'a TraceConfig,
}

impl<'a> FrameFormatter<'a> {
    /// Creates a formatter using the theme and dump settings of `config`.
    pub const fn new(config: &'a TraceConfig) -> Self {
        Self { config }
    }

    /// Renders `frame` shown at 1-based position `index`.
    ///
    /// The result starts with a line break and, when the frame's arguments
    /// are dumped, spans several lines.
    pub fn format(&self, frame: &StackFrame, index: usize) -> String {
        display_helper((*self, frame), move |(this, frame), f| {
            this.write_frame(f, frame, index)
        })
        .to_string()
    }

    /// Writes `frame` shown at 1-based position `index`.
    pub fn write_frame(&self, f: &mut dyn Write, frame: &StackFrame, index: usize) -> fmt::Result {
        let theme = &self.config.theme;

        f.write_char('\n')?;
        theme.frame_index.paint(f, format_args!("{index:>3}. "))?;
        self.write_call_site(f, frame)?;
        self.write_arguments(f, frame)?;
        write!(f, "{}:", OrBlank(&frame.file))?;
        theme.line_number.paint(f, OrBlank(&frame.line))?;

        if self.config.dumps_frame(index) {
            self.write_dump(f, frame)?;
        }
        Ok(())
    }

    fn write_call_site(&self, f: &mut dyn Write, frame: &StackFrame) -> fmt::Result {
        let theme = &self.config.theme;
        match (&frame.class, &frame.function) {
            (Some(class), Some(function)) => {
                theme.write_class_name(f, class)?;
                write!(f, "->{function}")
            }
            (Some(class), None) => {
                theme.keyword.paint(f, "new")?;
                f.write_char(' ')?;
                theme.write_class_name(f, class)
            }
            (None, function) => write!(f, "{}", OrBlank(function)),
        }
    }

    fn write_arguments(&self, f: &mut dyn Write, frame: &StackFrame) -> fmt::Result {
        let arguments =
            ValueRenderer::new(&self.config.theme).render_entries(&frame.args, ARGUMENTS_DEPTH);

        if arguments.is_empty() {
            f.write_str("()   ")
        } else if arguments.contains('\n') {
            f.write_char('(')?;
            if !arguments.starts_with('\n') {
                f.write_char('\n')?;
                write_indent(f, ARGUMENTS_DEPTH + INDENT_STEP)?;
            }
            f.write_str(&arguments)?;
            f.write_char('\n')?;
            write_indent(f, ARGUMENTS_CLOSE_COLUMN)?;
            f.write_str(")  ")
        } else {
            write!(f, "( {arguments} )   ")
        }
    }

    fn write_dump(&self, f: &mut dyn Write, frame: &StackFrame) -> fmt::Result {
        match dump_arguments(&frame.args, self.config.dump_size_limit) {
            ArgumentDump::Complete(dump) => {
                for line in dump.lines() {
                    write!(f, "\n{DUMP_LINE_PREFIX}{line}")?;
                }
                Ok(())
            }
            ArgumentDump::Discarded { limit } => write!(
                f,
                "\n{DUMP_LINE_PREFIX}Arguments dump length greater than {limit} Bytes. Discarded."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::{
        theme::{Style, Theme},
        value::{ObjectValue, Value},
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

    fn plain_config(dump: bool) -> TraceConfig {
        TraceConfig {
            include_argument_dump: dump,
            theme: PLAIN,
            ..TraceConfig::default()
        }
    }

    fn plain(frame: &StackFrame, index: usize) -> String {
        FrameFormatter::new(&plain_config(false)).format(frame, index)
    }

    #[test]
    fn test_method_call() {
        let frame = StackFrame::method("App", "run")
            .with_args([Value::from(1), Value::from("x")])
            .at("a.ext", 5);
        assert_eq!(plain(&frame, 1), "\n  1. App->run( 1, 'x' )   a.ext:5");
    }

    #[test]
    fn test_constructor_and_function_calls() {
        let constructor = StackFrame::constructor(r"App\Kernel").at("k.ext", 3);
        assert_eq!(plain(&constructor, 2), "\n  2. new App\\Kernel()   k.ext:3");

        let function = StackFrame::function("main").with_args([true]).at("m.ext", 1);
        assert_eq!(plain(&function, 12), "\n 12. main( true )   m.ext:1");
    }

    #[test]
    fn test_missing_fields_are_blank() {
        assert_eq!(plain(&StackFrame::default(), 1), "\n  1. ()   :");
    }

    #[test]
    fn test_expanded_arguments() {
        let frame = StackFrame::function("f").with_args([1, 2, 3]).at("f.ext", 9);
        assert_eq!(
            plain(&frame, 1),
            "\n  1. f(\n       1,\n       2,\n       3\n     )  f.ext:9"
        );
    }

    #[test]
    fn test_single_expanded_argument_starts_on_own_line() {
        let frame = StackFrame::function("f")
            .with_args([Value::Sequence(vec![
                Value::from(1),
                Value::from(2),
                Value::from(3),
            ])])
            .at("f.ext", 9);
        assert_eq!(
            plain(&frame, 1),
            "\n  1. f(\n       array(\n           1,\n           2,\n           3\n       )\
             \n     )  f.ext:9"
        );
    }

    #[test]
    fn test_colors() {
        let config = TraceConfig {
            include_argument_dump: false,
            ..TraceConfig::default()
        };
        let formatter = FrameFormatter::new(&config);

        let constructor = StackFrame::constructor("App").at("a.ext", 5);
        assert_eq!(
            formatter.format(&constructor, 1),
            "\n\x1b[32m  1. \x1b[0m\x1b[0;31mnew\x1b[0m \
             \x1b[34mApp\x1b[0m()   a.ext:\x1b[33m5\x1b[0m"
        );

        let method = StackFrame::method(r"App\Kernel", "boot").at("k.ext", 8);
        assert_eq!(
            formatter.format(&method, 2),
            "\n\x1b[32m  2. \x1b[0mApp\\\x1b[34mKernel\x1b[0m->boot()   k.ext:\x1b[33m8\x1b[0m"
        );
    }

    #[test]
    fn test_dump_lines_are_prefixed() {
        let frame = StackFrame::function("f").with_args([1]).at("f.ext", 2);
        assert_eq!(
            FrameFormatter::new(&plain_config(true)).format(&frame, 1),
            "\n  1. f( 1 )   f.ext:2\
             \n   | array(1) {\
             \n   |   [0]=>\
             \n   |   int(1)\
             \n   | }"
        );
    }

    #[test]
    fn test_oversized_dump_is_discarded() {
        let mut config = plain_config(true);
        config.dump_size_limit = 16;
        let object =
            ObjectValue::new("Big").with_field("data", Visibility::Private, "x".repeat(64));
        let frame = StackFrame::function("f").with_args([object]).at("f.ext", 2);
        let line = FrameFormatter::new(&config).format(&frame, 1);
        assert!(line.ends_with("\n   | Arguments dump length greater than 16 Bytes. Discarded."));
        assert!(!line.contains("xxxx\""));
    }

    #[test]
    fn test_dump_depth_threshold() {
        let mut config = plain_config(true);
        config.dump_depth_threshold = Some(1);
        let frame = StackFrame::function("f").with_args([1]).at("f.ext", 2);
        let formatter = FrameFormatter::new(&config);
        assert!(formatter.format(&frame, 1).contains(DUMP_LINE_PREFIX));
        assert_eq!(formatter.format(&frame, 2), "\n  2. f( 1 )   f.ext:2");
    }
}
