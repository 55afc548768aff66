//! Assembling the full report for an exception.
//!
//! A report is a header naming the exception and where it was raised,
//! optionally followed by the stack trace:
//!
//! ```text
//! RuntimeError: boom in file a.ext on line 10
//! Stack trace:
//!   1. App->run( 1, 'x' )   a.ext:5
//! ```

use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::{
    config::TraceConfig,
    exception::{Exception, StackFrame},
    frames::{FrameFilter, FrameFormatter},
    util::OrBlank,
};

/// A report of an exception and its stack trace.
///
/// Formatting a [`TraceReport`] with [`Display`](fmt::Display) renders the
/// complete report, ending with a line break. Nothing is cached between
/// renders, so the same report always renders to the same text.
///
/// # Examples
///
/// ```
/// use plaintrace::{
///     config::TraceConfig,
///     exception::{Exception, StackFrame},
///     report::TraceReport,
/// };
///
/// let exception = Exception::new("RuntimeError", "boom").with_location("a.ext", 10);
/// let frames = [StackFrame::method("App", "run").with_args([1]).at("a.ext", 5)];
/// let config = TraceConfig {
///     include_argument_dump: false,
///     ..TraceConfig::default()
/// };
///
/// let report = TraceReport::new(&exception, &frames, &config).to_string();
/// assert!(report.starts_with(
///     "\x1b[0;31mRuntimeError: boom\x1b[35m in file a.ext on line 10\x1b[0m"
/// ));
/// assert!(report.ends_with("a.ext:\x1b[33m5\x1b[0m\n"));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TraceReport<'a> {
    exception: &'a Exception,
    frames: &'a [StackFrame],
    config: &'a TraceConfig,
}

impl<'a> TraceReport<'a> {
    /// Creates a report of `exception` raised through `frames`, innermost
    /// call first.
    pub const fn new(
        exception: &'a Exception,
        frames: &'a [StackFrame],
        config: &'a TraceConfig,
    ) -> Self {
        Self {
            exception,
            frames,
            config,
        }
    }

    fn write_header(&self, f: &mut dyn Write) -> fmt::Result {
        let theme = &self.config.theme;
        let exception = self.exception;

        if self
            .config
            .internal_exception_classes
            .contains(&exception.class_name)
        {
            theme.header_message.paint(f, &exception.message)?;
        } else {
            theme.header_message.paint(
                f,
                format_args!("{}: {}", exception.class_name, exception.message),
            )?;
        }
        theme.header_location.paint(
            f,
            format_args!(
                " in file {} on line {}",
                OrBlank(&exception.file),
                OrBlank(&exception.line)
            ),
        )
    }

    fn write_trace(&self, f: &mut dyn Write) -> fmt::Result {
        f.write_char('\n')?;
        self.config.theme.trace_label.paint(f, "Stack trace:")?;

        let formatter = FrameFormatter::new(self.config);
        for (index, frame) in FrameFilter::from_config(self.config).retain(self.frames) {
            formatter.write_frame(f, frame, index)?;
        }
        Ok(())
    }
}

impl fmt::Display for TraceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        if self.config.include_trace {
            self.write_trace(f)?;
        }
        f.write_char('\n')
    }
}

/// Renders the report of `exception` raised through `frames`.
///
/// Shorthand for `TraceReport::new(exception, frames, config).to_string()`.
pub fn format_report(exception: &Exception, frames: &[StackFrame], config: &TraceConfig) -> String {
    TraceReport::new(exception, frames, config).to_string()
}
