//! Settings controlling what a report contains.
//!
//! [`TraceConfig::default()`] matches what most command-line tools want: the
//! full trace with argument dumps, frames from the error handler itself
//! hidden, and the trace cut off where the command runner takes over.
//!
//! Settings can also be given as a comma-separated option string, either
//! directly through [`TraceConfig::from_options`] or, with the `std`
//! feature, through the `PLAINTRACE` environment variable:
//!
//! - `no_trace` - Only print the exception header
//! - `no_args` - Do not dump frame arguments
//! - `args_limit=<bytes>` - Discard argument dumps longer than this
//! - `args_depth=<frames>` - Only dump the arguments of the first N frames
//!
//! ```
//! use plaintrace::config::TraceConfig;
//!
//! let config = TraceConfig::from_options("args_limit=512,args_depth=3").unwrap();
//! assert_eq!(config.dump_size_limit, 512);
//! assert_eq!(config.dump_depth_threshold, Some(3));
//! ```

use alloc::{
    borrow::Cow,
    string::{String, ToString},
};
use core::fmt;

use hashbrown::HashSet;
use rustc_hash::FxBuildHasher;

use crate::theme::Theme;

/// Default limit for a frame's argument dump, in bytes.
pub const DEFAULT_DUMP_SIZE_LIMIT: usize = 5 * 1024;

/// A set of fully qualified class names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassSet(HashSet<Cow<'static, str>, FxBuildHasher>);

impl ClassSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from class name literals.
    pub fn from_static(class_names: &[&'static str]) -> Self {
        class_names.iter().copied().map(Cow::Borrowed).collect()
    }

    /// Adds a class name to the set.
    pub fn insert(&mut self, class_name: impl Into<Cow<'static, str>>) -> bool {
        self.0.insert(class_name.into())
    }

    /// Returns true if `class_name` is in the set.
    pub fn contains(&self, class_name: &str) -> bool {
        self.0.contains(class_name)
    }

    /// Number of class names in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<Cow<'static, str>>> FromIterator<S> for ClassSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<Cow<'static, str>>> Extend<S> for ClassSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Configuration of a trace report.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceConfig {
    /// Whether the stack trace is printed after the exception header.
    pub include_trace: bool,
    /// Whether each frame is followed by a dump of its arguments.
    pub include_argument_dump: bool,
    /// Argument dumps longer than this many bytes are replaced by a notice.
    pub dump_size_limit: usize,
    /// Only frames with an index up to this value get an argument dump.
    /// `None` dumps every frame.
    pub dump_depth_threshold: Option<usize>,
    /// Frames declared by these classes are left out of the trace.
    pub skip_classes: ClassSet,
    /// The trace ends at the first frame declared by one of these classes.
    pub stop_classes: ClassSet,
    /// Exceptions of these classes are raised by the error handler itself;
    /// their class name is left out of the header.
    pub internal_exception_classes: ClassSet,
    /// Colors used for the report.
    pub theme: Theme,
}

impl TraceConfig {
    /// Classes of the error handler, whose frames are hidden by default.
    pub const DEFAULT_SKIP_CLASSES: &'static [&'static str] =
        &[r"Whoops\Exception\ErrorException", r"Whoops\Run"];

    /// Classes of the command runner, where the trace stops by default.
    pub const DEFAULT_STOP_CLASSES: &'static [&'static str] = &[
        r"WP_CLI\Runner",
        r"WP_CLI\Dispatcher\CommandFactory",
        r"WP_CLI\Dispatcher\Subcommand",
    ];

    /// Exception classes raised by the error handler itself.
    pub const DEFAULT_INTERNAL_EXCEPTION_CLASSES: &'static [&'static str] =
        &[r"Whoops\Exception\ErrorException"];

    /// Parses a comma-separated option string on top of the defaults.
    ///
    /// Options are case-insensitive and empty entries are ignored. See the
    /// [module documentation](self) for the supported options.
    pub fn from_options(options: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_options(options)?;
        Ok(config)
    }

    /// Applies a comma-separated option string to this configuration.
    ///
    /// Options before an invalid one stay applied.
    pub fn apply_options(&mut self, options: &str) -> Result<(), ConfigError> {
        for option in options.split(',').map(str::trim) {
            if option.is_empty() {
                continue;
            }
            let (name, value) = match option.split_once('=') {
                Some((name, value)) => (name.trim(), Some(value.trim())),
                None => (option, None),
            };

            if name.eq_ignore_ascii_case("no_trace") && value.is_none() {
                self.include_trace = false;
            } else if name.eq_ignore_ascii_case("no_args") && value.is_none() {
                self.include_argument_dump = false;
            } else if name.eq_ignore_ascii_case("args_limit")
                && let Some(value) = value
            {
                self.dump_size_limit = parse_number("args_limit", value)?;
            } else if name.eq_ignore_ascii_case("args_depth")
                && let Some(value) = value
            {
                self.dump_depth_threshold = Some(parse_number("args_depth", value)?);
            } else {
                return Err(ConfigError::UnknownOption(option.to_string()));
            }
        }
        Ok(())
    }

    /// Whether the frame with 1-based `index` gets an argument dump.
    pub fn dumps_frame(&self, index: usize) -> bool {
        self.include_argument_dump
            && self
                .dump_depth_threshold
                .is_none_or(|threshold| index <= threshold)
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            include_trace: true,
            include_argument_dump: true,
            dump_size_limit: DEFAULT_DUMP_SIZE_LIMIT,
            dump_depth_threshold: None,
            skip_classes: ClassSet::from_static(Self::DEFAULT_SKIP_CLASSES),
            stop_classes: ClassSet::from_static(Self::DEFAULT_STOP_CLASSES),
            internal_exception_classes: ClassSet::from_static(
                Self::DEFAULT_INTERNAL_EXCEPTION_CLASSES,
            ),
            theme: Theme::ANSI,
        }
    }
}

fn parse_number(option: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        option,
        value: value.to_string(),
    })
}

/// Error returned when an option string cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The option is not recognised.
    UnknownOption(String),
    /// The option expects a non-negative integer.
    InvalidNumber {
        /// The option name.
        option: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownOption(option) => write!(f, "unknown trace option `{option}`"),
            ConfigError::InvalidNumber { option, value } => {
                write!(f, "trace option `{option}` expects a number, got `{value}`")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(feature = "std")]
mod env {
    use alloc::string::String;
    use std::sync::OnceLock;

    use super::{ConfigError, TraceConfig};

    /// Name of the environment variable read by [`TraceConfig::new_from_env`].
    pub const ENV_VAR: &str = "PLAINTRACE";

    static ENV_OPTIONS: OnceLock<Option<String>> = OnceLock::new();

    impl TraceConfig {
        /// Creates the default configuration, adjusted by the options in the
        /// `PLAINTRACE` environment variable.
        ///
        /// The variable is read once per process. If it cannot be parsed, a
        /// warning is logged and the defaults are used.
        pub fn new_from_env() -> Self {
            let options = ENV_OPTIONS.get_or_init(|| {
                std::env::var_os(ENV_VAR).map(|var| var.to_string_lossy().into_owned())
            });

            match options {
                Some(options) => Self::from_options(options).unwrap_or_else(|error: ConfigError| {
                    tracing::warn!(%error, variable = ENV_VAR, "ignoring invalid trace options");
                    Self::default()
                }),
                None => Self::default(),
            }
        }
    }
}

#[cfg(feature = "std")]
pub use self::env::ENV_VAR;
