//! The failure being reported and the call stack that led to it.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::value::Value;

/// The error being reported.
///
/// File and line are optional: reports are often produced while something
/// else is already failing, so whatever is known gets rendered and the rest
/// is left blank.
#[derive(Clone, Debug, PartialEq)]
pub struct Exception {
    /// Fully qualified class name of the error.
    pub class_name: String,
    /// The error message.
    pub message: String,
    /// File the error originated from.
    pub file: Option<String>,
    /// Line the error originated from.
    pub line: Option<u32>,
}

impl Exception {
    /// Creates an exception of class `class_name` without a location.
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
            file: None,
            line: None,
        }
    }

    /// Sets the location the exception originated from.
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Describes a Rust error raised at the caller's location.
    ///
    /// The class name is the error's type name and the message is its
    /// [`Display`](core::fmt::Display) output.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaintrace::exception::Exception;
    ///
    /// let error = "12a".parse::<u8>().unwrap_err();
    /// let exception = Exception::from_error(&error);
    /// assert!(exception.class_name.ends_with("ParseIntError"));
    /// assert_eq!(exception.message, "invalid digit found in string");
    /// assert_eq!(exception.line, Some(line!() - 3));
    /// ```
    #[track_caller]
    pub fn from_error<E: core::error::Error>(error: &E) -> Self {
        let location = core::panic::Location::caller();
        Self::new(core::any::type_name::<E>(), error.to_string())
            .with_location(location.file(), location.line())
    }
}

/// One active call at the moment of failure.
///
/// Frames are ordered innermost call first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackFrame {
    /// The class declaring the called function, if it is a method or
    /// constructor.
    pub class: Option<String>,
    /// The called function. A frame with a class but no function is a
    /// constructor call.
    pub function: Option<String>,
    /// The call arguments.
    pub args: Vec<Value>,
    /// File of the call site.
    pub file: Option<String>,
    /// Line of the call site.
    pub line: Option<u32>,
}

impl StackFrame {
    /// A call to the free function `function`.
    pub fn function(function: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            ..Self::default()
        }
    }

    /// A call to `class->function`.
    pub fn method(class: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            function: Some(function.into()),
            ..Self::default()
        }
    }

    /// A `new class` constructor call.
    pub fn constructor(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Sets the call arguments.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the call site.
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}
