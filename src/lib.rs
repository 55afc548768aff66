#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Colorized plain-text reports of exceptions and their stack traces.
//!
//! ## Overview
//!
//! This crate turns an exception and the stack frames it was raised through
//! into a report meant to be written straight to a terminal: the exception
//! message and origin, followed by one line per frame showing the call, its
//! arguments and its location.
//!
//! Capturing the exception and walking the stack are left to the caller.
//! Frames arrive as plain data ([`StackFrame`]), with their arguments
//! snapshotted as [`Value`]s, so the same formatter works for errors raised
//! in embedded interpreters, scripting hosts or Rust code alike.
//!
//! ## Quick Example
//!
//! ```
//! use plaintrace::{Exception, StackFrame, TraceConfig, Value, format_report};
//!
//! let exception = Exception::new("RuntimeError", "boom").with_location("a.ext", 10);
//! let frames = [
//!     StackFrame::method("App", "run")
//!         .with_args([Value::from(1), Value::from("x")])
//!         .at("a.ext", 5),
//! ];
//!
//! let report = format_report(&exception, &frames, &TraceConfig::default());
//! print!("{report}");
//! ```
//!
//! Which prints, with colors:
//!
//! ```text
//! RuntimeError: boom in file a.ext on line 10
//! Stack trace:
//!   1. App->run( 1, 'x' )   a.ext:5
//!    | array(2) {
//!    |   [0]=>
//!    |   int(1)
//!    |   [1]=>
//!    |   string(1) "x"
//!    | }
//! ```
//!
//! ## Core Concepts
//!
//! - [`value`]: the snapshot of a call argument. Collections and objects are
//!   rendered in a compact form when they are short and one entry per line
//!   when they are not.
//! - [`frames`]: frames of the error handler itself are skipped, and the
//!   trace stops at the first frame belonging to the command runner that
//!   invoked the failing code.
//! - [`dump`]: besides the compact rendering, each frame can carry a full
//!   structural dump of its arguments, discarded when it grows too large.
//! - [`config`]: what the report contains, configurable in code, through an
//!   option string or through the `PLAINTRACE` environment variable.
//!
//! ## Features
//!
//! - `std` (default): reading the configuration from the environment.
//!   Without it the crate is `no_std` and only needs `alloc`.
//!
//! ## Logging
//!
//! Decisions that change what the report shows, such as frames skipped or a
//! dump discarded, are logged through [`tracing`]. No subscriber is
//! installed by this crate.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod dump;
pub mod exception;
pub mod frames;
pub mod render;
pub mod report;
pub mod theme;
pub mod value;
pub mod visibility;

mod util;

pub use self::{
    config::{ClassSet, ConfigError, TraceConfig},
    exception::{Exception, StackFrame},
    report::{TraceReport, format_report},
    value::{Key, ObjectValue, Value},
    visibility::Visibility,
};
