//! Selecting and rendering the frames of a stack trace.
//!
//! [`FrameFilter`] decides which frames are shown and [`FrameFormatter`]
//! turns each shown frame into a line of the trace.

mod filter;
mod formatter;

pub use self::{
    filter::{FrameDecision, FrameFilter, RetainedFrames},
    formatter::{DUMP_LINE_PREFIX, FrameFormatter},
};
