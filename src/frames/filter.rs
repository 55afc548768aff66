//! Choosing which stack frames appear in a trace.

use crate::{
    config::{ClassSet, TraceConfig},
    exception::StackFrame,
};

/// What to do with a stack frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameDecision {
    /// Show the frame.
    Continue,
    /// Hide the frame and move on to the next one.
    Skip,
    /// Hide the frame and every frame after it.
    Stop,
}

/// Decides per frame whether it is shown, hidden, or ends the trace.
///
/// Frames are matched on their declaring class. A class in both sets is
/// skipped.
///
/// # Examples
///
/// ```
/// use plaintrace::{
///     config::ClassSet,
///     exception::StackFrame,
///     frames::{FrameDecision, FrameFilter},
/// };
///
/// let skip = ClassSet::from_static(&["Handler"]);
/// let stop = ClassSet::from_static(&["Runner"]);
/// let filter = FrameFilter::new(&skip, &stop);
///
/// let frames = [
///     StackFrame::method("Handler", "handle"),
///     StackFrame::method("App", "run"),
///     StackFrame::method("Runner", "start"),
///     StackFrame::function("main"),
/// ];
/// assert_eq!(filter.decide(&frames[0]), FrameDecision::Skip);
///
/// let retained: Vec<_> = filter
///     .retain(&frames)
///     .map(|(index, frame)| (index, frame.function.as_deref()))
///     .collect();
/// assert_eq!(retained, [(1, Some("run"))]);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct FrameFilter<'a> {
    skip_classes: &'a ClassSet,
    stop_classes: &'a ClassSet,
}

impl<'a> FrameFilter<'a> {
    /// Creates a filter hiding frames of `skip_classes` and ending the trace
    /// at frames of `stop_classes`.
    pub const fn new(skip_classes: &'a ClassSet, stop_classes: &'a ClassSet) -> Self {
        Self {
            skip_classes,
            stop_classes,
        }
    }

    /// Creates a filter using the class sets of `config`.
    pub const fn from_config(config: &'a TraceConfig) -> Self {
        Self::new(&config.skip_classes, &config.stop_classes)
    }

    /// Decides what to do with `frame`.
    pub fn decide(&self, frame: &StackFrame) -> FrameDecision {
        match frame.class.as_deref() {
            Some(class) if self.skip_classes.contains(class) => FrameDecision::Skip,
            Some(class) if self.stop_classes.contains(class) => FrameDecision::Stop,
            _ => FrameDecision::Continue,
        }
    }

    /// Iterates over the frames to show, paired with their 1-based index.
    ///
    /// Skipped frames do not use up an index, and no frame is examined after
    /// the first stop.
    pub fn retain<'f>(self, frames: &'f [StackFrame]) -> RetainedFrames<'a, 'f> {
        RetainedFrames {
            filter: self,
            frames: frames.iter(),
            next_index: 1,
        }
    }
}

/// Iterator returned by [`FrameFilter::retain`].
#[derive(Clone, Debug)]
pub struct RetainedFrames<'a, 'f> {
    filter: FrameFilter<'a>,
    frames: core::slice::Iter<'f, StackFrame>,
    next_index: usize,
}

impl<'f> Iterator for RetainedFrames<'_, 'f> {
    type Item = (usize, &'f StackFrame);

    fn next(&mut self) -> Option<Self::Item> {
        for frame in self.frames.by_ref() {
            match self.filter.decide(frame) {
                FrameDecision::Continue => {
                    let index = self.next_index;
                    self.next_index += 1;
                    return Some((index, frame));
                }
                FrameDecision::Skip => {
                    tracing::trace!(class = ?frame.class, "skipping internal frame");
                }
                FrameDecision::Stop => {
                    tracing::debug!(
                        class = ?frame.class,
                        remaining = self.frames.len(),
                        "stack trace stopped at boundary frame"
                    );
                    self.frames = [].iter();
                    return None;
                }
            }
        }
        None
    }
}

impl core::iter::FusedIterator for RetainedFrames<'_, '_> {}
