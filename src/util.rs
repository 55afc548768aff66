use core::fmt::{self, Write};

/// Wraps a formatting closure and its state into a value implementing
/// [`Display`](fmt::Display).
pub(crate) fn display_helper<State, DisplayFn>(
    state: State,
    display_fn: DisplayFn,
) -> impl fmt::Display
where
    State: Copy,
    for<'a, 'b> DisplayFn: Fn(State, &'a mut fmt::Formatter<'b>) -> fmt::Result,
{
    DisplayHelper { state, display_fn }
}

struct DisplayHelper<State, DisplayFn> {
    state: State,
    display_fn: DisplayFn,
}

impl<State, DisplayFn> fmt::Display for DisplayHelper<State, DisplayFn>
where
    State: Copy,
    for<'a, 'b> DisplayFn: Fn(State, &'a mut fmt::Formatter<'b>) -> fmt::Result,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.display_fn)(self.state, f)
    }
}

/// Displays the wrapped value, or nothing when it is absent.
#[derive(Copy, Clone)]
pub(crate) struct OrBlank<'a, T>(pub(crate) &'a Option<T>);

impl<T: fmt::Display> fmt::Display for OrBlank<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => Ok(()),
        }
    }
}

pub(crate) fn write_indent(f: &mut dyn Write, width: usize) -> fmt::Result {
    write!(f, "{:width$}", "")
}
