//! The hand-rolled replacement for the original's suspendable generator.
//!
//! Each request's logic is an explicit state machine rather than a stackful
//! coroutine: `step(state, input) -> Step<Event, Response>` is called
//! repeatedly by the driver. `Step` is the systems-language rendering of
//! "yield an event, suspend for data, or terminate with a result" called for
//! in the design notes.

use crate::error::Closed;

/// One state transition of a request's protocol state machine.
#[derive(Debug)]
pub enum Step<Event, Response> {
    /// Emit `Event` to the facade/host, then resume the state machine
    /// immediately (no data was consumed).
    Yield(Event),
    /// Suspend until the driver has a new line of input.
    NeedData,
    /// Terminate successfully with the given `Response`.
    Done(Response),
    /// Terminate the whole connection.
    Fail(Closed),
}
