//! Screen and data state for the stop list, arrivals and line browsing.
//!
//! Every fetch is tagged with a [`RequestToken`]; views only accept the
//! response for the token they issued last.

pub mod arrivals;
pub mod lines;
pub mod selection;
pub mod token;

pub use arrivals::{ArrivalsSnapshot, ArrivalsView};
pub use lines::{LinesScreen, LinesSnapshot, LinesView};
pub use selection::{
    Screen, SelectionFlow, SelectionListener, SelectionNotice, SelectionState, Transition,
};
pub use token::{ApplyOutcome, RequestToken, RequestTracker};
