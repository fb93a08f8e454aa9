//! Entity module - Contains the records the backend serves.
//! These are read-mostly copies: the backend owns their lifecycle and the view layer
//! replaces them wholesale on every reload.

pub mod agreement;
pub mod calendar_event;

pub use agreement::{Agreement, Currency};
pub use calendar_event::{CalendarEvent, EventType};
