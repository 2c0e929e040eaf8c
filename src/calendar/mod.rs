// Calendar engine
// Layout, binning and drag logic over normalized events, plus the host-owned state

pub mod drag;
pub mod state;
pub mod views;

pub use drag::{DragController, DragError, DragOutcome, DragPreview};
pub use state::{CalendarHost, CalendarState};
