//! Viewer Controller
//!
//! Drives a report viewer session: one fetch, then synchronous navigation
//! and re-rendering through a [`ViewPorts`] implementation.
//!
//! ## State machine
//!
//! ```text
//! loading ──┬──> content  (navigation stays here)
//!           ├──> empty    (navigation stays here)
//!           └──> error    (initial load only)
//! ```

mod controller;
mod ports;

pub use controller::ViewController;
pub use ports::{PageSnapshot, ViewPorts};

use chrono::NaiveDate;

/// Which top-level panel is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error,
    Empty,
    Content,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error => "error",
            ViewState::Empty => "empty",
            ViewState::Content => "content",
        }
    }

    /// Date navigation is only offered once data has loaded
    pub fn shows_date_nav(&self) -> bool {
        matches!(self, ViewState::Empty | ViewState::Content)
    }
}

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Enabled state and label of one navigation direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTarget {
    pub date: Option<NaiveDate>,
    pub label: String,
}

impl NavTarget {
    pub fn enabled(&self) -> bool {
        self.date.is_some()
    }
}

/// Both navigation directions for the current date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub older: NavTarget,
    pub newer: NavTarget,
}
