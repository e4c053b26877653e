//! Report Date Index
//!
//! Navigation structures over the fetched summary records:
//!
//! - **DateIndex**: dates newest first plus date → record lookup
//! - **NavigationCursor**: the currently displayed date and its position
//!
//! # Layout
//!
//! ```text
//! position:   0            1            2
//! dates:      2024-01-05   2024-01-03   2024-01-01
//!             newest  <- newer | older ->  oldest
//! ```

mod date_index;

pub use date_index::{DateIndex, NavigationCursor};
