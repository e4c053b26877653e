//! Rendering
//!
//! - [`node`]: typed render tree with escaping serialization
//! - [`summary`]: per-section fragments for one report
//! - [`page`]: the complete viewer document
//! - [`locale`]: page labels and date formats per language

pub mod locale;
pub mod node;
pub mod page;
pub mod summary;

pub use locale::{Labels, Locale};
pub use node::{escape, Element, Node};
pub use page::{render_page, LinkStyle, PageOptions};
pub use summary::{
    render_events, render_highlights, render_hot_topics, render_new_memes, render_summary,
    PlayerAction, Section, SummaryView,
};
