//! # Daily Report
//!
//! Viewer for per-date channel summaries ("daily reports"). All summaries
//! of a channel are fetched once, indexed by date, and browsed one day at a
//! time with older/newer navigation, a date picker that snaps to the
//! nearest report, and an embedded VOD/clip player.
//!
//! ## Modules
//!
//! - [`model`]: summary records and the endpoint payload
//! - [`source`]: where summaries come from (HTTP endpoint or a saved file)
//! - [`index`]: date ordering, nearest-date lookup and navigation
//! - [`render`]: typed render tree, report sections and the HTML page
//! - [`player`]: VOD/clip link parsing and embed URLs
//! - [`view`]: the view controller and its output ports
//! - [`api`]: the viewer server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use daily_report::model::Channel;
//! use daily_report::source::{HttpSummarySource, SourceConfig};
//! use daily_report::view::{PageSnapshot, ViewController};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = HttpSummarySource::new(SourceConfig::default());
//!     let mut viewer = ViewController::new(PageSnapshot::new(), Channel::default(), "localhost");
//!
//!     viewer.load(&source).await;
//!     viewer.older();
//!
//!     if let Some(summary) = viewer.summary() {
//!         println!("{} {}", summary.date_label, summary.hot_topics.to_plain());
//!     }
//! }
//! ```

pub mod api;
pub mod config;
pub mod index;
pub mod logging;
pub mod model;
pub mod player;
pub mod render;
pub mod source;
pub mod view;

pub use config::Config;
pub use model::{Channel, SummaryRecord};
pub use source::{SourceError, SummarySource};
pub use view::{PageSnapshot, ViewController, ViewPorts};
