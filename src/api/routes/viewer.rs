//! Viewer Route
//!
//! GET / renders the report page for `?channel=&date=`. Each request runs
//! its own controller against a [`PageSnapshot`], so the summary endpoint
//! is fetched once per page load. A `date` that does not parse is ignored
//! and the newest report is shown.

use axum::{
    extract::{Query, State},
    http::{header::HOST, HeaderMap},
    response::Html,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::model::Channel;
use crate::render::{render_page, LinkStyle, PageOptions};
use crate::view::{PageSnapshot, ViewController};

/// Viewer query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    pub channel: Option<String>,
    /// `YYYY-MM-DD`, snapped to the nearest available report
    pub date: Option<String>,
}

/// GET /
pub async fn viewer_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ViewerQuery>,
) -> Html<String> {
    let requested = parse_date(query.date.as_deref());
    let channel = Channel::from_query_or(
        query.channel.as_deref(),
        &state.config.source.default_channel,
    );
    let host = headers.get(HOST).and_then(|value| value.to_str().ok());
    let embed_parent = state.embed_parent(host);

    let locale = state.config.viewer.locale;
    let mut controller = ViewController::new(PageSnapshot::new(), channel, embed_parent.clone())
        .with_locale(locale);
    controller.load(state.source.as_ref()).await;

    if let Some(date) = requested {
        controller.pick_date(date);
    }

    tracing::debug!(
        channel = %controller.channel(),
        state = controller.state().as_str(),
        date = ?controller.current_date(),
        "Rendering viewer page"
    );

    let snapshot = controller.into_ports();
    let options = PageOptions {
        embed_parent,
        links: LinkStyle::Query,
        locale,
    };
    Html(render_page(&snapshot, &options))
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let text = value.map(str::trim).filter(|text| !text.is_empty())?;
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::debug!(date = text, "Ignoring unparsable date");
            None
        }
    }
}
