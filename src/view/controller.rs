//! View Controller
//!
//! Owns the view state of one viewer session (channel, date index, cursor,
//! player) and publishes every change through [`ViewPorts`].

use chrono::NaiveDate;

use crate::index::{DateIndex, NavigationCursor};
use crate::model::Channel;
use crate::player::{PlayerKind, PlayerOverlay};
use crate::render::{self, Locale, SummaryView};
use crate::source::{Summaries, SummarySource};
use crate::view::{Key, NavTarget, NavigationState, ViewPorts, ViewState};

/// Viewer session state machine
pub struct ViewController<P: ViewPorts> {
    ports: P,
    channel: Channel,
    /// Host allowed to embed the player
    embed_parent: String,
    locale: Locale,
    index: DateIndex,
    cursor: Option<NavigationCursor>,
    summary: Option<SummaryView>,
    state: ViewState,
    /// Set once the session's single fetch has started
    loaded: bool,
    player: PlayerOverlay,
}

impl<P: ViewPorts> ViewController<P> {
    /// Create a controller and publish the channel and page title
    pub fn new(mut ports: P, channel: Channel, embed_parent: impl Into<String>) -> Self {
        ports.set_channel(channel.as_str());
        ports.set_title(&Locale::default().title(channel.as_str()));

        Self {
            ports,
            channel,
            embed_parent: embed_parent.into(),
            locale: Locale::default(),
            index: DateIndex::default(),
            cursor: None,
            summary: None,
            state: ViewState::Loading,
            loaded: false,
            player: PlayerOverlay::new(),
        }
    }

    /// Switch the label language and republish the title
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self.ports.set_title(&locale.title(self.channel.as_str()));
        self
    }

    /// Run the single load of this session. Later calls return the
    /// current state without fetching.
    pub async fn load(&mut self, source: &dyn SummarySource) -> ViewState {
        if self.loaded {
            tracing::debug!(channel = %self.channel, "Summaries already loaded");
            return self.state;
        }
        self.loaded = true;
        self.show(ViewState::Loading);
        tracing::info!(channel = %self.channel, source = source.name(), "Loading summaries");

        match source.fetch_all(&self.channel).await {
            Ok(summaries) => self.apply(summaries),
            Err(e) => {
                tracing::error!(channel = %self.channel, error = %e, "Failed to load summaries");
                self.ports.set_error_message(&e.to_string());
                self.show(ViewState::Error);
            }
        }

        self.state
    }

    fn apply(&mut self, summaries: Summaries) {
        self.ports.set_total_days(summaries.total);

        if summaries.is_empty() {
            tracing::info!(channel = %self.channel, "No summaries available");
            self.show(ViewState::Empty);
            return;
        }

        self.index = DateIndex::build(summaries.records);
        tracing::info!(channel = %self.channel, days = self.index.len(), "Summaries loaded");

        if let (Some(oldest), Some(newest)) = (self.index.oldest(), self.index.newest()) {
            self.ports.set_date_bounds(oldest, newest);
            self.navigate_to(newest);
        }
    }

    // ============================================
    // Navigation
    // ============================================

    /// Step to the next older report
    pub fn older(&mut self) -> bool {
        match self.cursor.and_then(|c| self.index.older(c.position)) {
            Some(date) => self.navigate_to(date),
            None => false,
        }
    }

    /// Step to the next newer report
    pub fn newer(&mut self) -> bool {
        match self.cursor.and_then(|c| self.index.newer(c.position)) {
            Some(date) => self.navigate_to(date),
            None => false,
        }
    }

    /// Jump to the newest report
    pub fn latest(&mut self) -> bool {
        match self.index.newest() {
            Some(date) => self.navigate_to(date),
            None => false,
        }
    }

    /// Date picker selection; dates without a report snap to the nearest one
    pub fn pick_date(&mut self, date: NaiveDate) -> bool {
        let target = if self.index.contains(date) {
            Some(date)
        } else {
            self.index.nearest(date)
        };

        match target {
            Some(target) => {
                if target != date {
                    tracing::debug!(requested = %date, resolved = %target, "Snapped to nearest report");
                }
                self.navigate_to(target)
            }
            None => false,
        }
    }

    /// Keyboard input. Returns whether the key did something.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if self.player.is_open() {
            return key == Key::Escape && self.close_player();
        }

        match key {
            Key::ArrowLeft => self.older(),
            Key::ArrowRight => self.newer(),
            Key::Escape => false,
        }
    }

    fn navigate_to(&mut self, date: NaiveDate) -> bool {
        let Some(cursor) = self.index.cursor_at(date) else {
            self.summary = None;
            self.show(ViewState::Empty);
            return false;
        };
        let Some(record) = self.index.get(date) else {
            return false;
        };

        let summary = render::render_summary(record, self.locale);
        let navigation = self.navigation_for(cursor);

        self.cursor = Some(cursor);
        self.ports.set_picker_value(date);
        self.ports.set_navigation(&navigation);
        self.ports.set_summary(&summary);
        self.summary = Some(summary);
        self.show(ViewState::Content);
        true
    }

    fn navigation_for(&self, cursor: NavigationCursor) -> NavigationState {
        let labels = self.locale.labels();
        let older = self.index.older(cursor.position);
        let newer = self.index.newer(cursor.position);

        NavigationState {
            older: NavTarget {
                date: older,
                label: older
                    .map(|date| self.locale.date_label(date))
                    .unwrap_or_else(|| labels.no_earlier.to_string()),
            },
            newer: NavTarget {
                date: newer,
                label: newer
                    .map(|date| self.locale.date_label(date))
                    .unwrap_or_else(|| labels.already_latest.to_string()),
            },
        }
    }

    fn show(&mut self, state: ViewState) {
        self.state = state;
        self.ports.show_state(state);
    }

    // ============================================
    // Player
    // ============================================

    /// Open the player for a link; unrecognized links are a no-op
    pub fn open_player(&mut self, kind: PlayerKind, url: &str) -> bool {
        match self.player.open(kind, url, &self.embed_parent) {
            Some(embed) => {
                self.ports.show_player(embed);
                true
            }
            None => false,
        }
    }

    pub fn open_vod(&mut self, url: &str) -> bool {
        self.open_player(PlayerKind::Vod, url)
    }

    pub fn open_clip(&mut self, url: &str) -> bool {
        self.open_player(PlayerKind::Clip, url)
    }

    /// Open the n-th player button (0-based) of the current summary
    pub fn open_action(&mut self, n: usize) -> bool {
        let action = self
            .summary
            .as_ref()
            .and_then(|summary| summary.actions().into_iter().nth(n));

        match action {
            Some(action) => self.open_player(action.kind, &action.link),
            None => false,
        }
    }

    pub fn close_player(&mut self) -> bool {
        if self.player.close() {
            self.ports.hide_player();
            true
        } else {
            false
        }
    }

    // ============================================
    // Accessors
    // ============================================

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    pub fn cursor(&self) -> Option<NavigationCursor> {
        self.cursor
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.cursor.map(|c| c.date)
    }

    pub fn summary(&self) -> Option<&SummaryView> {
        self.summary.as_ref()
    }

    pub fn is_player_open(&self) -> bool {
        self.player.is_open()
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn into_ports(self) -> P {
        self.ports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::locale::{EN, ZH_TW};
    use crate::source::{SourceError, StaticSource};
    use crate::view::PageSnapshot;
    use async_trait::async_trait;

    const TWO_DAYS: &str = r#"{
        "success": true,
        "total": 2,
        "summaries": [
            {
                "date": "2024-01-02",
                "hot_topics": [{"topic": "Ranked", "description": "Hit Diamond"}],
                "important_events": [{"event": "Raid", "vod_url": "https://www.twitch.tv/videos/555?t=1h2m3s"}],
                "highlights": [{"title": "Ace", "description": "1v5", "clip_url": "https://clips.twitch.tv/AceClip"}]
            },
            {"date": "2024-01-01"}
        ]
    }"#;

    struct FailingSource;

    #[async_trait]
    impl SummarySource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_all(&self, _channel: &Channel) -> Result<Summaries, SourceError> {
            Err(SourceError::Http {
                status: 500,
                reason: "Internal Server Error".to_string(),
            })
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn controller() -> ViewController<PageSnapshot> {
        ViewController::new(PageSnapshot::new(), Channel::default(), "reports.example.com")
    }

    async fn loaded(json: &str) -> ViewController<PageSnapshot> {
        let source = StaticSource::from_json(json).unwrap();
        let mut controller = controller();
        controller.load(&source).await;
        controller
    }

    #[test]
    fn test_new_publishes_channel() {
        let controller = ViewController::new(
            PageSnapshot::new(),
            Channel::from_query(Some("ShroudTV")),
            "localhost",
        );
        assert_eq!(controller.ports().channel, "shroudtv");
        assert_eq!(controller.ports().title, "shroudtv daily report");
        assert_eq!(controller.state(), ViewState::Loading);
        assert!(!controller.ports().date_nav_visible);
    }

    #[tokio::test]
    async fn test_empty_result() {
        let controller = loaded(r#"{"success": true, "total": 0, "summaries": []}"#).await;

        let ports = controller.ports();
        assert_eq!(controller.state(), ViewState::Empty);
        assert_eq!(ports.state, ViewState::Empty);
        assert!(ports.date_nav_visible);
        assert_eq!(ports.total_days, Some(0));
        assert!(ports.summary.is_none());
        assert!(ports.date_bounds.is_none());
    }

    #[tokio::test]
    async fn test_rejected_payload() {
        let controller = loaded(r#"{"success": false, "detail": "boom"}"#).await;

        assert_eq!(controller.state(), ViewState::Error);
        assert_eq!(controller.ports().error_message.as_deref(), Some("boom"));
        assert!(!controller.ports().date_nav_visible);
    }

    #[tokio::test]
    async fn test_http_failure() {
        let mut controller = controller();
        let state = controller.load(&FailingSource).await;

        assert_eq!(state, ViewState::Error);
        assert_eq!(
            controller.ports().error_message.as_deref(),
            Some("HTTP 500: Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_initial_render_and_older() {
        let mut controller = loaded(TWO_DAYS).await;

        assert_eq!(controller.state(), ViewState::Content);
        assert_eq!(controller.current_date(), Some(day("2024-01-02")));
        {
            let ports = controller.ports();
            assert_eq!(ports.date_bounds, Some((day("2024-01-01"), day("2024-01-02"))));
            assert_eq!(ports.picker_value, Some(day("2024-01-02")));
            assert_eq!(ports.total_days, Some(2));
            let nav = ports.navigation.as_ref().unwrap();
            assert!(!nav.newer.enabled());
            assert_eq!(nav.newer.label, EN.already_latest);
            assert!(nav.older.enabled());
            assert_eq!(nav.older.label, "January 1, 2024");
        }

        assert!(controller.older());
        assert_eq!(controller.current_date(), Some(day("2024-01-01")));
        let nav = controller.ports().navigation.clone().unwrap();
        assert!(!nav.older.enabled());
        assert_eq!(nav.older.label, EN.no_earlier);
        assert!(nav.newer.enabled());

        // Already at the oldest
        assert!(!controller.older());
        assert_eq!(controller.current_date(), Some(day("2024-01-01")));
        assert_eq!(controller.state(), ViewState::Content);
    }

    #[tokio::test]
    async fn test_newer_and_latest() {
        let mut controller = loaded(TWO_DAYS).await;

        assert!(!controller.newer());
        assert!(controller.older());
        assert!(controller.newer());
        assert_eq!(controller.current_date(), Some(day("2024-01-02")));

        controller.older();
        assert!(controller.latest());
        assert_eq!(controller.current_date(), Some(day("2024-01-02")));
    }

    #[tokio::test]
    async fn test_pick_date_snaps() {
        let mut controller = loaded(
            r#"{"success": true, "total": 3, "summaries": [
                {"date": "2024-01-10"}, {"date": "2024-01-05"}, {"date": "2024-01-01"}
            ]}"#,
        )
        .await;

        assert!(controller.pick_date(day("2024-01-07")));
        assert_eq!(controller.current_date(), Some(day("2024-01-05")));
        assert_eq!(controller.ports().picker_value, Some(day("2024-01-05")));

        controller.pick_date(day("2023-06-01"));
        assert_eq!(controller.current_date(), Some(day("2024-01-01")));

        controller.pick_date(day("2025-01-01"));
        assert_eq!(controller.current_date(), Some(day("2024-01-10")));

        controller.pick_date(day("2024-01-01"));
        assert_eq!(controller.cursor().unwrap().position, 2);
    }

    #[tokio::test]
    async fn test_navigation_before_load_is_noop() {
        let mut controller = controller();
        assert!(!controller.older());
        assert!(!controller.latest());
        assert!(!controller.pick_date(day("2024-01-01")));
        assert_eq!(controller.state(), ViewState::Loading);
    }

    #[tokio::test]
    async fn test_keyboard_navigation() {
        let mut controller = loaded(TWO_DAYS).await;

        assert!(controller.handle_key(Key::ArrowLeft));
        assert_eq!(controller.current_date(), Some(day("2024-01-01")));
        assert!(controller.handle_key(Key::ArrowRight));
        assert_eq!(controller.current_date(), Some(day("2024-01-02")));
        assert!(!controller.handle_key(Key::Escape));
    }

    #[tokio::test]
    async fn test_player_suppresses_arrows() {
        let mut controller = loaded(TWO_DAYS).await;

        assert!(controller.open_vod("https://twitch.tv/x/videos/12345?t=1h2m3s"));
        assert!(controller.ports().scroll_locked);
        assert_eq!(
            controller.ports().player.as_ref().unwrap().src,
            "https://player.twitch.tv/?video=v12345&parent=reports.example.com&autoplay=true&time=1h2m3s"
        );

        assert!(!controller.handle_key(Key::ArrowLeft));
        assert_eq!(controller.current_date(), Some(day("2024-01-02")));

        assert!(controller.handle_key(Key::Escape));
        assert!(!controller.is_player_open());
        assert!(!controller.ports().scroll_locked);
        assert!(controller.ports().player.is_none());
    }

    #[tokio::test]
    async fn test_bad_link_is_noop() {
        let mut controller = loaded(TWO_DAYS).await;

        assert!(!controller.open_vod("https://twitch.tv/x"));
        assert!(!controller.open_clip("not a link"));
        assert!(!controller.is_player_open());
        assert!(controller.ports().player.is_none());
        assert!(!controller.close_player());
    }

    #[tokio::test]
    async fn test_open_action() {
        let mut controller = loaded(TWO_DAYS).await;

        assert!(controller.open_action(1));
        assert_eq!(
            controller.ports().player.as_ref().unwrap().src,
            "https://clips.twitch.tv/embed?clip=AceClip&parent=reports.example.com&autoplay=true"
        );
        controller.close_player();

        assert!(!controller.open_action(5));
    }

    #[tokio::test]
    async fn test_loads_once() {
        let source = StaticSource::from_json(TWO_DAYS).unwrap();
        let mut controller = controller();
        controller.load(&source).await;

        controller.older();
        controller.newer();
        controller.pick_date(day("2024-01-01"));
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_second_load_is_ignored() {
        let source = StaticSource::from_json(TWO_DAYS).unwrap();
        let mut controller = controller();
        controller.load(&source).await;
        controller.older();

        assert_eq!(controller.load(&FailingSource).await, ViewState::Content);
        assert_eq!(controller.load(&source).await, ViewState::Content);
        assert_eq!(source.fetch_count(), 1);
        assert_eq!(controller.current_date(), Some(day("2024-01-01")));
        assert!(controller.ports().error_message.is_none());
    }

    #[tokio::test]
    async fn test_failed_load_is_not_retried() {
        let source = StaticSource::from_json(TWO_DAYS).unwrap();
        let mut controller = controller();

        assert_eq!(controller.load(&FailingSource).await, ViewState::Error);
        assert_eq!(controller.load(&source).await, ViewState::Error);
        assert_eq!(source.fetch_count(), 0);
        assert!(controller.summary().is_none());
    }

    #[tokio::test]
    async fn test_locale_labels() {
        let source = StaticSource::from_json(TWO_DAYS).unwrap();
        let mut controller = controller().with_locale(Locale::ZhTw);
        assert_eq!(controller.ports().title, "godjj 每日報告");

        controller.load(&source).await;
        let nav = controller.ports().navigation.clone().unwrap();
        assert_eq!(nav.newer.label, ZH_TW.already_latest);
        assert_eq!(nav.older.label, "2024 年 1 月 1 日");
        assert_eq!(controller.summary().unwrap().weekday, "週二");

        controller.older();
        let nav = controller.ports().navigation.clone().unwrap();
        assert_eq!(nav.older.label, ZH_TW.no_earlier);
    }
}
