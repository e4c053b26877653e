//! View Ports
//!
//! Named output slots the controller writes to. A surface (HTML page,
//! terminal, test recorder) implements [`ViewPorts`] to display them.

use chrono::NaiveDate;

use crate::player::EmbedRequest;
use crate::render::SummaryView;
use crate::view::{NavigationState, ViewState};

/// Output slots of a viewer surface
pub trait ViewPorts {
    fn set_channel(&mut self, channel: &str);

    fn set_title(&mut self, title: &str);

    /// Show exactly one state panel; date navigation follows
    /// [`ViewState::shows_date_nav`]
    fn show_state(&mut self, state: ViewState);

    fn set_error_message(&mut self, message: &str);

    fn set_total_days(&mut self, total: u64);

    fn set_date_bounds(&mut self, oldest: NaiveDate, newest: NaiveDate);

    fn set_picker_value(&mut self, date: NaiveDate);

    fn set_navigation(&mut self, navigation: &NavigationState);

    fn set_summary(&mut self, summary: &SummaryView);

    /// Show the modal player and suspend page scroll
    fn show_player(&mut self, embed: &EmbedRequest);

    /// Clear the player and restore page scroll
    fn hide_player(&mut self);
}

/// Records the latest value written to every slot.
///
/// Used by the HTML page renderer and by tests.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub channel: String,
    pub title: String,
    pub state: ViewState,
    pub date_nav_visible: bool,
    pub error_message: Option<String>,
    pub total_days: Option<u64>,
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    pub picker_value: Option<NaiveDate>,
    pub navigation: Option<NavigationState>,
    pub summary: Option<SummaryView>,
    pub player: Option<EmbedRequest>,
    pub scroll_locked: bool,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            channel: String::new(),
            title: String::new(),
            state: ViewState::Loading,
            date_nav_visible: false,
            error_message: None,
            total_days: None,
            date_bounds: None,
            picker_value: None,
            navigation: None,
            summary: None,
            player: None,
            scroll_locked: false,
        }
    }
}

impl PageSnapshot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewPorts for PageSnapshot {
    fn set_channel(&mut self, channel: &str) {
        self.channel = channel.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn show_state(&mut self, state: ViewState) {
        self.state = state;
        self.date_nav_visible = state.shows_date_nav();
    }

    fn set_error_message(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    fn set_total_days(&mut self, total: u64) {
        self.total_days = Some(total);
    }

    fn set_date_bounds(&mut self, oldest: NaiveDate, newest: NaiveDate) {
        self.date_bounds = Some((oldest, newest));
    }

    fn set_picker_value(&mut self, date: NaiveDate) {
        self.picker_value = Some(date);
    }

    fn set_navigation(&mut self, navigation: &NavigationState) {
        self.navigation = Some(navigation.clone());
    }

    fn set_summary(&mut self, summary: &SummaryView) {
        self.summary = Some(summary.clone());
    }

    fn show_player(&mut self, embed: &EmbedRequest) {
        self.player = Some(embed.clone());
        self.scroll_locked = true;
    }

    fn hide_player(&mut self) {
        self.player = None;
        self.scroll_locked = false;
    }
}
