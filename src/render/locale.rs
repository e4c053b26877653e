//! Display Labels
//!
//! The viewer's own page text in each supported language. Report content is
//! shown as fetched; only labels, date formats and weekday names change.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Language of the viewer's labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-TW", alias = "zh-tw")]
    ZhTw,
}

const ZH_WEEKDAYS: [&str; 7] = ["週日", "週一", "週二", "週三", "週四", "週五", "週六"];

impl Locale {
    /// Parse a config or environment value; case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "zh-tw" | "zh_tw" => Some(Locale::ZhTw),
            _ => None,
        }
    }

    /// BCP 47 tag, used for the page's `lang` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhTw => "zh-TW",
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::ZhTw => &ZH_TW,
        }
    }

    /// `January 2, 2024` or `2024 年 1 月 2 日`
    pub fn date_label(self, date: NaiveDate) -> String {
        match self {
            Locale::En => date.format("%B %-d, %Y").to_string(),
            Locale::ZhTw => format!("{} 年 {} 月 {} 日", date.year(), date.month(), date.day()),
        }
    }

    /// `Tuesday` or `週二`
    pub fn weekday_label(self, date: NaiveDate) -> String {
        match self {
            Locale::En => date.format("%A").to_string(),
            Locale::ZhTw => {
                ZH_WEEKDAYS[date.weekday().num_days_from_sunday() as usize].to_string()
            }
        }
    }

    /// Page title for a channel
    pub fn title(self, channel: &str) -> String {
        format!("{}{}", channel, self.labels().title_suffix)
    }

    pub fn highlight_vod_label(self, title: &str) -> String {
        match self {
            Locale::En => format!("Watch the VOD of {}", title),
            Locale::ZhTw => format!("觀看 {} 的 VOD", title),
        }
    }

    pub fn highlight_clip_label(self, title: &str) -> String {
        match self {
            Locale::En => format!("Watch the clip of {}", title),
            Locale::ZhTw => format!("觀看 {} 的剪輯", title),
        }
    }
}

/// Fixed text of the viewer page
#[derive(Debug)]
pub struct Labels {
    /// Appended to the channel name in the title and heading
    pub title_suffix: &'static str,
    pub loading: &'static str,
    pub empty: &'static str,
    pub days_recorded: &'static str,
    pub older: &'static str,
    pub newer: &'static str,
    pub latest: &'static str,
    pub jump_to_date: &'static str,
    pub hot_topics: &'static str,
    pub new_memes: &'static str,
    pub important_events: &'static str,
    pub highlights: &'static str,
    pub no_topics: &'static str,
    pub no_memes: &'static str,
    pub no_events: &'static str,
    pub no_highlights: &'static str,
    /// Older navigation label at the oldest report
    pub no_earlier: &'static str,
    /// Newer navigation label at the newest report
    pub already_latest: &'static str,
    pub watch: &'static str,
    pub watch_event_vod: &'static str,
    pub watch_vod: &'static str,
    pub watch_clip: &'static str,
    pub video_player: &'static str,
    pub close_player: &'static str,
}

pub static EN: Labels = Labels {
    title_suffix: " daily report",
    loading: "Loading reports…",
    empty: "No reports for this day yet",
    days_recorded: "Days recorded: ",
    older: "← Older",
    newer: "Newer →",
    latest: "Latest",
    jump_to_date: "Jump to date",
    hot_topics: "Hot topics",
    new_memes: "New memes",
    important_events: "Important events",
    highlights: "Highlights",
    no_topics: "No hot topics today",
    no_memes: "No new memes today",
    no_events: "No important events today",
    no_highlights: "No highlights today",
    no_earlier: "No earlier reports",
    already_latest: "Already the latest",
    watch: "Watch",
    watch_event_vod: "Watch the VOD of this event",
    watch_vod: "Watch VOD",
    watch_clip: "Watch clip",
    video_player: "Video player",
    close_player: "Close player",
};

pub static ZH_TW: Labels = Labels {
    title_suffix: " 每日報告",
    loading: "載入中…",
    empty: "這天還沒有報告",
    days_recorded: "已記錄天數：",
    older: "← 較早",
    newer: "較新 →",
    latest: "最新",
    jump_to_date: "跳到日期",
    hot_topics: "熱門話題",
    new_memes: "新迷因",
    important_events: "重要事件",
    highlights: "精華片段",
    no_topics: "今日沒有熱門話題",
    no_memes: "今日沒有新迷因",
    no_events: "今日沒有重要事件",
    no_highlights: "今日沒有精華片段",
    no_earlier: "沒有更早的了",
    already_latest: "已是最新",
    watch: "觀看",
    watch_event_vod: "觀看此事件的 VOD",
    watch_vod: "觀看 VOD",
    watch_clip: "觀看剪輯",
    video_player: "影片播放器",
    close_player: "關閉播放器",
};
