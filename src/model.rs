//! Summary Data Model
//!
//! Wire and domain types for per-date channel summaries. These types are
//! deserialized straight from the summary endpoint and stay immutable once
//! fetched.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Channel used when the request does not name one
pub const DEFAULT_CHANNEL: &str = "godjj";

// ============================================
// Channel
// ============================================

/// Lowercased channel identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Channel(String);

impl Channel {
    /// Resolve a channel from an optional query value.
    ///
    /// Absent or blank values fall back to [`DEFAULT_CHANNEL`].
    pub fn from_query(value: Option<&str>) -> Self {
        Self::from_query_or(value, DEFAULT_CHANNEL)
    }

    /// Like [`Channel::from_query`] with a configured fallback
    pub fn from_query_or(value: Option<&str>, fallback: &str) -> Self {
        match value.map(str::trim) {
            Some(name) if !name.is_empty() => Self(name.to_lowercase()),
            _ if !fallback.trim().is_empty() => Self(fallback.trim().to_lowercase()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self(DEFAULT_CHANNEL.to_string())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================
// Summary record
// ============================================

/// One day's aggregated report for a channel
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SummaryRecord {
    /// Calendar date of the report (`YYYY-MM-DD`)
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hot_topics: Vec<HotTopic>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_memes: Vec<NewMeme>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub important_events: Vec<EventEntry>,
    /// `None` when the record carries no highlights field at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<Highlight>>,
}

impl SummaryRecord {
    /// Create an empty record for a date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            hot_topics: Vec::new(),
            new_memes: Vec::new(),
            important_events: Vec::new(),
            highlights: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HotTopic {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct NewMeme {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meme: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: String,
}

/// An important event, either bare text or text with a VOD link
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EventEntry {
    Text(String),
    Detailed {
        #[serde(default, deserialize_with = "null_as_default")]
        event: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vod_url: Option<String>,
    },
}

impl EventEntry {
    pub fn text(&self) -> &str {
        match self {
            EventEntry::Text(text) => text,
            EventEntry::Detailed { event, .. } => event,
        }
    }

    pub fn vod_link(&self) -> Option<&str> {
        match self {
            EventEntry::Text(_) => None,
            EventEntry::Detailed { vod_url, .. } => non_empty(vod_url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Highlight {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_url: Option<String>,
}

impl Highlight {
    pub fn vod_link(&self) -> Option<&str> {
        non_empty(&self.vod_url)
    }

    pub fn clip_link(&self) -> Option<&str> {
        non_empty(&self.clip_url)
    }
}

/// `null` reads the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty(link: &Option<String>) -> Option<&str> {
    link.as_deref().filter(|s| !s.trim().is_empty())
}

// ============================================
// Endpoint response
// ============================================

/// Response body of `GET {base}?channel={id}&action=all`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummariesResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summaries: Vec<SummaryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
