//! Player Overlay
//!
//! Turns VOD and clip links into embeddable player URLs and tracks whether
//! the modal player is open. Links that do not match the expected shapes
//! are ignored without an error.

use regex::Regex;
use std::sync::OnceLock;

const VOD_EMBED_BASE: &str = "https://player.twitch.tv/";
const CLIP_EMBED_BASE: &str = "https://clips.twitch.tv/embed";

/// Which kind of link a player button carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Vod,
    Clip,
}

impl PlayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Vod => "vod",
            PlayerKind::Clip => "clip",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "vod" => Some(PlayerKind::Vod),
            "clip" => Some(PlayerKind::Clip),
            _ => None,
        }
    }
}

/// Player parameters extracted from a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerTarget {
    /// Past broadcast, `video_id` is already `v`-prefixed
    Vod {
        video_id: String,
        timestamp: Option<String>,
    },
    Clip { slug: String },
}

fn vod_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/videos/(\d+)").expect("valid VOD id pattern"))
}

fn vod_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[?&]t=([0-9hms]+)").expect("valid VOD time pattern"))
}

fn clip_slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:clips\.[A-Za-z0-9.-]+/|clip/)([A-Za-z0-9_-]+)")
            .expect("valid clip slug pattern")
    })
}

impl PlayerTarget {
    /// Parse a VOD link like `https://www.twitch.tv/videos/123?t=1h2m3s`
    pub fn from_vod_url(url: &str) -> Option<Self> {
        let id = vod_id_re().captures(url)?.get(1)?.as_str();
        let timestamp = vod_time_re()
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        Some(PlayerTarget::Vod {
            video_id: format!("v{}", id),
            timestamp,
        })
    }

    /// Parse a clip link like `https://clips.twitch.tv/SlugName`
    pub fn from_clip_url(url: &str) -> Option<Self> {
        let slug = clip_slug_re().captures(url)?.get(1)?.as_str();
        Some(PlayerTarget::Clip {
            slug: slug.to_string(),
        })
    }

    pub fn from_link(kind: PlayerKind, url: &str) -> Option<Self> {
        match kind {
            PlayerKind::Vod => Self::from_vod_url(url),
            PlayerKind::Clip => Self::from_clip_url(url),
        }
    }

    pub fn kind(&self) -> PlayerKind {
        match self {
            PlayerTarget::Vod { .. } => PlayerKind::Vod,
            PlayerTarget::Clip { .. } => PlayerKind::Clip,
        }
    }

    /// Embed URL for this target; `parent` is the host embedding the player
    pub fn embed_url(&self, parent: &str) -> String {
        let parent = urlencoding::encode(parent);
        match self {
            PlayerTarget::Vod {
                video_id,
                timestamp,
            } => {
                let mut url = format!(
                    "{}?video={}&parent={}&autoplay=true",
                    VOD_EMBED_BASE, video_id, parent
                );
                if let Some(time) = timestamp {
                    url.push_str("&time=");
                    url.push_str(time);
                }
                url
            }
            PlayerTarget::Clip { slug } => {
                format!("{}?clip={}&parent={}&autoplay=true", CLIP_EMBED_BASE, slug, parent)
            }
        }
    }
}

/// An open player: what is playing and the iframe source showing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    pub target: PlayerTarget,
    pub src: String,
}

/// Modal player state
#[derive(Debug, Clone, Default)]
pub struct PlayerOverlay {
    current: Option<EmbedRequest>,
}

impl PlayerOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&EmbedRequest> {
        self.current.as_ref()
    }

    /// Open the player for a link. Returns `None` and leaves the overlay
    /// untouched when the link does not parse.
    pub fn open(&mut self, kind: PlayerKind, url: &str, parent: &str) -> Option<&EmbedRequest> {
        let Some(target) = PlayerTarget::from_link(kind, url) else {
            tracing::debug!(kind = kind.as_str(), url, "Ignoring unrecognized player link");
            return None;
        };

        let src = target.embed_url(parent);
        tracing::debug!(src = %src, "Opening player");
        self.current = Some(EmbedRequest { target, src });
        self.current.as_ref()
    }

    /// Close the player. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        self.current.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vod_with_timestamp() {
        let target = PlayerTarget::from_vod_url("https://twitch.tv/x/videos/12345?t=1h2m3s").unwrap();
        assert_eq!(
            target,
            PlayerTarget::Vod {
                video_id: "v12345".to_string(),
                timestamp: Some("1h2m3s".to_string()),
            }
        );
    }

    #[test]
    fn test_vod_timestamp_after_other_params() {
        let target =
            PlayerTarget::from_vod_url("https://www.twitch.tv/videos/99?filter=all&t=45m").unwrap();
        assert_eq!(
            target,
            PlayerTarget::Vod {
                video_id: "v99".to_string(),
                timestamp: Some("45m".to_string()),
            }
        );
    }

    #[test]
    fn test_vod_without_videos_path() {
        assert_eq!(PlayerTarget::from_vod_url("https://twitch.tv/x/clip/abc?t=1h"), None);
        assert_eq!(PlayerTarget::from_vod_url(""), None);
    }

    #[test]
    fn test_clip_slugs() {
        assert_eq!(
            PlayerTarget::from_clip_url("https://clips.twitch.tv/AbcDef123"),
            Some(PlayerTarget::Clip {
                slug: "AbcDef123".to_string()
            })
        );
        assert_eq!(
            PlayerTarget::from_clip_url("https://www.twitch.tv/godjj/clip/Fancy_Slug-x1?filter=clips"),
            Some(PlayerTarget::Clip {
                slug: "Fancy_Slug-x1".to_string()
            })
        );
        assert_eq!(PlayerTarget::from_clip_url("https://www.twitch.tv/videos/1"), None);
    }

    #[test]
    fn test_embed_urls() {
        let vod = PlayerTarget::Vod {
            video_id: "v12345".to_string(),
            timestamp: Some("1h2m3s".to_string()),
        };
        assert_eq!(
            vod.embed_url("reports.example.com"),
            "https://player.twitch.tv/?video=v12345&parent=reports.example.com&autoplay=true&time=1h2m3s"
        );

        let vod = PlayerTarget::Vod {
            video_id: "v1".to_string(),
            timestamp: None,
        };
        assert_eq!(
            vod.embed_url("localhost"),
            "https://player.twitch.tv/?video=v1&parent=localhost&autoplay=true"
        );

        let clip = PlayerTarget::Clip {
            slug: "AbcDef123".to_string(),
        };
        assert_eq!(
            clip.embed_url("localhost"),
            "https://clips.twitch.tv/embed?clip=AbcDef123&parent=localhost&autoplay=true"
        );
    }

    #[test]
    fn test_overlay_open_close() {
        let mut overlay = PlayerOverlay::new();
        assert!(!overlay.is_open());

        assert!(overlay
            .open(PlayerKind::Vod, "https://twitch.tv/x/no-video-here", "localhost")
            .is_none());
        assert!(!overlay.is_open());

        let request = overlay
            .open(PlayerKind::Clip, "https://clips.twitch.tv/AbcDef123", "localhost")
            .unwrap();
        assert_eq!(request.target.kind(), PlayerKind::Clip);
        assert!(overlay.is_open());

        assert!(overlay.close());
        assert!(!overlay.is_open());
        assert!(!overlay.close());
    }
}
