//! Summary Renderer
//!
//! Pure mappings from a [`SummaryRecord`] to render fragments. Each section
//! is rendered on its own; no section looks at another.

use chrono::NaiveDate;

use crate::model::{EventEntry, Highlight, HotTopic, NewMeme, SummaryRecord};
use crate::player::PlayerKind;
use crate::render::locale::{Labels, Locale};
use crate::render::node::{Element, Node};

const CARD: &str = "card-elevated rounded-2xl p-6 sm:p-8 border-left-primary";
const BADGE_NUMBER: &str =
    "badge-number flex-shrink-0 flex items-center justify-center text-white font-bold text-xl";
const BTN_PRIMARY: &str = "btn-primary inline-flex items-center gap-2 px-4 py-2 rounded-lg text-white text-sm font-semibold";
const BTN_LINK: &str = "btn-link ml-2 inline-flex items-center gap-1.5 font-semibold";

/// Rendered fragments for one report date
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub date: NaiveDate,
    pub date_label: String,
    pub weekday: String,
    /// Topic list, or the "no topics" card
    pub hot_topics: Node,
    pub memes: Section,
    pub events: Section,
    pub highlights: Section,
}

/// A section whose empty state is a static placeholder toggled on or off
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub items: Vec<Node>,
    pub show_placeholder: bool,
    /// `false` hides the whole section including its heading
    pub visible: bool,
}

impl Section {
    fn from_items(items: Vec<Node>) -> Self {
        Self {
            show_placeholder: items.is_empty(),
            items,
            visible: true,
        }
    }

    fn hidden() -> Self {
        Self {
            items: Vec::new(),
            show_placeholder: true,
            visible: false,
        }
    }
}

/// A player button found in a rendered summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub kind: PlayerKind,
    pub link: String,
}

impl SummaryView {
    /// Player buttons in document order (events first, then highlights)
    pub fn actions(&self) -> Vec<PlayerAction> {
        let mut actions = Vec::new();
        for node in self.events.items.iter().chain(&self.highlights.items) {
            node.walk(&mut |element| {
                let kind = element.get_attr("data-player").and_then(PlayerKind::parse);
                if let (Some(kind), Some(link)) = (kind, element.get_attr("data-link")) {
                    actions.push(PlayerAction {
                        kind,
                        link: link.to_string(),
                    });
                }
            });
        }
        actions
    }
}

/// Render every section of a record
pub fn render_summary(record: &SummaryRecord, locale: Locale) -> SummaryView {
    let labels = locale.labels();
    SummaryView {
        date: record.date,
        date_label: locale.date_label(record.date),
        weekday: locale.weekday_label(record.date),
        hot_topics: render_hot_topics(&record.hot_topics, labels),
        memes: render_new_memes(&record.new_memes),
        events: render_events(&record.important_events, labels),
        highlights: render_highlights(record.highlights.as_deref(), locale),
    }
}

pub fn render_hot_topics(topics: &[HotTopic], labels: &Labels) -> Node {
    if topics.is_empty() {
        return Element::new("div")
            .class("card-elevated rounded-2xl p-6 sm:p-8 border border-dark-600 text-center text-gray-500")
            .child(Element::new("p").text(labels.no_topics))
            .into();
    }

    Element::new("ol")
        .class("space-y-4")
        .children(topics.iter().enumerate().map(|(i, topic)| {
            numbered_card(i + 1, &topic.topic, &topic.description, None).into()
        }))
        .into()
}

pub fn render_new_memes(memes: &[NewMeme]) -> Section {
    Section::from_items(
        memes
            .iter()
            .map(|meme| {
                Element::new("div")
                    .class(format!("{CARD} h-full"))
                    .child(
                        Element::new("span")
                            .class("badge-gradient font-bold text-xl sm:text-2xl")
                            .text(meme.meme.as_str()),
                    )
                    .child(
                        Element::new("p")
                            .class("text-content text-gray-300")
                            .text(meme.context.as_str()),
                    )
                    .into()
            })
            .collect(),
    )
}

pub fn render_events(events: &[EventEntry], labels: &Labels) -> Section {
    Section::from_items(
        events
            .iter()
            .map(|event| {
                let mut text = Element::new("p")
                    .class("text-content text-gray-300")
                    .text(event.text());
                if let Some(link) = event.vod_link() {
                    text = text.child(
                        player_button(PlayerKind::Vod, link, BTN_LINK, labels.watch)
                            .attr("aria-label", labels.watch_event_vod),
                    );
                }

                Element::new("div")
                    .class("flex items-start gap-3 py-3 border-l-2 pl-4")
                    .child(Element::new("span").class("bullet").text("•"))
                    .child(text)
                    .into()
            })
            .collect(),
    )
}

/// `None` means the record had no highlights field, which hides the section
pub fn render_highlights(highlights: Option<&[Highlight]>, locale: Locale) -> Section {
    let Some(highlights) = highlights else {
        return Section::hidden();
    };
    let labels = locale.labels();

    Section::from_items(
        highlights
            .iter()
            .enumerate()
            .map(|(i, highlight)| {
                let mut buttons = Element::new("div").class("flex flex-wrap gap-3");
                if let Some(link) = highlight.vod_link() {
                    buttons = buttons.child(
                        player_button(PlayerKind::Vod, link, BTN_PRIMARY, labels.watch_vod)
                            .attr("aria-label", locale.highlight_vod_label(&highlight.title)),
                    );
                }
                if let Some(link) = highlight.clip_link() {
                    buttons = buttons.child(
                        player_button(PlayerKind::Clip, link, BTN_PRIMARY, labels.watch_clip)
                            .attr("aria-label", locale.highlight_clip_label(&highlight.title)),
                    );
                }

                numbered_card(i + 1, &highlight.title, &highlight.description, Some(buttons))
                    .into()
            })
            .collect(),
    )
}

fn numbered_card(number: usize, title: &str, body: &str, footer: Option<Element>) -> Element {
    let mut content = Element::new("div")
        .class("flex-1 min-w-0")
        .child(Element::new("h4").class("heading-md text-white mb-2").text(title))
        .child(Element::new("p").class("text-content text-gray-300").text(body));
    if let Some(footer) = footer {
        content = content.child(footer);
    }

    Element::new("li").class(CARD).child(
        Element::new("div")
            .class("flex gap-5 sm:gap-6")
            .child(Element::new("div").class(BADGE_NUMBER).text(number.to_string()))
            .child(content),
    )
}

fn player_button(kind: PlayerKind, link: &str, class: &str, label: &str) -> Element {
    Element::new("button")
        .attr("type", "button")
        .class(class)
        .attr("data-player", kind.as_str())
        .attr("data-link", link)
        .child(play_icon())
        .text(label)
}

fn play_icon() -> Element {
    Element::new("svg")
        .class("w-4 h-4")
        .attr("fill", "currentColor")
        .attr("viewBox", "0 0 20 20")
        .child(Element::new("path").attr(
            "d",
            "M10 18a8 8 0 100-16 8 8 0 000 16zM9.555 7.168A1 1 0 008 8v4a1 1 0 001.555.832l3-2a1 1 0 000-1.664l-3-2z",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::locale::{EN, ZH_TW};

    const HOSTILE: &str = "<script>alert('x')</script> & co";

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assert_inert(html: &str) {
        assert!(!html.contains("<script>"), "live markup in: {html}");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; co"));
    }

    #[test]
    fn test_header_labels_follow_locale() {
        let record = SummaryRecord::new(day("2024-01-02"));

        let view = render_summary(&record, Locale::En);
        assert_eq!(view.date_label, "January 2, 2024");
        assert_eq!(view.weekday, "Tuesday");

        let view = render_summary(&record, Locale::ZhTw);
        assert_eq!(view.date_label, "2024 年 1 月 2 日");
        assert_eq!(view.weekday, "週二");
        assert_eq!(view.hot_topics.text_content(), ZH_TW.no_topics);
    }

    #[test]
    fn test_hot_topics_numbered() {
        let topics = vec![
            HotTopic {
                topic: "Ranked grind".to_string(),
                description: "Climbed to Diamond".to_string(),
            },
            HotTopic {
                topic: "New setup".to_string(),
                description: "Showed off the desk".to_string(),
            },
        ];

        let node = render_hot_topics(&topics, &EN);
        let plain = node.to_plain();
        assert_eq!(
            plain,
            "1\nRanked grind\nClimbed to Diamond\n2\nNew setup\nShowed off the desk"
        );
    }

    #[test]
    fn test_hot_topics_placeholder() {
        let node = render_hot_topics(&[], &EN);
        assert_eq!(node.text_content(), EN.no_topics);
    }

    #[test]
    fn test_memes_toggle_placeholder() {
        let empty = render_new_memes(&[]);
        assert!(empty.show_placeholder);
        assert!(empty.items.is_empty());
        assert!(empty.visible);

        let memes = render_new_memes(&[NewMeme {
            meme: "gg ez".to_string(),
            context: "after the comeback".to_string(),
        }]);
        assert!(!memes.show_placeholder);
        assert_eq!(memes.items.len(), 1);
    }

    #[test]
    fn test_events_both_shapes() {
        let events = [
            EventEntry::Text("Hit 10k followers".to_string()),
            EventEntry::Detailed {
                event: "Won the tournament".to_string(),
                vod_url: Some("https://www.twitch.tv/videos/42?t=1h".to_string()),
            },
        ];
        let section = render_events(&events, &EN);

        assert_eq!(section.items.len(), 2);
        assert!(!section.items[0].to_html().contains("<button"));
        assert!(section.items[1].to_html().contains("data-player=\"vod\""));
        assert!(section.items[1].to_plain().contains("Won the tournament [Watch]"));
    }

    #[test]
    fn test_highlights_sections() {
        let hidden = render_highlights(None, Locale::En);
        assert!(!hidden.visible);

        let empty = render_highlights(Some(&[]), Locale::En);
        assert!(empty.visible);
        assert!(empty.show_placeholder);
    }

    #[test]
    fn test_highlight_buttons_follow_links() {
        let highlights = vec![
            Highlight {
                title: "No links".to_string(),
                ..Default::default()
            },
            Highlight {
                title: "Vod only".to_string(),
                vod_url: Some("https://www.twitch.tv/videos/1".to_string()),
                ..Default::default()
            },
            Highlight {
                title: "Both".to_string(),
                vod_url: Some("https://www.twitch.tv/videos/2".to_string()),
                clip_url: Some("https://clips.twitch.tv/Slug_2".to_string()),
                ..Default::default()
            },
        ];

        let section = render_highlights(Some(&highlights), Locale::En);
        let counts: Vec<usize> = section
            .items
            .iter()
            .map(|item| item.to_html().matches("<button").count())
            .collect();
        assert_eq!(counts, vec![0, 1, 2]);
    }

    #[test]
    fn test_button_labels_follow_locale() {
        let highlights = vec![Highlight {
            title: "Ace".to_string(),
            vod_url: Some("https://www.twitch.tv/videos/2".to_string()),
            clip_url: Some("https://clips.twitch.tv/Slug_2".to_string()),
            ..Default::default()
        }];

        let html = render_highlights(Some(&highlights), Locale::ZhTw).items[0].to_html();
        assert!(html.contains("aria-label=\"觀看 Ace 的 VOD\""));
        assert!(html.contains("觀看 VOD</button>"));
        assert!(html.contains("觀看剪輯</button>"));
    }

    #[test]
    fn test_actions_in_document_order() {
        let mut record = SummaryRecord::new(day("2024-01-02"));
        record.important_events = vec![EventEntry::Detailed {
            event: "raid".to_string(),
            vod_url: Some("https://www.twitch.tv/videos/7".to_string()),
        }];
        record.highlights = Some(vec![Highlight {
            title: "ace".to_string(),
            clip_url: Some("https://clips.twitch.tv/Ace".to_string()),
            ..Default::default()
        }]);

        let actions = render_summary(&record, Locale::En).actions();
        assert_eq!(
            actions,
            vec![
                PlayerAction {
                    kind: PlayerKind::Vod,
                    link: "https://www.twitch.tv/videos/7".to_string(),
                },
                PlayerAction {
                    kind: PlayerKind::Clip,
                    link: "https://clips.twitch.tv/Ace".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_hostile_text_is_inert_everywhere() {
        let mut record = SummaryRecord::new(day("2024-01-02"));
        record.hot_topics = vec![HotTopic {
            topic: HOSTILE.to_string(),
            description: HOSTILE.to_string(),
        }];
        record.new_memes = vec![NewMeme {
            meme: HOSTILE.to_string(),
            context: HOSTILE.to_string(),
        }];
        record.important_events = vec![
            EventEntry::Text(HOSTILE.to_string()),
            EventEntry::Detailed {
                event: HOSTILE.to_string(),
                vod_url: Some(format!("https://www.twitch.tv/videos/1?t=\"{HOSTILE}")),
            },
        ];
        record.highlights = Some(vec![Highlight {
            title: HOSTILE.to_string(),
            description: HOSTILE.to_string(),
            vod_url: None,
            clip_url: Some("https://clips.twitch.tv/x'onclick='y".to_string()),
        }]);

        let view = render_summary(&record, Locale::En);
        assert_inert(&view.hot_topics.to_html());
        for item in view.memes.items.iter().chain(&view.events.items) {
            assert_inert(&item.to_html());
        }
        let highlight = view.highlights.items[0].to_html();
        assert_inert(&highlight);
        assert!(!highlight.contains("x'onclick"));
    }
}
