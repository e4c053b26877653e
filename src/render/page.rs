//! Page Renderer
//!
//! Builds the full viewer document from a [`PageSnapshot`]. Every panel is
//! present in the markup and all but the active one carry `hidden`. The
//! inline script only wires keys, the date picker and the player modal; all
//! content is rendered here.

use chrono::NaiveDate;

use crate::player::PlayerTarget;
use crate::render::node::{Element, Node};
use crate::render::locale::{Labels, Locale};
use crate::render::summary::Section;
use crate::view::{NavTarget, NavigationState, PageSnapshot, ViewState};

const STYLE: &str = r#"<style>
body{margin:0;background:#0e0e10;color:#efeff1;font-family:system-ui,sans-serif;line-height:1.6}
header,main,nav,footer{max-width:56rem;margin:0 auto;padding:1rem}
a{color:#bf94ff}.disabled{color:#555}
.card-elevated{background:#18181b;border-radius:1rem;padding:1.5rem;margin:.75rem 0;list-style:none}
.border-left-primary{border-left:4px solid #9146ff}
.badge-number{width:2.5rem;height:2.5rem;border-radius:.75rem;background:#9146ff;display:flex;align-items:center;justify-content:center}
.flex{display:flex;gap:1.25rem}.flex-1{flex:1}
.btn-primary,.btn-link{background:#9146ff;border:0;border-radius:.5rem;color:#fff;cursor:pointer;padding:.4rem .9rem}
.btn-link{background:none;color:#9146ff}
.w-4{width:1rem;height:1rem}
#player-modal{position:fixed;inset:0;background:rgba(0,0,0,.85);display:flex;align-items:center;justify-content:center}
#player-modal[hidden]{display:none}
#player-frame{position:relative;width:min(90vw,160vh);aspect-ratio:16/9}
#player-frame iframe{position:absolute;inset:0;width:100%;height:100%;border:0}
</style>"#;

const SCRIPT: &str = r#"<script>
(function () {
  var modal = document.getElementById('player-modal');
  var container = document.getElementById('player-frame');
  var embeds = JSON.parse(modal.getAttribute('data-embeds') || '[]');
  function open(src) {
    container.innerHTML = '';
    var frame = document.createElement('iframe');
    frame.src = src;
    frame.title = 'Video player';
    frame.allowFullscreen = true;
    frame.setAttribute('scrolling', 'no');
    container.appendChild(frame);
    modal.hidden = false;
    modal.focus();
    document.body.style.overflow = 'hidden';
  }
  function close() {
    container.innerHTML = '';
    modal.hidden = true;
    document.body.style.overflow = '';
  }
  function follow(id) {
    var link = document.getElementById(id);
    if (link && link.href) { window.location.href = link.href; }
  }
  document.querySelectorAll('[data-player]').forEach(function (button, i) {
    button.addEventListener('click', function () { if (embeds[i]) { open(embeds[i]); } });
  });
  document.getElementById('close-player').addEventListener('click', close);
  modal.addEventListener('click', function (e) { if (e.target === modal) { close(); } });
  document.addEventListener('keydown', function (e) {
    if (!modal.hidden) { if (e.key === 'Escape') { close(); } return; }
    if (e.key === 'ArrowLeft') { follow('prev-date'); }
    else if (e.key === 'ArrowRight') { follow('next-date'); }
  });
  var picker = document.getElementById('date-picker');
  if (picker) { picker.addEventListener('change', function () { picker.form.submit(); }); }
  var jump = document.getElementById('date-jump');
  if (jump) { jump.addEventListener('change', function () { window.location.href = jump.value; }); }
})();
</script>"#;

/// How navigation links are written
#[derive(Debug, Clone)]
pub enum LinkStyle {
    /// `?channel=…&date=…` against the serving page
    Query,
    /// One `{date}.html` file per report plus `index.html` for the newest
    StaticFiles { dates: Vec<NaiveDate> },
}

impl LinkStyle {
    fn date_href(&self, channel: &str, date: NaiveDate) -> String {
        match self {
            LinkStyle::Query => format!(
                "?channel={}&date={}",
                urlencoding::encode(channel),
                date.format("%Y-%m-%d")
            ),
            LinkStyle::StaticFiles { .. } => format!("{}.html", date.format("%Y-%m-%d")),
        }
    }

    fn latest_href(&self, channel: &str) -> String {
        match self {
            LinkStyle::Query => format!("?channel={}", urlencoding::encode(channel)),
            LinkStyle::StaticFiles { .. } => "index.html".to_string(),
        }
    }
}

/// Page rendering options
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Host passed to the player as the embedding parent
    pub embed_parent: String,
    pub links: LinkStyle,
    /// Language of the page's own labels
    pub locale: Locale,
}

/// Render the whole viewer document
pub fn render_page(snapshot: &PageSnapshot, options: &PageOptions) -> String {
    let labels = options.locale.labels();
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(snapshot.title.as_str()))
        .child(Node::Static(STYLE));

    let mut body = Element::new("body")
        .child(header(snapshot, labels))
        .child(date_nav(snapshot, &options.links, labels))
        .child(state_panel(
            "loading-state",
            snapshot.state == ViewState::Loading,
            Element::new("p").text(labels.loading),
        ))
        .child(state_panel(
            "error-state",
            snapshot.state == ViewState::Error,
            Element::new("p")
                .attr("id", "error-message")
                .text(snapshot.error_message.clone().unwrap_or_default()),
        ))
        .child(state_panel(
            "empty-state",
            snapshot.state == ViewState::Empty,
            Element::new("p").text(labels.empty),
        ))
        .child(content(snapshot, &options.links, labels))
        .child(player_modal(snapshot, &options.embed_parent, labels))
        .child(Node::Static(SCRIPT));

    if snapshot.scroll_locked {
        body = body.attr("style", "overflow:hidden");
    }

    let html: Node = Element::new("html")
        .attr("lang", options.locale.as_str())
        .child(head)
        .child(body)
        .into();

    format!("<!DOCTYPE html>\n{}", html.to_html())
}

fn show_if(element: Element, visible: bool) -> Element {
    if visible {
        element
    } else {
        element.attr("hidden", "")
    }
}

fn header(snapshot: &PageSnapshot, labels: &Labels) -> Element {
    let mut header = Element::new("header").child(
        Element::new("h1")
            .child(
                Element::new("span")
                    .attr("id", "channel-display")
                    .text(snapshot.channel.as_str()),
            )
            .text(labels.title_suffix),
    );
    if let Some(total) = snapshot.total_days {
        header = header.child(
            Element::new("p")
                .text(labels.days_recorded)
                .child(Element::new("span").attr("id", "total-days").text(total.to_string())),
        );
    }
    header
}

fn date_nav(snapshot: &PageSnapshot, links: &LinkStyle, labels: &Labels) -> Element {
    let channel = snapshot.channel.as_str();
    let mut nav = Element::new("nav").attr("id", "date-nav");

    if let Some(navigation) = &snapshot.navigation {
        nav = nav.child(nav_link("prev-date", &navigation.older, labels.older, channel, links));
    }

    nav = nav.child(date_picker(snapshot, links, labels));

    if let Some(navigation) = &snapshot.navigation {
        nav = nav.child(nav_link("next-date", &navigation.newer, labels.newer, channel, links));
    }

    nav = nav.child(
        Element::new("a")
            .attr("id", "today-btn")
            .attr("href", links.latest_href(channel))
            .text(labels.latest),
    );

    show_if(nav, snapshot.date_nav_visible)
}

fn date_picker(snapshot: &PageSnapshot, links: &LinkStyle, labels: &Labels) -> Element {
    match links {
        LinkStyle::Query => {
            let mut input = Element::new("input")
                .attr("type", "date")
                .attr("id", "date-picker")
                .attr("name", "date");
            if let Some((oldest, newest)) = snapshot.date_bounds {
                input = input
                    .attr("min", oldest.format("%Y-%m-%d").to_string())
                    .attr("max", newest.format("%Y-%m-%d").to_string());
            }
            if let Some(value) = snapshot.picker_value {
                input = input.attr("value", value.format("%Y-%m-%d").to_string());
            }

            Element::new("form")
                .attr("method", "get")
                .child(
                    Element::new("input")
                        .attr("type", "hidden")
                        .attr("name", "channel")
                        .attr("value", snapshot.channel.as_str()),
                )
                .child(input)
        }
        LinkStyle::StaticFiles { dates } => Element::new("select")
            .attr("id", "date-jump")
            .attr("aria-label", labels.jump_to_date)
            .children(dates.iter().map(|date| {
                let mut option = Element::new("option")
                    .attr("value", links.date_href(&snapshot.channel, *date))
                    .text(date.format("%Y-%m-%d").to_string());
                if snapshot.picker_value == Some(*date) {
                    option = option.attr("selected", "");
                }
                option.into()
            })),
    }
}

fn nav_link(
    id: &'static str,
    target: &NavTarget,
    text: &str,
    channel: &str,
    links: &LinkStyle,
) -> Element {
    match target.date {
        Some(date) => Element::new("a")
            .attr("id", id)
            .attr("href", links.date_href(channel, date))
            .attr("title", target.label.as_str())
            .text(text),
        None => Element::new("span")
            .attr("id", id)
            .class("disabled")
            .attr("aria-disabled", "true")
            .attr("title", target.label.as_str())
            .text(text),
    }
}

fn state_panel(id: &'static str, visible: bool, body: Element) -> Element {
    show_if(Element::new("div").attr("id", id).child(body), visible)
}

fn content(snapshot: &PageSnapshot, links: &LinkStyle, labels: &Labels) -> Element {
    let main = Element::new("main").attr("id", "summary-content");
    let visible = snapshot.state == ViewState::Content;

    let Some(summary) = snapshot.summary.as_ref().filter(|_| visible) else {
        return main.attr("hidden", "");
    };

    let mut main = main
        .child(
            Element::new("h2")
                .child(
                    Element::new("span")
                        .attr("id", "summary-date")
                        .text(summary.date_label.as_str()),
                )
                .text(" ")
                .child(
                    Element::new("span")
                        .attr("id", "summary-weekday")
                        .text(summary.weekday.as_str()),
                ),
        )
        .child(
            Element::new("section")
                .attr("id", "hot-topics-section")
                .child(Element::new("h3").text(labels.hot_topics))
                .child(
                    Element::new("div")
                        .attr("id", "hot-topics-container")
                        .child(summary.hot_topics.clone()),
                ),
        )
        .child(toggled_section(
            &MEMES,
            labels.new_memes,
            labels.no_memes,
            "div",
            &summary.memes,
        ))
        .child(toggled_section(
            &EVENTS,
            labels.important_events,
            labels.no_events,
            "div",
            &summary.events,
        ))
        .child(toggled_section(
            &HIGHLIGHTS,
            labels.highlights,
            labels.no_highlights,
            "ol",
            &summary.highlights,
        ));

    if let Some(navigation) = &snapshot.navigation {
        main = main.child(footer_nav(navigation, &snapshot.channel, links, labels));
    }

    main
}

struct SectionIds {
    section: &'static str,
    container: &'static str,
    placeholder: &'static str,
}

const MEMES: SectionIds = SectionIds {
    section: "new-memes-section",
    container: "new-memes-container",
    placeholder: "no-memes",
};

const EVENTS: SectionIds = SectionIds {
    section: "events-section",
    container: "events-container",
    placeholder: "no-events",
};

const HIGHLIGHTS: SectionIds = SectionIds {
    section: "highlights-section",
    container: "highlights-container",
    placeholder: "no-highlights",
};

fn toggled_section(
    ids: &SectionIds,
    heading: &str,
    placeholder: &str,
    container_tag: &'static str,
    section: &Section,
) -> Element {
    let element = Element::new("section")
        .attr("id", ids.section)
        .child(Element::new("h3").text(heading))
        .child(
            Element::new(container_tag)
                .attr("id", ids.container)
                .children(section.items.iter().cloned()),
        )
        .child(show_if(
            Element::new("p").attr("id", ids.placeholder).text(placeholder),
            section.show_placeholder,
        ));

    show_if(element, section.visible)
}

fn footer_nav(
    navigation: &NavigationState,
    channel: &str,
    links: &LinkStyle,
    labels: &Labels,
) -> Element {
    Element::new("footer")
        .attr("id", "footer-nav")
        .child(
            nav_link("footer-prev", &navigation.older, labels.older, channel, links).child(
                Element::new("span")
                    .attr("id", "footer-prev-date")
                    .text(format!(" {}", navigation.older.label)),
            ),
        )
        .child(Element::new("span").text(" · "))
        .child(
            nav_link("footer-next", &navigation.newer, labels.newer, channel, links).child(
                Element::new("span")
                    .attr("id", "footer-next-date")
                    .text(format!(" {}", navigation.newer.label)),
            ),
        )
}

fn player_modal(snapshot: &PageSnapshot, embed_parent: &str, labels: &Labels) -> Element {
    let embeds: Vec<Option<String>> = snapshot
        .summary
        .as_ref()
        .map(|summary| {
            summary
                .actions()
                .iter()
                .map(|action| {
                    PlayerTarget::from_link(action.kind, &action.link)
                        .map(|target| target.embed_url(embed_parent))
                })
                .collect()
        })
        .unwrap_or_default();
    let embeds = serde_json::to_string(&embeds).unwrap_or_else(|_| "[]".to_string());

    let mut frame = Element::new("div").attr("id", "player-frame");
    if let Some(player) = &snapshot.player {
        frame = frame.child(
            Element::new("iframe")
                .attr("src", player.src.as_str())
                .attr("title", labels.video_player)
                .attr("allowfullscreen", "")
                .attr("scrolling", "no"),
        );
    }

    let modal = Element::new("div")
        .attr("id", "player-modal")
        .attr("tabindex", "-1")
        .attr("data-embeds", embeds)
        .child(
            Element::new("button")
                .attr("type", "button")
                .attr("id", "close-player")
                .attr("aria-label", labels.close_player)
                .text("×"),
        )
        .child(frame);

    show_if(modal, snapshot.player.is_some())
}
