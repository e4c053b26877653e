//! Daily Report CLI
//!
//! Command-line surfaces for the report viewer:
//! - Show one day's report as text or HTML
//! - Browse reports interactively
//! - Export a static HTML site
//! - Generate a default config file

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daily_report::config::Config;
use daily_report::model::Channel;
use daily_report::player::EmbedRequest;
use daily_report::render::{
    render_page, Labels, LinkStyle, Locale, Node, PageOptions, Section, SummaryView,
};
use daily_report::source::{
    HttpSummarySource, StaticSource, SummarySource, DEFAULT_FAILURE_MESSAGE,
};
use daily_report::view::{
    Key, NavigationState, PageSnapshot, ViewController, ViewPorts, ViewState,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "daily-report")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse per-day channel summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Summary endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub source_url: Option<String>,

    /// Read summaries from a saved endpoint response instead of the network
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one day's report (default: the newest)
    Show {
        /// Channel name
        #[arg(long)]
        channel: Option<String>,
        /// Date (YYYY-MM-DD), snapped to the nearest report
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Print the full HTML page
        #[arg(long)]
        html: bool,
    },

    /// Browse reports interactively
    Browse {
        /// Channel name
        #[arg(long)]
        channel: Option<String>,
    },

    /// Export every report as a static HTML site
    Export {
        /// Channel name
        #[arg(long)]
        channel: Option<String>,
        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show {
            channel,
            date,
            html,
        } => {
            let session = Session::open(&cli.config, &cli.source_url, &cli.input, cli.verbose)?;
            let locale = session.locale();
            let viewer = load_viewer(
                session.source.as_ref(),
                session.channel(channel),
                session.embed_parent(),
                locale,
                date,
            )
            .await;

            if html {
                let options = PageOptions {
                    embed_parent: session.embed_parent().to_string(),
                    links: LinkStyle::Query,
                    locale,
                };
                print!("{}", render_page(viewer.ports(), &options));
            } else {
                print!("{}", plain_report(viewer.ports(), locale.labels()));
            }

            if viewer.state() == ViewState::Error {
                std::process::exit(1);
            }
        }

        Commands::Browse { channel } => {
            let session = Session::open(&cli.config, &cli.source_url, &cli.input, cli.verbose)?;
            let locale = session.locale();
            let mut viewer = ViewController::new(
                TerminalPorts::new(locale),
                session.channel(channel),
                session.embed_parent(),
            )
            .with_locale(locale);
            viewer.load(session.source.as_ref()).await;

            if matches!(viewer.state(), ViewState::Content | ViewState::Empty) {
                println!();
                println!("{}", HELP);
            }
            browse(&mut viewer).await?;
        }

        Commands::Export { channel, output } => {
            let session = Session::open(&cli.config, &cli.source_url, &cli.input, cli.verbose)?;
            let exported = export_site(
                session.source.as_ref(),
                session.channel(channel),
                session.embed_parent(),
                session.locale(),
                &output,
            )
            .await?;

            if exported == 0 {
                println!("No reports exported, wrote {:?}", output.join("index.html"));
            } else {
                println!("Exported {} reports to {:?}", exported, output);
            }
        }

        Commands::Config { output } => write_config(output.as_deref())?,
    }

    Ok(())
}

/// Loaded config, logging and summary source for one command
struct Session {
    config: Config,
    source: Box<dyn SummarySource>,
}

impl Session {
    fn open(
        config_path: &Option<PathBuf>,
        source_url: &Option<String>,
        input: &Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match config_path {
            Some(path) => Config::load_with_env(path)?,
            None => Config::load_default(),
        };
        if let Some(url) = source_url {
            config.source.base_url = url.clone();
        }
        if !verbose {
            config.logging.level = "warn".to_string();
        }
        daily_report::logging::init(&config.logging)?;

        let source: Box<dyn SummarySource> = match input {
            Some(path) => Box::new(StaticSource::from_file(path)?),
            None => Box::new(HttpSummarySource::new(config.source.to_source_config())),
        };

        Ok(Self { config, source })
    }

    fn channel(&self, name: Option<String>) -> Channel {
        Channel::from_query_or(name.as_deref(), &self.config.source.default_channel)
    }

    fn embed_parent(&self) -> &str {
        &self.config.player.embed_parent
    }

    fn locale(&self) -> Locale {
        self.config.viewer.locale
    }
}

fn write_config(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = daily_report::config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

async fn load_viewer(
    source: &dyn SummarySource,
    channel: Channel,
    embed_parent: &str,
    locale: Locale,
    date: Option<NaiveDate>,
) -> ViewController<PageSnapshot> {
    let mut viewer =
        ViewController::new(PageSnapshot::new(), channel, embed_parent).with_locale(locale);
    viewer.load(source).await;
    if let Some(date) = date {
        viewer.pick_date(date);
    }
    viewer
}

// ============================================
// Export
// ============================================

/// Write `index.html` plus one `{date}.html` per report. Returns the number
/// of report pages written.
async fn export_site(
    source: &dyn SummarySource,
    channel: Channel,
    embed_parent: &str,
    locale: Locale,
    output: &Path,
) -> std::io::Result<usize> {
    std::fs::create_dir_all(output)?;

    let mut viewer = load_viewer(source, channel, embed_parent, locale, None).await;
    let dates = viewer.index().dates().to_vec();
    let options = PageOptions {
        embed_parent: embed_parent.to_string(),
        links: LinkStyle::StaticFiles {
            dates: dates.clone(),
        },
        locale,
    };

    std::fs::write(output.join("index.html"), render_page(viewer.ports(), &options))?;

    for date in &dates {
        viewer.pick_date(*date);
        std::fs::write(
            output.join(format!("{}.html", date)),
            render_page(viewer.ports(), &options),
        )?;
    }

    Ok(dates.len())
}

// ============================================
// Text rendering
// ============================================

/// One line per item; nested blocks are joined with spaces
fn item_line(node: &Node) -> String {
    node.to_plain().lines().collect::<Vec<_>>().join(" ")
}

fn list_lines(node: &Node) -> Vec<String> {
    match node {
        Node::Element(list) if list.tag == "ol" => list.children.iter().map(item_line).collect(),
        _ => vec![item_line(node)],
    }
}

fn section_text(out: &mut String, heading: &str, section: &Section, placeholder: &str, numbered: bool) {
    if !section.visible {
        return;
    }

    out.push_str(&format!("\n{}\n", heading));
    if section.show_placeholder {
        out.push_str(&format!("  {}\n", placeholder));
        return;
    }
    for (i, item) in section.items.iter().enumerate() {
        if numbered {
            out.push_str(&format!("  [{}] {}\n", i + 1, item_line(item)));
        } else {
            out.push_str(&format!("  {}\n", item_line(item)));
        }
    }
}

fn summary_text(summary: &SummaryView, labels: &Labels) -> String {
    let mut out = format!("{} ({})\n", summary.date_label, summary.weekday);

    out.push_str(&format!("\n{}\n", labels.hot_topics));
    for line in list_lines(&summary.hot_topics) {
        out.push_str(&format!("  {}\n", line));
    }

    section_text(&mut out, labels.new_memes, &summary.memes, labels.no_memes, false);
    section_text(&mut out, labels.important_events, &summary.events, labels.no_events, true);
    section_text(&mut out, labels.highlights, &summary.highlights, labels.no_highlights, false);
    out
}

fn nav_line(navigation: &NavigationState) -> String {
    format!(
        "< {} | {} >",
        navigation.older.label, navigation.newer.label
    )
}

fn plain_report(snapshot: &PageSnapshot, labels: &Labels) -> String {
    let mut out = format!("{}\n", snapshot.title);

    if let Some(total) = snapshot.total_days {
        out.push_str(&format!("{}{}\n", labels.days_recorded, total));
    }

    match snapshot.state {
        ViewState::Loading => out.push_str(&format!("{}\n", labels.loading)),
        ViewState::Error => out.push_str(&format!(
            "Error: {}\n",
            snapshot
                .error_message
                .as_deref()
                .unwrap_or(DEFAULT_FAILURE_MESSAGE)
        )),
        ViewState::Empty => out.push_str(&format!("{}\n", labels.empty)),
        ViewState::Content => {
            if let Some(summary) = &snapshot.summary {
                out.push('\n');
                out.push_str(&summary_text(summary, labels));
            }
            if let Some(navigation) = &snapshot.navigation {
                out.push('\n');
                out.push_str(&nav_line(navigation));
                out.push('\n');
            }
        }
    }

    out
}

// ============================================
// Interactive browsing
// ============================================

const HELP: &str = "Commands: left/h/<  right/l/>  latest  goto YYYY-MM-DD  \
event N  vod N  clip N  esc  quit";

/// Prints each port update as it happens
struct TerminalPorts {
    labels: &'static Labels,
    error: Option<String>,
    navigation: Option<NavigationState>,
}

impl TerminalPorts {
    fn new(locale: Locale) -> Self {
        Self {
            labels: locale.labels(),
            error: None,
            navigation: None,
        }
    }
}

impl ViewPorts for TerminalPorts {
    fn set_channel(&mut self, _channel: &str) {}

    fn set_title(&mut self, title: &str) {
        println!("{}", title);
        println!("{}", "=".repeat(title.chars().count()));
    }

    fn show_state(&mut self, state: ViewState) {
        match state {
            ViewState::Loading => println!("{}", self.labels.loading),
            ViewState::Error => println!(
                "Error: {}",
                self.error.as_deref().unwrap_or(DEFAULT_FAILURE_MESSAGE)
            ),
            ViewState::Empty => println!("{}", self.labels.empty),
            ViewState::Content => {}
        }
    }

    fn set_error_message(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn set_total_days(&mut self, total: u64) {
        println!("{}{}", self.labels.days_recorded, total);
    }

    fn set_date_bounds(&mut self, oldest: NaiveDate, newest: NaiveDate) {
        println!("Reports from {} to {}", oldest, newest);
    }

    fn set_picker_value(&mut self, _date: NaiveDate) {}

    fn set_navigation(&mut self, navigation: &NavigationState) {
        self.navigation = Some(navigation.clone());
    }

    fn set_summary(&mut self, summary: &SummaryView) {
        println!();
        print!("{}", summary_text(summary, self.labels));
        if let Some(navigation) = &self.navigation {
            println!();
            println!("{}", nav_line(navigation));
        }
    }

    fn show_player(&mut self, embed: &EmbedRequest) {
        println!("Playing {}", embed.src);
        println!("(esc to close)");
    }

    fn hide_player(&mut self) {
        println!("Player closed");
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Key(Key),
    Latest,
    Goto(NaiveDate),
    Event(usize),
    Vod(usize),
    Clip(usize),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Err("Empty command".to_string());
    };
    let arg = parts.next();

    let number = |arg: Option<&str>| -> Result<usize, String> {
        arg.and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("'{}' needs a number starting at 1", word))
    };

    match word.to_lowercase().as_str() {
        "left" | "h" | "<" => Ok(BrowseCommand::Key(Key::ArrowLeft)),
        "right" | "l" | ">" => Ok(BrowseCommand::Key(Key::ArrowRight)),
        "esc" | "escape" => Ok(BrowseCommand::Key(Key::Escape)),
        "latest" | "today" => Ok(BrowseCommand::Latest),
        "goto" => arg
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(BrowseCommand::Goto)
            .ok_or_else(|| "Usage: goto YYYY-MM-DD".to_string()),
        "event" => number(arg).map(BrowseCommand::Event),
        "vod" => number(arg).map(BrowseCommand::Vod),
        "clip" => number(arg).map(BrowseCommand::Clip),
        "help" | "?" => Ok(BrowseCommand::Help),
        "quit" | "q" | "exit" => Ok(BrowseCommand::Quit),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Link of the n-th (1-based) event or highlight of the current report
fn report_link(viewer: &ViewController<TerminalPorts>, command: &BrowseCommand) -> Option<String> {
    let record = viewer.index().get(viewer.current_date()?)?;
    let link = match *command {
        BrowseCommand::Event(n) => record.important_events.get(n - 1)?.vod_link(),
        BrowseCommand::Vod(n) => record.highlights.as_ref()?.get(n - 1)?.vod_link(),
        BrowseCommand::Clip(n) => record.highlights.as_ref()?.get(n - 1)?.clip_link(),
        _ => None,
    };
    link.map(str::to_string)
}

async fn browse(viewer: &mut ViewController<TerminalPorts>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let handled = match &command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                println!("{}", HELP);
                true
            }
            BrowseCommand::Key(key) => viewer.handle_key(*key),
            BrowseCommand::Latest => !viewer.is_player_open() && viewer.latest(),
            BrowseCommand::Goto(date) => !viewer.is_player_open() && viewer.pick_date(*date),
            BrowseCommand::Event(_) | BrowseCommand::Vod(_) | BrowseCommand::Clip(_) => {
                match report_link(viewer, &command) {
                    Some(link) => match command {
                        BrowseCommand::Clip(_) => viewer.open_clip(&link),
                        _ => viewer.open_vod(&link),
                    },
                    None => {
                        println!("No link for that entry");
                        true
                    }
                }
            }
        };

        if !handled {
            if viewer.is_player_open() {
                println!("Player is open, press esc to close it");
            } else {
                println!("Nothing to do");
            }
        }
    }

    Ok(())
}
