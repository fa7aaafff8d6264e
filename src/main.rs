use std::io;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use ipsw_timeline::feed;
use ipsw_timeline::release::Release;
use ipsw_timeline::render;
use ipsw_timeline::select;

const DEFAULT_FEED_URL: &str = "https://ipsw.me/timeline.rss";
const DEFAULT_LIMIT: i64 = 15;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetch the ipsw.me firmware timeline and print the newest releases.
#[derive(Parser, Debug)]
#[command(name = "ipsw-timeline", version)]
struct Args {
    /// RSS feed URL
    #[arg(
        short = 'f',
        long,
        default_value = DEFAULT_FEED_URL,
        env = "IPSW_TIMELINE_FEED_URL"
    )]
    feed_url: String,

    /// Number of entries to show; zero or negative shows everything
    #[arg(
        short = 'l',
        long,
        default_value_t = DEFAULT_LIMIT,
        allow_negative_numbers = true,
        env = "IPSW_TIMELINE_LIMIT"
    )]
    limit: i64,

    /// Case-insensitive substring filter on the entry title
    #[arg(short = 'c', long, default_value = "", env = "IPSW_TIMELINE_CONTAINS")]
    contains: String,

    /// HTTP timeout in seconds
    #[arg(
        short = 't',
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        env = "IPSW_TIMELINE_TIMEOUT"
    )]
    timeout: u64,

    /// When to colorize the table
    #[arg(
        short = 'C',
        long,
        value_enum,
        ignore_case = true,
        default_value = "auto",
        env = "IPSW_TIMELINE_COLOR"
    )]
    color: ColorMode,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
struct Config {
    feed_url: String,
    limit: i64,
    contains: String,
    timeout: Duration,
    color: ColorMode,
}

impl Config {
    fn from_args(args: Args) -> Result<Config> {
        let feed_url = args.feed_url.trim().to_string();
        if feed_url.is_empty() {
            bail!("feed-url cannot be empty");
        }
        Ok(Config {
            feed_url,
            limit: args.limit,
            contains: args.contains.trim().to_string(),
            timeout: Duration::from_secs(args.timeout),
            color: args.color,
        })
    }
}

fn color_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
    }
}

/// Logs go to stderr; stdout carries nothing but the table.
fn init_tracing() -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ipsw_timeline=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .compact()
        .init();
    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args(Args::parse())?;
    let _guard = init_tracing();

    let body = feed::fetch_feed(&config.feed_url, config.timeout)
        .await
        .with_context(|| format!("fetch error ({})", config.feed_url))?;
    debug!("fetched {} bytes", body.len());

    let items = feed::parse_feed(&body)
        .with_context(|| format!("parse error ({})", config.feed_url))?;
    debug!("parsed {} raw items", items.len());

    let releases: Vec<Release> = items.iter().map(Release::from_item).collect();
    let mut releases = select::filter_by_title(releases, &config.contains);
    select::sort_newest_first(&mut releases);
    select::truncate_to_limit(&mut releases, config.limit);

    if releases.is_empty() {
        return Ok(());
    }

    let colored = color_enabled(config.color);
    let stdout = io::stdout();
    render::render_table(&mut stdout.lock(), &releases, colored, render::terminal_width())?;

    Ok(())
}
