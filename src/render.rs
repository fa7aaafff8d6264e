//! Fixed-width table rendering.
//!
//! Every row is laid out against the same column plan: a two-space indent,
//! the publish date, a platform-colored stripe, the platform label, the
//! version cell, and whatever horizontal space is left for device / notes.
//! Rows sharing a UTC day sit under one dashed day divider.

use std::env;
use std::io::{self, Write};

use owo_colors::{OwoColorize, Style};

use crate::release::{Platform, Release};

const INDENT: usize = 2;
const DATE_WIDTH: usize = 20;
const STRIPE_WIDTH: usize = 1;
const PLATFORM_WIDTH: usize = 12;
const VERSION_WIDTH: usize = 24;
const DEVICE_GAP: usize = 2;
const MIN_DEVICE_WIDTH: usize = 16;
const DEFAULT_WIDTH: usize = 100;

const STRIPE: &str = "▌";

/// Gate between styled and plain output. When disabled, text passes through
/// untouched so piped output stays clean.
#[derive(Debug, Clone, Copy)]
struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Columns to render into: `COLUMNS` wins, then the live terminal size,
/// then a 100-column fallback for pipes.
pub fn terminal_width() -> usize {
    if let Ok(cols) = env::var("COLUMNS") {
        if let Ok(parsed) = cols.parse::<usize>() {
            if parsed > 0 {
                return parsed;
            }
        }
    }
    if let Ok((cols, _rows)) = crossterm::terminal::size() {
        if cols > 0 {
            return cols as usize;
        }
    }
    DEFAULT_WIDTH
}

/// Write the release table. The caller decides color and width so output is
/// reproducible under test.
pub fn render_table(
    out: &mut impl Write,
    releases: &[Release],
    enable_color: bool,
    total_width: usize,
) -> io::Result<()> {
    let width = device_width(total_width);
    let color = Colorizer {
        enabled: enable_color,
    };

    let header = build_header(width);
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))?;

    let mut last_day = String::new();
    for release in releases {
        let day = release.published_at.format("%Y-%m-%d").to_string();
        if day != last_day {
            writeln!(out, "{}", day_divider(&day, total_width))?;
            last_day = day;
        }

        let date_cell = pad(&truncate_chars(&release.display_date, DATE_WIDTH), DATE_WIDTH);
        let platform_cell = pad(
            &truncate_chars(release.platform.label(), PLATFORM_WIDTH),
            PLATFORM_WIDTH,
        );
        let version_cell = pad(
            &truncate_chars(&release.display_version, VERSION_WIDTH),
            VERSION_WIDTH,
        );
        let device_cell = pad(&truncate_chars(&release.device_or_notes, width), width);
        let style = platform_style(release.platform);

        writeln!(
            out,
            "{}{} {} {} {}  {}",
            " ".repeat(INDENT),
            date_cell,
            color.paint(style, STRIPE),
            color.paint(style, &platform_cell),
            colorize_version(&version_cell, style, release.pre_release, &color),
            color.paint(Style::new().dimmed(), &device_cell),
        )?;
    }

    Ok(())
}

fn build_header(device_width: usize) -> String {
    format!(
        "  {} {} {} {}  {}",
        pad("Published", DATE_WIDTH),
        " ",
        pad("Platform", PLATFORM_WIDTH),
        pad("Version (Build)", VERSION_WIDTH),
        pad("Device / Notes", device_width),
    )
}

fn day_divider(day: &str, total_width: usize) -> String {
    let prefix = format!(" {day} ");
    let dashes = total_width.saturating_sub(prefix.chars().count());
    format!("{prefix}{}", "-".repeat(dashes))
}

/// Space left for the device / notes column, floored at sixteen so narrow
/// terminals still get a usable cell.
fn device_width(total_width: usize) -> usize {
    let fixed =
        INDENT + DATE_WIDTH + 1 + STRIPE_WIDTH + 1 + PLATFORM_WIDTH + 1 + VERSION_WIDTH + DEVICE_GAP;
    total_width.saturating_sub(fixed).max(MIN_DEVICE_WIDTH)
}

fn platform_style(platform: Platform) -> Style {
    match platform {
        Platform::Ios => Style::new().red(),
        Platform::Ipados => Style::new().cyan(),
        Platform::Macos => Style::new().green(),
        Platform::Watchos | Platform::Tvos | Platform::Visionos | Platform::Other => {
            Style::new().magenta()
        }
    }
}

/// Color the version cell. Pre-releases are painted bold as a whole; for
/// final releases only the digit runs go bold so the separators stay quiet.
fn colorize_version(cell: &str, style: Style, pre_release: bool, color: &Colorizer) -> String {
    if !color.enabled {
        return cell.to_string();
    }
    if pre_release {
        return color.paint(style.bold(), cell);
    }

    let mut painted = String::new();
    let mut run = String::new();
    let mut run_is_digit = false;
    for ch in cell.chars() {
        let is_digit = ch.is_ascii_digit();
        if is_digit != run_is_digit && !run.is_empty() {
            let run_style = if run_is_digit { style.bold() } else { style };
            painted.push_str(&color.paint(run_style, &run));
            run.clear();
        }
        run_is_digit = is_digit;
        run.push(ch);
    }
    if !run.is_empty() {
        let run_style = if run_is_digit { style.bold() } else { style };
        painted.push_str(&color.paint(run_style, &run));
    }
    painted
}

fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - count))
}

fn truncate_chars(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    text.chars().take(width).collect()
}
