// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal (tables), quiet (ids only), and JSON output modes.

use crate::model::{ContainerRecord, DiskUsageSnapshot, ImageRecord, NetworkRecord, UsageSummary};
use serde::Serialize;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Human-friendly tables
    #[default]
    Normal,
    /// Identifiers only, one per line
    Quiet,
    /// JSON for scripting
    Json,
}

/// A record that renders as one table row.
pub trait Tabular {
    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Printed alone in quiet mode.
    fn key(&self) -> String;
}

impl Tabular for ImageRecord {
    fn headers() -> &'static [&'static str] {
        &["IMAGE ID", "REPOSITORY", "TAG", "CREATED", "SIZE", "IN USE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.short().to_string(),
            self.repository.clone(),
            self.tag.clone(),
            timestamp(&self.created),
            human_size(self.size),
            if self.in_use { "yes" } else { "no" }.to_string(),
        ]
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Tabular for ContainerRecord {
    fn headers() -> &'static [&'static str] {
        &["CONTAINER ID", "IMAGE", "COMMAND", "CREATED", "STATUS", "PORTS", "NAME"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.short().to_string(),
            self.image.clone(),
            truncate(&self.command, 30),
            timestamp(&self.created),
            self.status.clone(),
            self.ports.clone(),
            self.name.clone(),
        ]
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Tabular for NetworkRecord {
    fn headers() -> &'static [&'static str] {
        &["NETWORK ID", "NAME", "DRIVER", "SCOPE", "SUBNET", "CONTAINERS"]
    }

    fn cells(&self) -> Vec<String> {
        let subnets: Vec<&str> = self
            .ipam
            .config
            .iter()
            .filter_map(|pool| pool.subnet.as_deref())
            .collect();

        vec![
            self.id.short().to_string(),
            self.name.clone(),
            self.driver.clone(),
            self.scope.clone(),
            subnets.join(","),
            self.containers.len().to_string(),
        ]
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Print a list of records.
    pub fn records<R: Tabular + Serialize>(&self, rows: &[R]) -> serde_json::Result<()> {
        print!("{}", self.render_records(rows)?);
        Ok(())
    }

    pub fn render_records<R: Tabular + Serialize>(&self, rows: &[R]) -> serde_json::Result<String> {
        Ok(match self.mode {
            OutputMode::Normal => render_table(rows),
            OutputMode::Quiet => rows.iter().map(|row| format!("{}\n", row.key())).collect(),
            OutputMode::Json => format!("{}\n", serde_json::to_string_pretty(rows)?),
        })
    }

    /// Print a disk usage snapshot.
    pub fn disk_usage(&self, df: &DiskUsageSnapshot) -> serde_json::Result<()> {
        print!("{}", self.render_disk_usage(df)?);
        Ok(())
    }

    pub fn render_disk_usage(&self, df: &DiskUsageSnapshot) -> serde_json::Result<String> {
        Ok(match self.mode {
            OutputMode::Normal => render_usage_table(df),
            OutputMode::Quiet => format!(
                "{}\n",
                human_size(
                    df.image_summary.reclaimable
                        + df.container_summary.reclaimable
                        + df.volume_summary.reclaimable
                        + df.build_cache_summary.reclaimable
                )
            ),
            OutputMode::Json => format!("{}\n", serde_json::to_string_pretty(df)?),
        })
    }

    /// Print any serializable value; tables are the caller's job in normal mode.
    pub fn json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a section title (normal mode only).
    pub fn heading(&self, title: &str) {
        if self.mode == OutputMode::Normal {
            println!("\n{title}");
        }
    }

    /// Report a completed mutation on `id`.
    pub fn success(&self, action: &str, id: &str) {
        match self.mode {
            OutputMode::Normal => println!("{action} {id}"),
            OutputMode::Quiet => println!("{id}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message: action,
                    id: Some(id),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print a plain status line.
    pub fn message(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message,
                    id: None,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    id: None,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

/// Left-aligned columns separated by three spaces.
pub fn render_table<R: Tabular>(rows: &[R]) -> String {
    let headers = R::headers();
    let cells: Vec<Vec<String>> = rows.iter().map(Tabular::cells).collect();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    layout(&header_cells, &cells)
}

fn layout(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        let mut out = String::new();
        for (i, (cell, width)) in cells.iter().zip(&widths).enumerate() {
            if i + 1 == cells.len() {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}   ", cell, width = *width));
            }
        }
        out.trim_end().to_string() + "\n"
    };

    let mut out = line(headers);
    for row in rows {
        out.push_str(&line(row));
    }
    out
}

fn render_usage_table(df: &DiskUsageSnapshot) -> String {
    let headers: Vec<String> = ["TYPE", "TOTAL", "ACTIVE", "SIZE", "RECLAIMABLE"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let row = |kind: &str, summary: &UsageSummary| {
        vec![
            kind.to_string(),
            summary.total_count.to_string(),
            summary.active_count.to_string(),
            human_size(summary.total_size),
            reclaimable(summary),
        ]
    };

    let rows = vec![
        row("Images", &df.image_summary),
        row("Containers", &df.container_summary),
        row("Local Volumes", &df.volume_summary),
        row("Build Cache", &df.build_cache_summary),
    ];
    layout(&headers, &rows)
}

/// `1.2GB (40%)`.
fn reclaimable(summary: &UsageSummary) -> String {
    if summary.total_size == 0 {
        return human_size(summary.reclaimable);
    }
    let percent = summary.reclaimable as f64 * 100.0 / summary.total_size as f64;
    format!("{} ({:.0}%)", human_size(summary.reclaimable), percent)
}

/// Decimal units as the engine CLIs print them: `512B`, `1.5kB`, `187.7MB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["kB", "MB", "GB", "TB", "PB"];

    if bytes < 1000 {
        return format!("{bytes}B");
    }

    let mut value = bytes as f64 / 1000.0;
    let mut unit = 0;
    while value >= 1000.0 && unit + 1 < UNITS.len() {
        value /= 1000.0;
        unit += 1;
    }
    format!("{:.1}{}", value, UNITS[unit])
}

fn timestamp(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{head}…")
}
