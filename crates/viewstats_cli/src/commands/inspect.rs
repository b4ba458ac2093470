//! Inspect command implementation.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use viewstats_event::{Batch, WirePageView};
use viewstats_storage::{FileSnapshotStore, SnapshotStore};

/// Snapshot inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Snapshot file path.
    pub path: String,
    /// Whether a snapshot exists.
    pub present: bool,
    /// Snapshot file size in bytes.
    pub size_bytes: u64,
    /// Number of saved page views.
    pub events: usize,
    /// Number of distinct sessions among them.
    pub sessions: usize,
    /// Number of distinct subjects among them.
    pub subjects: usize,
    /// Earliest capture time (epoch millis).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<u64>,
    /// Latest capture time (epoch millis).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest: Option<u64>,
    /// The saved views (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<Vec<WirePageView>>,
}

impl InspectResult {
    /// Summarizes `snapshot`, which is `None` when the slot is empty.
    pub fn summarize(path: &Path, size_bytes: u64, snapshot: Option<&Batch>, show_views: bool) -> Self {
        let empty = Batch::new();
        let batch = snapshot.unwrap_or(&empty);

        let sessions: BTreeSet<_> = batch.iter().map(|v| v.session()).collect();
        let subjects: BTreeSet<_> = batch.iter().map(|v| v.subject()).collect();

        Self {
            path: path.display().to_string(),
            present: snapshot.is_some(),
            size_bytes,
            events: batch.len(),
            sessions: sessions.len(),
            subjects: subjects.len(),
            oldest: batch.iter().map(|v| v.captured_at()).min(),
            newest: batch.iter().map(|v| v.captured_at()).max(),
            views: show_views.then(|| batch.iter().map(WirePageView::from).collect()),
        }
    }
}

/// Runs the inspect command.
pub fn run(cache_dir: &Path, show_views: bool, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileSnapshotStore::open(cache_dir)?;
    let snapshot = store.peek()?;
    let size = std::fs::metadata(store.path()).map(|m| m.len()).unwrap_or(0);

    let result = InspectResult::summarize(store.path(), size, snapshot.as_ref(), show_views);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("viewstats Snapshot Inspection");
    println!("=============================");
    println!();
    println!("Path: {}", result.path);
    println!();

    if !result.present {
        println!("No saved events.");
        return;
    }

    println!("Snapshot:");
    println!("  Size:     {} bytes", result.size_bytes);
    println!("  Events:   {}", result.events);
    println!("  Sessions: {}", result.sessions);
    println!("  Subjects: {}", result.subjects);
    if let (Some(oldest), Some(newest)) = (result.oldest, result.newest) {
        println!("  Span:     {oldest} .. {newest} ({})", format_span(newest - oldest));
    }

    if let Some(views) = &result.views {
        println!();
        println!("Views:");
        for view in views {
            println!("  {} {} {}", view.timestamp, view.session_id, view.page);
        }
    }
}

fn format_span(millis: u64) -> String {
    if millis < 1_000 {
        format!("{millis} ms")
    } else if millis < 60_000 {
        format!("{:.1} s", millis as f64 / 1_000.0)
    } else if millis < 3_600_000 {
        format!("{:.1} min", millis as f64 / 60_000.0)
    } else {
        format!("{:.1} h", millis as f64 / 3_600_000.0)
    }
}
