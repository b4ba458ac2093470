//! Record command implementation.

use super::{print_stats, CollectorArgs};
use std::path::Path;
use tracing::debug;
use viewstats_core::{Tracker, TrackerConfig};
use viewstats_storage::FileSnapshotStore;

/// Runs the record command.
///
/// Records one view per subject id. Views still buffered when the command
/// exits are saved to the cache directory unless `flush` is set, in which
/// case the buffer is delivered first.
pub fn run(
    cache_dir: &Path,
    collector: &CollectorArgs,
    subjects: &[String],
    flush: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(subjects = subjects.len(), cache_dir = %cache_dir.display(), "recording");
    let store = FileSnapshotStore::open(cache_dir)?;
    let tracker = Tracker::setup(
        TrackerConfig::default().verbose(verbose),
        collector.delivery()?,
        store,
    )?;

    let mut invalid = 0;
    for subject in subjects {
        if let Err(e) = tracker.record(subject) {
            eprintln!("Skipping {subject:?}: {e}");
            invalid += 1;
        }
    }

    if flush {
        tracker.on_background();
        tracker.wait_idle();
    }

    let stats = tracker.stats();
    let pending = tracker.pending_events();
    tracker.close();

    println!("Subjects:  {}", accepted_line(subjects.len(), invalid));
    print_stats(&stats, 0);
    if pending > 0 {
        println!("{pending} buffered events saved to {}", cache_dir.display());
    }

    if invalid > 0 && invalid == subjects.len() {
        return Err("no valid subject ids given".into());
    }
    Ok(())
}

fn accepted_line(given: usize, invalid: usize) -> String {
    if invalid == 0 {
        format!("{given} subject ids accepted")
    } else {
        format!("{} of {given} subject ids accepted", given - invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_line_reports_invalid_ids() {
        assert_eq!(accepted_line(3, 0), "3 subject ids accepted");
        assert_eq!(accepted_line(3, 1), "2 of 3 subject ids accepted");
    }
}
