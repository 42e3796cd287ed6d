use mapscout_engine::{ProgressSink, RunEvent};

/// Prints run progress to stdout, one line per event.
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn emit(&self, event: RunEvent) {
        if let Some(line) = describe(&event) {
            println!("{line}");
        }
    }
}

fn describe(event: &RunEvent) -> Option<String> {
    let line = match event {
        RunEvent::PairStarted { category, city, .. } => {
            format!("\nSearching: {category} in {city}")
        }
        RunEvent::PanelNotFound { .. } => "Results panel not found".to_string(),
        RunEvent::LinksCollected { count: 0, .. } => "No results".to_string(),
        RunEvent::LinksCollected { count, .. } => format!("Collected links: {count}"),
        RunEvent::ListingVisited { index, total, url } => format!("[{index}/{total}] {url}"),
        RunEvent::ListingSkipped { address, .. } => format!("Skipped (address: {address})"),
        RunEvent::ListingFailed { reason, .. } => format!("Failed: {reason}"),
        RunEvent::RecordProduced { .. } => return None,
        RunEvent::OutputWritten { path, records } => {
            format!("\nSaved {records} records to {}", path.display())
        }
        RunEvent::NoDataCollected => "\nNo data collected".to_string(),
    };
    Some(line)
}
