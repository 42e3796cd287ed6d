use std::path::PathBuf;

/// Progress notifications emitted while a run executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    PairStarted {
        category: String,
        city: String,
        search_url: String,
    },
    PanelNotFound {
        category: String,
        city: String,
    },
    LinksCollected {
        category: String,
        city: String,
        count: usize,
    },
    /// About to extract listing `index` of `total` (1-based).
    ListingVisited {
        index: usize,
        total: usize,
        url: String,
    },
    /// Address filter rejected the listing.
    ListingSkipped {
        url: String,
        address: String,
    },
    ListingFailed {
        url: String,
        reason: String,
    },
    RecordProduced {
        url: String,
    },
    OutputWritten {
        path: PathBuf,
        records: usize,
    },
    NoDataCollected,
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: RunEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(RunEvent) + Send + Sync,
{
    fn emit(&self, event: RunEvent) {
        self(event)
    }
}
