use crate::document::model::SiteDocument;

/// Events published by the in-memory site state after a committed change.
#[derive(Debug, Clone)]
pub enum SiteEvent {
    /// A new revision of the document was committed.
    Committed(CommittedEvent),
}

#[derive(Debug, Clone)]
pub struct CommittedEvent {
    /// Monotonic revision counter, starting at 1 for the first commit.
    pub revision: u64,
    /// Snapshot of the document as committed.
    pub document: SiteDocument,
}
