use crate::index::{DocumentId, FrequencyTable, OccurrenceIndex};

/// What one document contributed to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub doc_id: DocumentId,
    pub pages: usize,
    pub terms: usize,
    pub occurrences: u64,
}

/// Accumulates per-document indexes into the combined index of one run.
#[derive(Debug, Default)]
pub struct Aggregator {
    index: OccurrenceIndex,
    documents: Vec<DocumentSummary>,
}

impl Aggregator {
    pub fn new() -> Self { Self::default() }

    /// Merge a finished document index built from `pages` pages. Its frequency table is
    /// returned for callers that export per-document counts.
    pub fn add_document(&mut self, doc_id: &str, pages: usize, index: OccurrenceIndex) -> FrequencyTable {
        let frequencies = index.frequencies();
        let summary = DocumentSummary {
            doc_id: doc_id.to_string(),
            pages,
            terms: index.len(),
            occurrences: frequencies.total(),
        };
        if self.documents.iter().any(|d| d.doc_id == doc_id) {
            tracing::warn!(doc_id, "document id seen before, pages will be combined");
        }
        let collisions = self.index.merge(index);
        if !collisions.is_empty() {
            tracing::debug!(?collisions, "merged into existing document entries");
        }
        self.documents.push(summary);
        frequencies
    }

    pub fn index(&self) -> &OccurrenceIndex { &self.index }

    pub fn frequencies(&self) -> FrequencyTable { self.index.frequencies() }

    pub fn documents(&self) -> &[DocumentSummary] { &self.documents }

    pub fn into_index(self) -> OccurrenceIndex { self.index }
}
