use crate::error::Result;
use crate::index::{OccurrenceIndex, PageNumber};
use crate::ngram::ngrams;
use crate::source::PageSource;
use crate::stopwords::StopwordSet;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};

/// Page offset that reproduces the original books' numbering, where the first two
/// sheets are front matter.
pub const DEFAULT_PAGE_OFFSET: i64 = -2;
pub const DEFAULT_MAX_NGRAM: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexOptions {
    /// Added to the 1-based page position to get the reported page number.
    #[serde(default = "default_page_offset")]
    pub page_offset: i64,
    /// Longest phrase recorded; values below 2 record single words only.
    #[serde(default = "default_max_ngram")]
    pub max_ngram: usize,
    /// NFKC-fold page text before tokenizing.
    #[serde(default = "default_normalize")]
    pub normalize_unicode: bool,
}

fn default_page_offset() -> i64 { DEFAULT_PAGE_OFFSET }
fn default_max_ngram() -> usize { DEFAULT_MAX_NGRAM }
fn default_normalize() -> bool { true }

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            page_offset: default_page_offset(),
            max_ngram: default_max_ngram(),
            normalize_unicode: default_normalize(),
        }
    }
}

impl IndexOptions {
    /// Printed page number of the zero-based `page_index`, clamped to the `i64` range.
    pub fn page_number(&self, page_index: usize) -> PageNumber {
        i64::try_from(page_index)
            .unwrap_or(i64::MAX)
            .saturating_add(1)
            .saturating_add(self.page_offset)
    }
}

/// Builds the occurrence index of a single document.
pub struct DocumentIndexer<'a> {
    stopwords: &'a StopwordSet,
    options: &'a IndexOptions,
}

impl<'a> DocumentIndexer<'a> {
    pub fn new(stopwords: &'a StopwordSet, options: &'a IndexOptions) -> Self {
        Self { stopwords, options }
    }

    /// Record every word and phrase of one page. Returns the number of occurrences added.
    pub fn index_page(&self, index: &mut OccurrenceIndex, doc_id: &str, page_index: usize, text: &str) -> usize {
        let page = self.options.page_number(page_index);
        let words = tokenize(text, self.stopwords, self.options.normalize_unicode);
        let phrases = ngrams(&words, self.stopwords, self.options.max_ngram);
        for term in words.iter().chain(phrases.iter()) {
            index.record(term, doc_id, page);
        }
        words.len() + phrases.len()
    }

    /// Index all pages of `source` in order.
    pub fn index_document(&self, doc_id: &str, source: &mut dyn PageSource) -> Result<OccurrenceIndex> {
        let mut index = OccurrenceIndex::new();
        let pages = source.page_count();
        let mut occurrences = 0usize;
        for i in 0..pages {
            let text = source.page_text(i)?;
            let added = self.index_page(&mut index, doc_id, i, &text);
            tracing::debug!(doc_id, page = i, added, "indexed page");
            occurrences += added;
        }
        tracing::info!(doc_id, pages, terms = index.len(), occurrences, "indexed document");
        Ok(index)
    }
}
