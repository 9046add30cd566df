use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub type Term = String;
pub type DocumentId = String;
pub type PageNumber = i64;

/// Pages a term was seen on, per document. One entry per occurrence; rendering dedups.
pub type Locations = HashMap<DocumentId, Vec<PageNumber>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceIndex {
    terms: HashMap<Term, Locations>,
}

impl OccurrenceIndex {
    pub fn new() -> Self { Self::default() }

    /// Record one occurrence of `term` on `page` of `doc`.
    pub fn record(&mut self, term: &str, doc: &str, page: PageNumber) {
        self.terms
            .entry(term.to_string())
            .or_default()
            .entry(doc.to_string())
            .or_default()
            .push(page);
    }

    /// Fold `other` into `self`.
    ///
    /// New terms move over whole. For existing terms each document's pages are appended,
    /// so merging the same inputs in any order produces the same multiset of pages.
    /// Returns the ids of documents that were already present for some term.
    pub fn merge(&mut self, other: OccurrenceIndex) -> BTreeSet<DocumentId> {
        let mut collisions = BTreeSet::new();
        for (term, incoming) in other.terms {
            match self.terms.get_mut(&term) {
                None => { self.terms.insert(term, incoming); }
                Some(existing) => {
                    for (doc, pages) in incoming {
                        match existing.get_mut(&doc) {
                            Some(current) => {
                                current.extend(pages);
                                current.sort_unstable();
                                collisions.insert(doc);
                            }
                            None => { existing.insert(doc, pages); }
                        }
                    }
                }
            }
        }
        collisions
    }

    pub fn locations(&self, term: &str) -> Option<&Locations> { self.terms.get(term) }

    pub fn pages(&self, term: &str, doc: &str) -> Option<&[PageNumber]> {
        self.terms.get(term)?.get(doc).map(Vec::as_slice)
    }

    /// Occurrences of `term` across all documents, same-page repeats included.
    pub fn total_occurrences(&self, term: &str) -> u64 {
        self.terms.get(term).map(count_locations).unwrap_or(0)
    }

    pub fn frequencies(&self) -> FrequencyTable {
        let counts = self.terms.iter().map(|(t, l)| (t.clone(), count_locations(l))).collect();
        FrequencyTable { counts }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &Locations)> { self.terms.iter() }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}

fn count_locations(locations: &Locations) -> u64 {
    locations.values().map(|p| p.len() as u64).sum()
}

/// Occurrence count per term, derived from an [`OccurrenceIndex`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: HashMap<Term, u64>,
}

impl FrequencyTable {
    pub fn get(&self, term: &str) -> u64 { self.counts.get(term).copied().unwrap_or(0) }

    /// Rows ordered by descending count, then term.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut rows: Vec<(&str, u64)> = self.counts.iter().map(|(t, n)| (t.as_str(), *n)).collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    /// Occurrences of all terms together.
    pub fn total(&self) -> u64 { self.counts.values().sum() }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_repeats() {
        let mut idx = OccurrenceIndex::new();
        idx.record("fox", "1", 3);
        idx.record("fox", "1", 3);
        idx.record("fox", "1", 1);
        assert_eq!(idx.pages("fox", "1"), Some(&[3, 3, 1][..]));
        assert_eq!(idx.total_occurrences("fox"), 3);
    }

    #[test]
    fn merge_inserts_and_extends() {
        let mut a = OccurrenceIndex::new();
        a.record("fox", "A", 1);
        let mut b = OccurrenceIndex::new();
        b.record("fox", "B", 2);
        b.record("owl", "B", 5);
        let collisions = a.merge(b);
        assert!(collisions.is_empty());
        assert_eq!(a.len(), 2);
        assert_eq!(a.pages("fox", "A"), Some(&[1][..]));
        assert_eq!(a.pages("fox", "B"), Some(&[2][..]));
        assert_eq!(a.total_occurrences("owl"), 1);
    }

    #[test]
    fn merge_with_same_document_appends() {
        let mut a = OccurrenceIndex::new();
        a.record("fox", "A", 4);
        let mut b = OccurrenceIndex::new();
        b.record("fox", "A", 2);
        let collisions = a.merge(b);
        assert_eq!(collisions.into_iter().collect::<Vec<_>>(), vec!["A".to_string()]);
        assert_eq!(a.pages("fox", "A"), Some(&[2, 4][..]));
    }

    #[test]
    fn frequencies_match_occurrence_counts() {
        let mut idx = OccurrenceIndex::new();
        idx.record("fox", "A", 1);
        idx.record("fox", "B", 1);
        idx.record("owl", "A", 2);
        let freq = idx.frequencies();
        assert_eq!(freq.get("fox"), 2);
        assert_eq!(freq.get("owl"), 1);
        assert_eq!(freq.get("cat"), 0);
        assert_eq!(freq.sorted(), vec![("fox", 2), ("owl", 1)]);
    }
}
