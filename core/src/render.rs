use crate::filter::is_valid_term;
use crate::index::{Locations, OccurrenceIndex, PageNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_FREQ_LIMIT: u64 = 10;
pub const SYMBOL_SECTION: &str = "Numbers & Symbols";

/// How the `doc.page` locations of a term are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationOrder {
    /// Plain string order of the rendered `doc.page` text, so `1.10` precedes `1.2`.
    #[default]
    Lexical,
    /// Integer document ids numerically (others after them, as strings), then page number.
    Numeric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Inclusive upper bound on a term's total occurrences.
    pub freq_limit: u64,
    #[serde(default)]
    pub location_order: LocationOrder,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { freq_limit: DEFAULT_FREQ_LIMIT, location_order: LocationOrder::default() }
    }
}

/// Section heading for a term: its uppercased first letter, or [`SYMBOL_SECTION`].
pub fn section_for(term: &str) -> String {
    let Some(first) = term.chars().next() else { return SYMBOL_SECTION.to_string() };
    let upper: String = first.to_uppercase().collect();
    if upper.chars().all(char::is_alphabetic) { upper } else { SYMBOL_SECTION.to_string() }
}

/// Terms that make it into the rendered index, in output order.
///
/// A term is kept when its occurrences (same-page repeats included) stay within the
/// limit and its shape passes [`is_valid_term`]. Ordering ignores case; terms that only
/// differ in case fall back to plain string order.
pub fn included_terms<'a>(index: &'a OccurrenceIndex, options: &RenderOptions) -> Vec<&'a str> {
    let mut terms: Vec<(String, &str)> = index
        .iter()
        .filter(|(term, _)| index.total_occurrences(term) <= options.freq_limit)
        .filter(|(term, _)| is_valid_term(term))
        .map(|(term, _)| (term.to_lowercase(), term.as_str()))
        .collect();
    terms.sort_unstable();
    terms.into_iter().map(|(_, term)| term).collect()
}

/// Deduplicated `doc.page` strings for one term.
pub fn format_locations(locations: &Locations, order: LocationOrder) -> Vec<String> {
    match order {
        LocationOrder::Lexical => {
            let set: BTreeSet<String> = locations
                .iter()
                .flat_map(|(doc, pages)| pages.iter().map(move |p| format!("{doc}.{p}")))
                .collect();
            set.into_iter().collect()
        }
        LocationOrder::Numeric => {
            let mut pairs: Vec<(&str, PageNumber)> = locations
                .iter()
                .flat_map(|(doc, pages)| pages.iter().map(move |p| (doc.as_str(), *p)))
                .collect();
            pairs.sort_by(|a, b| doc_key(a.0).cmp(&doc_key(b.0)).then(a.1.cmp(&b.1)));
            pairs.dedup();
            pairs.into_iter().map(|(doc, p)| format!("{doc}.{p}")).collect()
        }
    }
}

fn doc_key(doc: &str) -> (bool, i64, &str) {
    match doc.parse::<i64>() {
        Ok(n) => (false, n, doc),
        Err(_) => (true, 0, doc),
    }
}

/// Render the index as `# Section` headings followed by `- **term**: locations` lines.
pub fn render_markdown(index: &OccurrenceIndex, options: &RenderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Option<String> = None;
    let terms = included_terms(index, options);
    tracing::debug!(included = terms.len(), total = index.len(), "rendering index");

    for term in terms {
        let section = section_for(term);
        if current.as_deref() != Some(section.as_str()) {
            lines.push(format!("# {section}"));
            current = Some(section);
        }
        let locations = index
            .locations(term)
            .map(|l| format_locations(l, options.location_order))
            .unwrap_or_default();
        lines.push(format!("- **{}**: {}", term, locations.join(", ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(n: u64) -> RenderOptions {
        RenderOptions { freq_limit: n, ..Default::default() }
    }

    #[test]
    fn sections() {
        assert_eq!(section_for("apple"), "A");
        assert_eq!(section_for("Zebra"), "Z");
        assert_eq!(section_for("-dash"), SYMBOL_SECTION);
        assert_eq!(section_for("42"), SYMBOL_SECTION);
        assert_eq!(section_for(""), SYMBOL_SECTION);
    }

    #[test]
    fn renders_sections_and_bullets() {
        let mut idx = OccurrenceIndex::new();
        idx.record("banana", "1", 4);
        idx.record("Apple", "1", 2);
        idx.record("apple pie", "2", 9);
        idx.record("-dash", "1", 1);
        let out = render_markdown(&idx, &limit(10));
        assert_eq!(
            out,
            "# Numbers & Symbols\n- **-dash**: 1.1\n# A\n- **Apple**: 1.2\n- **apple pie**: 2.9\n# B\n- **banana**: 1.4"
        );
    }

    #[test]
    fn invalid_and_frequent_terms_are_dropped() {
        let mut idx = OccurrenceIndex::new();
        for _ in 0..3 {
            idx.record("common", "1", 1);
        }
        idx.record("rare", "1", 1);
        idx.record("fox .", "1", 1);
        idx.record("1984", "1", 1);
        assert_eq!(included_terms(&idx, &limit(2)), vec!["rare"]);
        assert_eq!(included_terms(&idx, &limit(3)), vec!["common", "rare"]);
    }

    #[test]
    fn same_page_repeats_count_toward_limit() {
        let mut idx = OccurrenceIndex::new();
        for _ in 0..3 {
            idx.record("owl", "1", 1);
        }
        assert_eq!(render_markdown(&idx, &limit(2)), "");
        assert_eq!(render_markdown(&idx, &limit(3)), "# O\n- **owl**: 1.1");
    }

    #[test]
    fn case_variants_sort_deterministically() {
        let mut idx = OccurrenceIndex::new();
        idx.record("fox", "1", 1);
        idx.record("Fox", "1", 1);
        idx.record("FOX", "1", 1);
        assert_eq!(included_terms(&idx, &limit(10)), vec!["FOX", "Fox", "fox"]);
    }

    #[test]
    fn lexical_locations_keep_string_order() {
        let mut idx = OccurrenceIndex::new();
        for (doc, page) in [("1", 10), ("1", 2), ("1", 2), ("10", 1), ("2", 3)] {
            idx.record("owl", doc, page);
        }
        let locs = format_locations(idx.locations("owl").unwrap(), LocationOrder::Lexical);
        assert_eq!(locs, vec!["1.10", "1.2", "10.1", "2.3"]);
    }

    #[test]
    fn numeric_locations_order_by_number() {
        let mut idx = OccurrenceIndex::new();
        for (doc, page) in [("1", 10), ("1", 2), ("1", 2), ("10", 1), ("2", 3), ("appendix", 1)] {
            idx.record("owl", doc, page);
        }
        let locs = format_locations(idx.locations("owl").unwrap(), LocationOrder::Numeric);
        assert_eq!(locs, vec!["1.2", "1.10", "2.3", "10.1", "appendix.1"]);
    }

    #[test]
    fn empty_index_renders_empty_string() {
        assert_eq!(render_markdown(&OccurrenceIndex::new(), &RenderOptions::default()), "");
    }
}
