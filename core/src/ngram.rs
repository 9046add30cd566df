use crate::stopwords::StopwordSet;

pub const MIN_NGRAM: usize = 2;

/// Space-joined windows of `MIN_NGRAM..=max_n` consecutive tokens.
///
/// Output is grouped by size: every bigram, then every trigram, and so on. Windows whose
/// first word is a stopword are skipped. Repeats are kept.
pub fn ngrams(tokens: &[String], stopwords: &StopwordSet, max_n: usize) -> Vec<String> {
    let mut out = Vec::new();
    for n in MIN_NGRAM..=max_n.min(tokens.len()) {
        for window in tokens.windows(n) {
            let leading = window[0].split(' ').next().unwrap_or_default();
            if stopwords.contains(leading) { continue; }
            out.push(window.join(" "));
        }
    }
    out
}
