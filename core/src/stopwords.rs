use crate::error::{IndexError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions that mark a stopword source as a file reference rather than a literal list.
const LIST_FILE_EXTENSIONS: &[&str] = &["txt", "csv", "lst", "list"];

/// Lowercased words excluded from tokenization and from leading n-gram position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn new() -> Self { Self::default() }

    /// Build a set from either an existing file or a literal comma separated list.
    ///
    /// Files are split on commas and newlines, literals on commas only. A source that
    /// names a missing file (it has a path separator or a list-file extension and no
    /// comma) is an error instead of being read as a one-word list.
    pub fn from_source(source: &str) -> Result<Self> {
        let path = Path::new(source);
        if !source.is_empty() && path.is_file() {
            return Self::from_file(path);
        }
        if looks_like_path(source) {
            return Err(IndexError::StopwordFileNotFound(PathBuf::from(source)));
        }
        let set = Self::parse_list(source, &[',']);
        tracing::debug!(count = set.len(), "loaded literal stopword list");
        Ok(set)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let set = Self::parse_list(&text, &[',', '\n']);
        tracing::info!(path = %path.display(), count = set.len(), "loaded stopwords");
        Ok(set)
    }

    /// Split `text` on any of `separators`, trimming and lowercasing each piece.
    pub fn parse_list(text: &str, separators: &[char]) -> Self {
        let words = text
            .split(|c: char| separators.contains(&c))
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Merge another set in (used for the common-words list).
    pub fn extend(&mut self, other: StopwordSet) {
        self.words.extend(other.words);
    }

    pub fn contains(&self, word: &str) -> bool {
        if self.words.is_empty() { return false; }
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

fn looks_like_path(source: &str) -> bool {
    if source.contains(',') || source.contains('\n') || source.trim().is_empty() {
        return false;
    }
    if source.contains('/') || source.contains('\\') {
        return true;
    }
    Path::new(source.trim())
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| LIST_FILE_EXTENSIONS.iter().any(|known| e.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn literal_list_is_trimmed_and_lowercased() {
        let set = StopwordSet::from_source(" The, AND ,of,the").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("the"));
        assert!(set.contains("THE"));
        assert!(set.contains("and"));
    }

    #[test]
    fn empty_source_is_empty_set() {
        let set = StopwordSet::from_source("").unwrap();
        assert!(set.is_empty());
        assert!(!set.contains(""));
    }

    #[test]
    fn file_source_splits_on_commas_and_newlines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "alpha, Beta\ngamma\n\ndelta,").unwrap();
        let set = StopwordSet::from_source(file.path().to_str().unwrap()).unwrap();
        assert_eq!(set.len(), 4);
        assert!(set.contains("beta"));
        assert!(set.contains("delta"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = StopwordSet::from_source("lists/missing-stopwords.txt").unwrap_err();
        assert!(matches!(err, IndexError::StopwordFileNotFound(_)));
        let err = StopwordSet::from_source("stop.txt").unwrap_err();
        assert!(matches!(err, IndexError::StopwordFileNotFound(_)));
    }

    #[test]
    fn single_literal_word_is_not_a_path() {
        let set = StopwordSet::from_source("however").unwrap();
        assert!(set.contains("however"));
    }

    #[test]
    fn extend_merges_common_words() {
        let mut set = StopwordSet::parse_list("the,a", &[',']);
        set.extend(StopwordSet::parse_list("chapter,The", &[',']));
        assert_eq!(set.len(), 3);
        assert!(set.contains("chapter"));
    }
}
