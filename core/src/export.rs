use crate::error::Result;
use crate::index::FrequencyTable;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const HEADER: [&str; 2] = ["Word", "Frequency"];

fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\r' | '\n')) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Two-column CSV of term counts, most frequent first.
pub fn frequency_csv(table: &FrequencyTable) -> String {
    let mut out = format!("{},{}\r\n", HEADER[0], HEADER[1]);
    for (term, count) in table.sorted() {
        out.push_str(&csv_field(term));
        out.push(',');
        out.push_str(&count.to_string());
        out.push_str("\r\n");
    }
    out
}

pub fn write_frequency_csv(path: &Path, table: &FrequencyTable) -> Result<()> {
    fs::write(path, frequency_csv(table))?;
    tracing::info!(path = %path.display(), rows = table.len(), "wrote frequencies");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::OccurrenceIndex;

    #[test]
    fn header_and_rows() {
        let mut idx = OccurrenceIndex::new();
        idx.record("fox", "1", 1);
        idx.record("fox", "1", 2);
        idx.record("owl", "1", 1);
        assert_eq!(frequency_csv(&idx.frequencies()), "Word,Frequency\r\nfox,2\r\nowl,1\r\n");
    }

    #[test]
    fn punctuation_terms_are_quoted() {
        let mut idx = OccurrenceIndex::new();
        idx.record(",", "1", 1);
        idx.record("say \"hi\"", "1", 1);
        let csv = frequency_csv(&idx.frequencies());
        assert!(csv.contains("\",\",1\r\n"));
        assert!(csv.contains("\"say \"\"hi\"\"\",1\r\n"));
    }

    #[test]
    fn empty_table_is_header_only() {
        assert_eq!(frequency_csv(&FrequencyTable::default()), "Word,Frequency\r\n");
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.csv");
        write_frequency_csv(&path, &FrequencyTable::default()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "Word,Frequency\r\n");
    }
}
