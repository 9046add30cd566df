//! Page-text providers.
//!
//! The index builder only needs a page count and the text of a 0-based page. Documents
//! reach it as plain text with form-feed page breaks (what `pdftotext` writes), JSON or
//! JSONL page lists, a directory of per-page `.txt` files, or, with the `pdf` feature,
//! already-decrypted PDF files.

use crate::error::{IndexError, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FORM_FEED: char = '\x0c';

pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Text of the page at 0-based `index`.
    fn page_text(&mut self, index: usize) -> Result<String>;
}

/// Pages held in memory.
#[derive(Debug, Clone, Default)]
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { pages: pages.into_iter().map(Into::into).collect() }
    }

    /// Split on form feeds. A single trailing form feed does not open an empty last page.
    pub fn from_form_feed(text: &str) -> Self {
        if text.is_empty() { return Self::default(); }
        let body = text.strip_suffix(FORM_FEED).unwrap_or(text);
        Self::new(body.split(FORM_FEED))
    }

    pub fn from_text_file(path: &Path) -> Result<Self> {
        Ok(Self::from_form_feed(&fs::read_to_string(path)?))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let doc: JsonDocument = serde_json::from_reader(reader)?;
        let records = match doc {
            JsonDocument::Pages(records) => records,
            JsonDocument::Wrapped { pages } => pages,
        };
        Ok(Self::new(records.into_iter().map(PageRecord::into_text)))
    }

    pub fn from_jsonl_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut pages = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let record: PageRecord = serde_json::from_str(&line)
                .map_err(|e| IndexError::MalformedPage { line: n + 1, reason: e.to_string() })?;
            pages.push(record.into_text());
        }
        Ok(Self { pages })
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize { self.pages.len() }

    fn page_text(&mut self, index: usize) -> Result<String> {
        self.pages
            .get(index)
            .cloned()
            .ok_or(IndexError::PageOutOfRange { index, count: self.pages.len() })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRecord {
    Text(String),
    Object { text: String },
}

impl PageRecord {
    fn into_text(self) -> String {
        match self {
            PageRecord::Text(text) | PageRecord::Object { text } => text,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Pages(Vec<PageRecord>),
    Wrapped { pages: Vec<PageRecord> },
}

/// One `.txt` file per page, read on demand. Pages follow path order, so file names
/// should be zero padded (`page-007.txt`).
#[derive(Debug, Clone)]
pub struct DirectoryPages {
    files: Vec<PathBuf>,
}

impl DirectoryPages {
    pub fn open(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| IndexError::Io(e.into()))?;
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
        Ok(Self { files })
    }
}

impl PageSource for DirectoryPages {
    fn page_count(&self) -> usize { self.files.len() }

    fn page_text(&mut self, index: usize) -> Result<String> {
        let file = self
            .files
            .get(index)
            .ok_or(IndexError::PageOutOfRange { index, count: self.files.len() })?;
        Ok(fs::read_to_string(file)?)
    }
}

#[cfg(feature = "pdf")]
pub struct PdfPages {
    doc: lopdf::Document,
    page_numbers: Vec<u32>,
}

#[cfg(feature = "pdf")]
impl PdfPages {
    pub fn open(path: &Path) -> Result<Self> {
        let doc = lopdf::Document::load(path)?;
        let page_numbers = doc.get_pages().keys().copied().collect();
        Ok(Self { doc, page_numbers })
    }
}

#[cfg(feature = "pdf")]
impl PageSource for PdfPages {
    fn page_count(&self) -> usize { self.page_numbers.len() }

    fn page_text(&mut self, index: usize) -> Result<String> {
        let number = self
            .page_numbers
            .get(index)
            .ok_or(IndexError::PageOutOfRange { index, count: self.page_numbers.len() })?;
        Ok(self.doc.extract_text(&[*number])?)
    }
}

/// Open a document by path, picking the reader from the extension.
pub fn open_document(path: &Path) -> Result<Box<dyn PageSource>> {
    if path.is_dir() {
        return Ok(Box::new(DirectoryPages::open(path)?));
    }
    let ext = path.extension().and_then(|s| s.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("txt") | Some("text") => Ok(Box::new(TextPages::from_text_file(path)?)),
        Some("json") => Ok(Box::new(TextPages::from_json_file(path)?)),
        Some("jsonl") => Ok(Box::new(TextPages::from_jsonl_file(path)?)),
        #[cfg(feature = "pdf")]
        Some("pdf") => Ok(Box::new(PdfPages::open(path)?)),
        _ => Err(IndexError::UnsupportedFormat(path.to_path_buf())),
    }
}
