pub mod aggregate;
pub mod builder;
pub mod error;
pub mod export;
pub mod filter;
pub mod index;
pub mod ngram;
pub mod render;
pub mod source;
pub mod stopwords;
pub mod tokenizer;

pub use aggregate::{Aggregator, DocumentSummary};
pub use builder::{DocumentIndexer, IndexOptions};
pub use error::{IndexError, Result};
pub use index::{DocumentId, FrequencyTable, OccurrenceIndex, PageNumber, Term};
pub use render::{render_markdown, LocationOrder, RenderOptions};
pub use source::{open_document, PageSource, TextPages};
pub use stopwords::StopwordSet;
