use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use index_core::builder::{DEFAULT_MAX_NGRAM, DEFAULT_PAGE_OFFSET};
use index_core::export::write_frequency_csv;
use index_core::render::{included_terms, DEFAULT_FREQ_LIMIT};
use index_core::{
    open_document, render_markdown, Aggregator, DocumentIndexer, IndexOptions, LocationOrder, RenderOptions,
    StopwordSet,
};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE_HINT: &str = "You must provide equal numbers of input files and book numbers, \
                          and either an output file or the --exportfreq flag.";

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a back-of-book index from the page text of one or more books", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index the input documents and render the result as Markdown
    Build(BuildArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Input documents: .txt (form-feed page breaks), .json, .jsonl, a directory of page files, or .pdf with the `pdf` feature
    #[arg(short, long, num_args = 1.., required = true)]
    input: Vec<PathBuf>,
    /// Book number for each input, in the same order
    #[arg(short, long, num_args = 1..)]
    book: Vec<String>,
    /// Markdown file to write the index to
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Stopwords: a file (comma or newline separated) or a comma separated list
    #[arg(short, long, default_value = "")]
    stopwords: String,
    /// Common words to exclude, same forms as --stopwords
    #[arg(short, long, default_value = "")]
    commonwords: String,
    /// Also write per-book and combined word frequencies
    #[arg(short, long, default_value_t = false)]
    exportfreq: bool,
    /// Frequency file; per-book files get `_<book>` appended
    #[arg(short, long, default_value = "frequencies.csv")]
    freqfile: PathBuf,
    /// Highest total occurrence count a term may have and still be listed
    #[arg(short = 'l', long, env = "INDEXER_FREQ_LIMIT", default_value_t = DEFAULT_FREQ_LIMIT)]
    freqlimit: u64,
    /// Added to the 1-based page position to get the printed page number
    #[arg(long, env = "INDEXER_PAGE_OFFSET", default_value_t = DEFAULT_PAGE_OFFSET, allow_negative_numbers = true)]
    page_offset: i64,
    /// Longest phrase to index, in words
    #[arg(long, default_value_t = DEFAULT_MAX_NGRAM)]
    max_ngram: usize,
    /// Order locations numerically instead of as plain strings
    #[arg(long, default_value_t = false)]
    numeric_sort: bool,
    /// Do not NFKC-normalize page text
    #[arg(long, default_value_t = false)]
    no_normalize: bool,
    /// Skip documents that cannot be opened or read instead of stopping
    #[arg(long, default_value_t = false)]
    skip_unreadable: bool,
}

impl BuildArgs {
    fn is_runnable(&self) -> bool {
        !self.input.is_empty() && self.input.len() == self.book.len() && (self.output.is_some() || self.exportfreq)
    }

    fn index_options(&self) -> IndexOptions {
        IndexOptions {
            page_offset: self.page_offset,
            max_ngram: self.max_ngram,
            normalize_unicode: !self.no_normalize,
        }
    }

    fn render_options(&self) -> RenderOptions {
        let location_order = if self.numeric_sort { LocationOrder::Numeric } else { LocationOrder::Lexical };
        RenderOptions { freq_limit: self.freqlimit, location_order }
    }
}

#[derive(Debug, Default)]
struct BuildReport {
    documents: usize,
    skipped: Vec<PathBuf>,
    listed_terms: usize,
    index_written: bool,
}

fn main() -> Result<ExitCode> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build(args) => {
            if !args.is_runnable() {
                eprintln!("{USAGE_HINT}");
                return Ok(ExitCode::from(2));
            }
            let report = build_index(&args)?;
            tracing::info!(
                documents = report.documents,
                skipped = report.skipped.len(),
                listed = report.listed_terms,
                written = report.index_written,
                "run complete"
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_index(args: &BuildArgs) -> Result<BuildReport> {
    let mut stopwords = StopwordSet::from_source(&args.stopwords).context("loading stopwords")?;
    stopwords.extend(StopwordSet::from_source(&args.commonwords).context("loading common words")?);
    tracing::info!(stopwords = stopwords.len(), "stopwords ready");

    let options = args.index_options();
    let indexer = DocumentIndexer::new(&stopwords, &options);
    let mut aggregator = Aggregator::new();
    let mut report = BuildReport::default();

    for (input, book) in args.input.iter().zip(&args.book) {
        let indexed = open_document(input).and_then(|mut source| {
            let pages = source.page_count();
            indexer.index_document(book, source.as_mut()).map(|index| (pages, index))
        });
        let (pages, index) = match indexed {
            Ok(indexed) => indexed,
            Err(e) if args.skip_unreadable => {
                tracing::warn!(path = %input.display(), error = %e, "skipping unreadable document");
                report.skipped.push(input.clone());
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("indexing {}", input.display())),
        };
        let frequencies = aggregator.add_document(book, pages, index);
        report.documents += 1;
        if args.exportfreq {
            let path = per_book_path(&args.freqfile, book);
            if let Err(e) = write_frequency_csv(&path, &frequencies) {
                tracing::error!(path = %path.display(), error = %e, "failed to write frequencies");
            }
        }
    }

    for doc in aggregator.documents() {
        tracing::debug!(doc_id = %doc.doc_id, pages = doc.pages, terms = doc.terms, occurrences = doc.occurrences, "document merged");
    }

    let render = args.render_options();
    report.listed_terms = included_terms(aggregator.index(), &render).len();
    let markdown = render_markdown(aggregator.index(), &render);
    tracing::info!(documents = report.documents, terms = aggregator.index().len(), listed = report.listed_terms, "index built");

    if args.exportfreq {
        if let Err(e) = write_frequency_csv(&args.freqfile, &aggregator.frequencies()) {
            tracing::error!(path = %args.freqfile.display(), error = %e, "failed to write frequencies");
        }
    }

    if let Some(output) = &args.output {
        tracing::info!(path = %absolute(output).display(), "writing index");
        match fs::write(output, &markdown) {
            Ok(()) => {
                report.index_written = true;
                tracing::info!(path = %output.display(), "index written");
            }
            Err(e) => tracing::error!(path = %output.display(), error = %e, "failed to write index"),
        }
    }
    Ok(report)
}

/// `<freqfile>_<book>`, the per-book frequency file name.
fn per_book_path(freqfile: &Path, book: &str) -> PathBuf {
    let mut name = OsString::from(freqfile.as_os_str());
    name.push("_");
    name.push(book);
    PathBuf::from(name)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() { return path.to_path_buf(); }
    std::env::current_dir().map(|cwd| cwd.join(path)).unwrap_or_else(|_| path.to_path_buf())
}
