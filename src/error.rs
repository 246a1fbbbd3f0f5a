use thiserror::Error;

/// Failure taxonomy for the feed pipeline.
///
/// Per-row problems never appear here: malformed fields degrade to defaults
/// and invalid rows are counted as skipped by the loader. Only whole-run
/// failures are represented.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch feed source: {0}")]
    Fetch(String),

    #[error("feed source contains no rows")]
    EmptyInput,

    #[error("no valid product rows in feed source")]
    NoValidRecords,

    #[error("invalid category seed: {0}")]
    Seed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FeedResult<T> = Result<T, FeedError>;
