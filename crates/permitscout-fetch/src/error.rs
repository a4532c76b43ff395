use thiserror::Error;

/// Failure to obtain a source document.
///
/// Recoverable: the pipeline turns it into a per-source warning and keeps going.
#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("browser session failed: {0}")]
    Browser(String),

    #[error("no fetcher handles source '{0}'")]
    Unsupported(String),
}
