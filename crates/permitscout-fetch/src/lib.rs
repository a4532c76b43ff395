//! Fetch layer: permit source fetchers, per-session document cache, and the
//! fetch → extract → aggregate → filter lead pipeline.

use async_trait::async_trait;
use permitscout_core::SourceDescriptor;

mod cache;
mod error;
pub mod pipeline;
pub mod sample;

#[cfg(feature = "browser")]
pub mod browser;
#[cfg(feature = "http")]
pub mod http;

pub use cache::FetchCache;
pub use error::FetchError;
pub use pipeline::{LeadPipeline, LeadReport, SourceWarning, WarningKind};
pub use sample::{SampleOnly, SampleRouter};

#[cfg(feature = "browser")]
pub use browser::{BrowserFetcher, BrowserSettings};
#[cfg(feature = "http")]
pub use http::{HttpFetcher, HttpSettings};

/// Produces the raw document for a permit source.
///
/// Implementations differ only in how the document is obtained; callers
/// treat them interchangeably.
#[async_trait]
pub trait PermitFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError>;
}

#[async_trait]
impl<F: PermitFetcher + ?Sized> PermitFetcher for Box<F> {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        (**self).fetch(source).await
    }
}
