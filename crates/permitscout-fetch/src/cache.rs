use std::collections::HashMap;
use std::collections::hash_map::Entry;

use permitscout_core::SourceDescriptor;
use tracing::debug;

use crate::{FetchError, PermitFetcher};

/// Session-lifetime memo of fetched documents keyed by source descriptor.
///
/// Only successful fetches are stored; a failed source is fetched again on
/// its next request. Entries are never invalidated, so a long-running
/// session keeps serving the first document it saw for each source.
pub struct FetchCache<F> {
    fetcher: F,
    documents: HashMap<SourceDescriptor, String>,
    fetches: usize,
}

impl<F: PermitFetcher> FetchCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            documents: HashMap::new(),
            fetches: 0,
        }
    }

    /// Return the cached document for `source`, fetching it on first use.
    pub async fn fetch(&mut self, source: &SourceDescriptor) -> Result<&str, FetchError> {
        match self.documents.entry(source.clone()) {
            Entry::Occupied(entry) => {
                debug!(source = %source, "fetch cache hit");
                Ok(entry.into_mut().as_str())
            }
            Entry::Vacant(entry) => {
                self.fetches += 1;
                let document = self.fetcher.fetch(source).await?;
                Ok(entry.insert(document).as_str())
            }
        }
    }

    /// Number of calls made to the underlying fetcher.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, source: &SourceDescriptor) -> bool {
        self.documents.contains_key(source)
    }
}
