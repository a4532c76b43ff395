//! Lead pipeline: fetch each source, extract permit rows, aggregate in source
//! order, then keep the rows matching the keyword set.
//!
//! Sources are processed one at a time. Nothing a source does can fail the
//! run: fetch and extraction problems become [`SourceWarning`]s next to
//! whatever leads the other sources produced.

use chrono::{DateTime, Utc};
use permitscout_core::extract::PREVIEW_CHARS;
use permitscout_core::{
    ExtractionConfig, KeywordSet, PermitRecord, SourceDescriptor, aggregate, document_preview,
    extract_records, filter_records,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{FetchCache, PermitFetcher};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    /// The source could not be fetched.
    FetchFailed { message: String },
    /// The document was fetched but no permit rows matched the expected
    /// layout. `preview` is the start of the raw document.
    NoRecords { preview: String },
    /// The extractor could not run (bad table selector).
    Extraction { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceWarning {
    pub source: SourceDescriptor,
    #[serde(flatten)]
    pub kind: WarningKind,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    /// Filtered leads in source order, then row order.
    pub leads: Vec<PermitRecord>,
    /// Records extracted across all sources before filtering.
    pub extracted: usize,
    pub warnings: Vec<SourceWarning>,
    pub generated_at: DateTime<Utc>,
}

pub struct LeadPipeline<F> {
    cache: FetchCache<F>,
    extraction: ExtractionConfig,
    keywords: KeywordSet,
}

impl<F: PermitFetcher> LeadPipeline<F> {
    pub fn new(fetcher: F, extraction: ExtractionConfig, keywords: KeywordSet) -> Self {
        Self {
            cache: FetchCache::new(fetcher),
            extraction,
            keywords,
        }
    }

    pub fn cache(&self) -> &FetchCache<F> {
        &self.cache
    }

    /// Run every source through fetch → extract, then aggregate and filter.
    pub async fn run(&mut self, sources: &[SourceDescriptor]) -> LeadReport {
        let mut per_source = Vec::with_capacity(sources.len());
        let mut warnings = Vec::new();

        for source in sources {
            let document = match self.cache.fetch(source).await {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(source = %source, error = %e, "permit source fetch failed");
                    warnings.push(SourceWarning {
                        source: source.clone(),
                        kind: WarningKind::FetchFailed {
                            message: e.to_string(),
                        },
                    });
                    continue;
                }
            };

            match extract_records(document, &self.extraction) {
                Ok(records) if records.is_empty() => {
                    warn!(
                        source = %source,
                        selector = %self.extraction.table_selector,
                        "no permit rows found"
                    );
                    warnings.push(SourceWarning {
                        source: source.clone(),
                        kind: WarningKind::NoRecords {
                            preview: document_preview(document, PREVIEW_CHARS),
                        },
                    });
                }
                Ok(records) => {
                    info!(source = %source, count = records.len(), "extracted permit records");
                    per_source.push(records);
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "permit extraction failed");
                    warnings.push(SourceWarning {
                        source: source.clone(),
                        kind: WarningKind::Extraction {
                            message: e.to_string(),
                        },
                    });
                }
            }
        }

        let all = aggregate(per_source);
        let extracted = all.len();
        let leads = filter_records(all, &self.keywords);
        info!(
            sources = sources.len(),
            extracted,
            leads = leads.len(),
            warnings = warnings.len(),
            "lead pipeline complete"
        );

        LeadReport {
            leads,
            extracted,
            warnings,
            generated_at: Utc::now(),
        }
    }
}
