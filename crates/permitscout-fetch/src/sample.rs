//! Built-in sample permit source, served for `mock:` descriptors.

use async_trait::async_trait;
use permitscout_core::SourceDescriptor;
use tracing::debug;

use crate::{FetchError, PermitFetcher};

/// Descriptor of the bundled two-lead sample page.
pub const SAMPLE_SOURCE: &str = "mock:sample";

/// A permit search results page in the layout the extractor expects.
pub const SAMPLE_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Building Permits - Search Results</title></head>
<body>
<table class="permit-table">
  <thead>
    <tr>
      <th>Property Address</th><th>Owner Contact</th><th>Project Type</th>
      <th>Square Footage</th><th>Permit Issue Date</th><th>Contractor Name</th>
    </tr>
  </thead>
  <tbody>
    <tr>
      <td>123 Main St</td><td>John Doe</td><td>Remodel</td>
      <td>1500</td><td>2024-01-15</td><td>ABC Floors</td>
    </tr>
    <tr>
      <td>456 Ocean Dr</td><td>Jane Smith</td><td>New Construction</td>
      <td>2400</td><td>2024-02-20</td><td>XYZ Contractors</td>
    </tr>
  </tbody>
</table>
</body>
</html>
"#;

fn sample_document(source: &SourceDescriptor) -> Option<&'static str> {
    (source.as_str() == SAMPLE_SOURCE).then_some(SAMPLE_DOCUMENT)
}

/// Serves sample descriptors locally and hands everything else to `live`.
pub struct SampleRouter<F> {
    live: F,
}

impl<F> SampleRouter<F> {
    pub fn new(live: F) -> Self {
        Self { live }
    }
}

#[async_trait]
impl<F: PermitFetcher> PermitFetcher for SampleRouter<F> {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        if source.is_sample() {
            debug!(source = %source, "serving built-in sample");
            return sample_document(source)
                .map(str::to_string)
                .ok_or_else(|| FetchError::Unsupported(source.to_string()));
        }
        self.live.fetch(source).await
    }
}

/// Offline fetcher: sample descriptors only.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleOnly;

#[async_trait]
impl PermitFetcher for SampleOnly {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        sample_document(source)
            .map(str::to_string)
            .ok_or_else(|| FetchError::Unsupported(source.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permitscout_core::{ExtractionConfig, extract_records};

    struct Live;

    #[async_trait]
    impl PermitFetcher for Live {
        async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
            Ok(format!("live:{source}"))
        }
    }

    #[tokio::test]
    async fn sample_document_extracts_two_leads() {
        let doc = SampleOnly.fetch(&SAMPLE_SOURCE.into()).await.unwrap();
        let records = extract_records(&doc, &ExtractionConfig::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].project_type(), "New Construction");
    }

    #[tokio::test]
    async fn unknown_sample_is_unsupported() {
        let err = SampleOnly.fetch(&"mock:other".into()).await.unwrap_err();
        assert!(matches!(err, FetchError::Unsupported(s) if s == "mock:other"));
        let err = SampleRouter::new(Live)
            .fetch(&"mock:other".into())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Unsupported(_)));
    }

    #[tokio::test]
    async fn router_delegates_live_sources() {
        let router = SampleRouter::new(Live);
        let doc = router.fetch(&"https://example.gov".into()).await.unwrap();
        assert_eq!(doc, "live:https://example.gov");
        let doc = router.fetch(&SAMPLE_SOURCE.into()).await.unwrap();
        assert_eq!(doc, SAMPLE_DOCUMENT);
    }
}
