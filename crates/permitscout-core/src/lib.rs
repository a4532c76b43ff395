pub mod extract;
pub mod filter;
pub mod market;
pub mod outreach;
pub mod record;
pub mod schema;

pub use extract::{ExtractError, ExtractionConfig, document_preview, extract_records};
pub use filter::{KeywordSet, aggregate, filter_records};
pub use outreach::{OutreachError, OutreachTemplates, TemplateKey};
pub use record::{COUNTY_SOURCES, PermitRecord, SourceDescriptor};
pub use schema::permits;
