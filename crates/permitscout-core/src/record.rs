//! Permit record and source descriptor types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of cells a source row must yield to become a [`PermitRecord`].
pub const PERMIT_FIELD_COUNT: usize = 6;

/// Prefix marking a descriptor that names a built-in sample source.
pub const SAMPLE_PREFIX: &str = "mock:";

/// One normalized row of building-permit data.
///
/// All fields are kept as text: square footage and issue dates arrive in
/// inconsistent formats and are passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitRecord {
    property_address: String,
    owner_contact: String,
    project_type: String,
    square_footage: String,
    permit_issue_date: String,
    contractor_name: String,
}

impl PermitRecord {
    /// Build a record from positional cells.
    ///
    /// Cells map in fixed order: address, owner, project type, square footage,
    /// issue date, contractor. Returns `None` when fewer than
    /// [`PERMIT_FIELD_COUNT`] cells are supplied; extra cells are ignored.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        if cells.len() < PERMIT_FIELD_COUNT {
            return None;
        }
        let cell = |i: usize| cells[i].as_ref().to_string();
        Some(Self {
            property_address: cell(0),
            owner_contact: cell(1),
            project_type: cell(2),
            square_footage: cell(3),
            permit_issue_date: cell(4),
            contractor_name: cell(5),
        })
    }

    pub fn property_address(&self) -> &str {
        &self.property_address
    }

    pub fn owner_contact(&self) -> &str {
        &self.owner_contact
    }

    /// Free-text project description; the field keyword filtering runs over.
    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    pub fn square_footage(&self) -> &str {
        &self.square_footage
    }

    pub fn permit_issue_date(&self) -> &str {
        &self.permit_issue_date
    }

    pub fn contractor_name(&self) -> &str {
        &self.contractor_name
    }

    /// Field values in column order.
    pub fn fields(&self) -> [&str; PERMIT_FIELD_COUNT] {
        [
            self.property_address.as_str(),
            self.owner_contact.as_str(),
            self.project_type.as_str(),
            self.square_footage.as_str(),
            self.permit_issue_date.as_str(),
            self.contractor_name.as_str(),
        ]
    }
}

/// Miami-Dade County building permit search portal.
pub const MIAMI_DADE_PERMITS: &str = "https://www.miamidade.gov/permits";

/// Broward County permit portal.
pub const BROWARD_PERMITS: &str = "https://www.broward.org/Regulation/Permits";

/// Live county portals covering the service area, in scrape order.
pub const COUNTY_SOURCES: [&str; 2] = [MIAMI_DADE_PERMITS, BROWARD_PERMITS];

/// Opaque identifier naming one permit data source (a URL or a `mock:` tag).
///
/// Used as the fetch-cache key, so two descriptors are the same source only
/// when their text is identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceDescriptor(String);

impl SourceDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Descriptors for the live county portals.
    pub fn county_portals() -> Vec<Self> {
        COUNTY_SOURCES.into_iter().map(Self::from).collect()
    }

    /// Whether this descriptor names a built-in sample rather than a live site.
    pub fn is_sample(&self) -> bool {
        self.0.starts_with(SAMPLE_PREFIX)
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SourceDescriptor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

impl From<&str> for SourceDescriptor {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
