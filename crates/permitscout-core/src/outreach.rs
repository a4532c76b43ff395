//! Outreach email templates keyed by customer segment.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Literal token replaced with the recipient's name.
pub const NAME_PLACEHOLDER: &str = "[NAME]";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutreachError {
    /// The requested key is not one of the fixed template keys. Under the
    /// enumerated selector this means the key list and the templates have
    /// drifted apart.
    #[error("unknown template key '{0}' (expected one of: pre-1980, luxury, flood_zone)")]
    UnknownTemplateKey(String),
    /// A valid key with no body in this template set.
    #[error("no template body for key '{0}'")]
    MissingTemplate(TemplateKey),
}

/// Customer segment an outreach email is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemplateKey {
    /// Owners of homes built before 1980.
    #[serde(rename = "pre-1980")]
    Pre1980,
    #[serde(rename = "luxury")]
    Luxury,
    /// Properties in flood-prone areas.
    #[serde(rename = "flood_zone")]
    FloodZone,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 3] = [Self::Pre1980, Self::Luxury, Self::FloodZone];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pre1980 => "pre-1980",
            Self::Luxury => "luxury",
            Self::FloodZone => "flood_zone",
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKey {
    type Err = OutreachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| OutreachError::UnknownTemplateKey(s.to_string()))
    }
}

const PRE_1980: &str = "\
Subject: Restore the Charm of Your Classic Property

Hi [NAME],

Miami Master Flooring offers stylish vinyl and carpet tile flooring ideal for \
updating historic homes with modern, durable materials.";

const LUXURY: &str = "\
Subject: Premium Designer Flooring for Elegant Spaces

Hi [NAME],

Elevate your property with high-end luxury vinyl tile and carpet tile flooring \
from Miami Master Flooring, trusted by developers across South Florida.";

const FLOOD_ZONE: &str = "\
Subject: Flooring That Withstands Water & Time

Hi [NAME],

Our water-resistant vinyl and carpet tile solutions are perfect for flood-prone \
areas in Miami-Dade and Broward counties.";

/// Immutable set of outreach templates, built once at startup.
#[derive(Debug, Clone)]
pub struct OutreachTemplates {
    templates: BTreeMap<TemplateKey, String>,
}

impl OutreachTemplates {
    /// The standard Miami Master Flooring templates.
    pub fn standard() -> Self {
        let templates = BTreeMap::from([
            (TemplateKey::Pre1980, PRE_1980.to_string()),
            (TemplateKey::Luxury, LUXURY.to_string()),
            (TemplateKey::FloodZone, FLOOD_ZONE.to_string()),
        ]);
        Self { templates }
    }

    /// Build from custom bodies. Every key must be present.
    pub fn with_bodies(bodies: [(TemplateKey, String); 3]) -> Result<Self, OutreachError> {
        let templates: BTreeMap<TemplateKey, String> = bodies.into_iter().collect();
        if let Some(missing) = TemplateKey::ALL
            .into_iter()
            .find(|k| !templates.contains_key(k))
        {
            return Err(OutreachError::MissingTemplate(missing));
        }
        Ok(Self { templates })
    }

    pub fn keys(&self) -> impl Iterator<Item = TemplateKey> + '_ {
        self.templates.keys().copied()
    }

    /// Raw template text, placeholder intact.
    pub fn body(&self, key: TemplateKey) -> Option<&str> {
        self.templates.get(&key).map(String::as_str)
    }

    /// Render the template for `key` with every placeholder replaced by `recipient`.
    pub fn render(&self, key: TemplateKey, recipient: &str) -> Result<String, OutreachError> {
        let body = self
            .body(key)
            .ok_or(OutreachError::MissingTemplate(key))?;
        Ok(body.replace(NAME_PLACEHOLDER, recipient))
    }

    /// Render by textual key, as supplied by a selector or config.
    pub fn generate_email(&self, key: &str, recipient: &str) -> Result<String, OutreachError> {
        self.render(key.parse()?, recipient)
    }
}
