//! HTML permit-table extraction.
//!
//! Locates the configured permit table in a fetched document and maps each
//! data row positionally onto a [`PermitRecord`]. Layout mismatches are not
//! errors: a missing table or a page of heading rows simply yields no records.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::record::PermitRecord;

/// CSS selector for the permit table when none is configured.
pub const DEFAULT_TABLE_SELECTOR: &str = "table.permit-table";

/// Characters of raw document kept as a diagnostic preview.
pub const PREVIEW_CHARS: usize = 500;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("invalid table selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Extraction settings, built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// CSS selector naming the permit table(s) in the source document.
    pub table_selector: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
        }
    }
}

impl ExtractionConfig {
    pub fn new(table_selector: impl Into<String>) -> Self {
        Self {
            table_selector: table_selector.into(),
        }
    }
}

/// Extract permit records from a raw HTML document.
///
/// Rows are the `<tr>` elements of every table matching the configured
/// selector, in document order. A cell's text nodes are concatenated as-is,
/// so inline markup never splits a word, then whitespace runs are collapsed
/// and the ends trimmed. Rows with fewer than six `<td>` cells (headings, spacers,
/// malformed rows) are skipped.
pub fn extract_records(
    document: &str,
    config: &ExtractionConfig,
) -> Result<Vec<PermitRecord>, ExtractError> {
    let table_sel = parse_selector(&config.table_selector)?;
    let row_sel = parse_selector("tr")?;
    let cell_sel = parse_selector("td")?;

    let html = Html::parse_document(document);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for table in html.select(&table_sel) {
        for row in table.select(&row_sel) {
            let cells: Vec<String> = row
                .select(&cell_sel)
                // Nested tables would otherwise contribute their cells twice.
                .filter(|cell| belongs_to_row(cell, &row))
                .map(|cell| cell_text(&cell))
                .collect();
            match PermitRecord::from_cells(cells.as_slice()) {
                Some(rec) => records.push(rec),
                None => skipped += 1,
            }
        }
    }

    debug!(
        selector = %config.table_selector,
        records = records.len(),
        skipped,
        "extracted permit rows"
    );
    Ok(records)
}

/// Char-boundary-safe prefix of a document, for diagnosing layout mismatches.
pub fn document_preview(document: &str, max_chars: usize) -> String {
    match document.char_indices().nth(max_chars) {
        Some((idx, _)) => document[..idx].to_string(),
        None => document.to_string(),
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Whether `cell`'s nearest enclosing `<tr>` is `row`.
fn belongs_to_row(cell: &ElementRef<'_>, row: &ElementRef<'_>) -> bool {
    cell.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
        .is_some_and(|tr| tr.id() == row.id())
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
