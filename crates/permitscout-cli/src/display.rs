//! Terminal rendering for leads, warnings, and market tables.
//!
//! Leads go through an Arrow RecordBatch so they print with Arrow's table
//! formatter; the small static tables are laid out by hand.

use arrow::util::pretty::pretty_format_batches;
use permitscout_core::market::{Competitor, Neighborhood, TargetCircle};
use permitscout_core::permits;
use permitscout_fetch::{LeadReport, SourceWarning, WarningKind};

// ── Leads ──

/// Print the filtered leads as a table, with a one-line summary.
pub fn print_leads(report: &LeadReport) -> anyhow::Result<()> {
    println!(
        "=== Permit leads ({} of {} extracted) ===",
        report.leads.len(),
        report.extracted
    );
    if report.leads.is_empty() {
        println!("No matching leads.");
        return Ok(());
    }
    let batch = permits::records_to_batch(&report.leads)?;
    println!("{}", pretty_format_batches(&[batch])?);
    Ok(())
}

/// Print per-source warnings to stderr.
pub fn print_warnings(warnings: &[SourceWarning], show_preview: bool) {
    for w in warnings {
        match &w.kind {
            WarningKind::FetchFailed { message } => {
                eprintln!("warning: could not fetch {}: {message}", w.source);
            }
            WarningKind::Extraction { message } => {
                eprintln!("warning: could not extract from {}: {message}", w.source);
            }
            WarningKind::NoRecords { preview } => {
                eprintln!(
                    "warning: no permit rows found in {} (check --table)",
                    w.source
                );
                if show_preview {
                    eprintln!("--- document preview ---");
                    eprintln!("{preview}");
                    eprintln!("------------------------");
                }
            }
        }
    }
}

// ── Market tables ──

pub fn print_competitors(rows: &[Competitor]) {
    println!("=== Competitors ===");
    println!(
        "  {:<20} {:>6} {:>6}  {}",
        "Name", "Rating", "Years", "Address"
    );
    for c in rows {
        println!(
            "  {:<20} {:>6.1} {:>6}  {}",
            c.name, c.rating, c.years_in_business, c.address
        );
    }
}

pub fn print_neighborhoods(areas: &[Neighborhood], circles: &[TargetCircle]) {
    println!("=== Target neighborhoods ===");
    println!(
        "  {:<14} {:>9} {:>7} {:>6}  {:>9} {:>10} {:>8}  {}",
        "Neighborhood", "Pre-1980", "Income", "Sales", "Lat", "Lon", "Radius", "Color"
    );
    for (area, circle) in areas.iter().zip(circles) {
        println!(
            "  {:<14} {:>9} {:>7} {:>6}  {:>9.4} {:>10.4} {:>7}m  {}",
            area.name,
            area.pre_1980_homes,
            if area.high_income { "high" } else { "-" },
            area.recent_sales,
            circle.latitude,
            circle.longitude,
            circle.radius_m,
            circle.color.as_str(),
        );
    }
}
