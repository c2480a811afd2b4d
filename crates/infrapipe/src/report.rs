//! Report rows for export.
//!
//! Reports are built from whatever the render surface currently shows, so an
//! export always matches the last published filter result. Writing the actual
//! PDF or spreadsheet is left to the exporter; rows are `Serialize`.

use crate::dimensions::scalar_text;
use crate::surface::RenderSurface;
use chrono::{DateTime, Utc};
use geojson::{Feature, FeatureCollection};
use serde::Serialize;

pub const REPORT_TITLE: &str = "Capital Works Summary";

pub const REPORT_HEADERS: [&str; 8] = [
    "Project Name",
    "Status",
    "Program",
    "Type of Work",
    "Civil Operations Staff",
    "Contractor",
    "Project Cost",
    "Financial Year",
];

const STAFF_PROPERTY: &str = "name_of_civil_operations_staff_assigned_to_deliver_the_proje";
const CONTRACTOR_PROPERTY: &str = "name_of_contractor_undertaking_works";
const FINANCIAL_YEAR_PROPERTY: &str = "what_financial_year_is_this_project_allocated_to";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub project_name: String,
    pub status: String,
    pub program: String,
    pub type_of_work: String,
    pub civil_operations_staff: String,
    pub contractor: String,
    pub project_cost: String,
    pub financial_year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub created: DateTime<Utc>,
    pub total_projects: usize,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Report on the surface's current data; `None` before anything was published.
    pub fn from_surface<S: RenderSurface + ?Sized>(surface: &S) -> Option<Self> {
        surface.current_data().map(build_report)
    }
}

/// `in_progress` → `In Progress`.
pub fn format_status(status: &str) -> String {
    status
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `1234.5` → `$1,234.50`. Zero and non-numeric values format as empty.
pub fn format_currency(value: &str) -> String {
    let Ok(amount) = value.trim().parse::<f64>() else {
        return String::new();
    };
    if amount == 0.0 || !amount.is_finite() {
        return String::new();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let sign = if amount < 0.0 { "-" } else { "" };
    format!(
        "{sign}${}.{fraction:02}",
        crate::surface::group_thousands(whole as usize)
    )
}

fn text(feature: &Feature, name: &str) -> Option<String> {
    scalar_text(feature.property(name))
}

fn row(feature: &Feature) -> ReportRow {
    let name = text(feature, "project_name");
    let program = match &name {
        Some(n) if n.to_uppercase().contains("MCW") => "MCW".to_string(),
        _ => text(feature, "program").unwrap_or_default(),
    };
    let cost = text(feature, "total_cost").or_else(|| text(feature, "project_cost"));

    ReportRow {
        project_name: name.unwrap_or_else(|| "Unnamed Project".to_string()),
        status: text(feature, "status")
            .map(|s| format_status(&s))
            .unwrap_or_default(),
        program,
        type_of_work: text(feature, "type_of_work").unwrap_or_default(),
        civil_operations_staff: text(feature, STAFF_PROPERTY)
            .unwrap_or_else(|| "Unassigned".to_string()),
        contractor: text(feature, CONTRACTOR_PROPERTY).unwrap_or_default(),
        project_cost: cost.map(|c| format_currency(&c)).unwrap_or_default(),
        financial_year: text(feature, FINANCIAL_YEAR_PROPERTY).unwrap_or_default(),
    }
}

/// Rows for every feature that has a geometry.
pub fn build_report(collection: &FeatureCollection) -> Report {
    let rows: Vec<ReportRow> = collection
        .features
        .iter()
        .filter(|f| f.geometry.is_some())
        .map(row)
        .collect();

    Report {
        title: REPORT_TITLE.to_string(),
        created: Utc::now(),
        total_projects: collection.features.len(),
        rows,
    }
}
