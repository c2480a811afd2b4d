//! # Rendering Module
//!
//! Plain-text rendering with `console` styles. Every function takes an explicit
//! `color` flag so tests can compare unstyled output while the CLI passes
//! `console::colors_enabled()`.
//!
//! Layout calculations (width, truncation, padding) use `unicode-width` since
//! project names regularly carry non-ASCII characters.

use super::styles::{paint, PALETTE};
use infrapipe::controls::{FilterControlSet, SELECT_ALL_LABEL};
use infrapipe::dimensions::{Registry, BLANK};
use infrapipe::report::{Report, REPORT_HEADERS};
use infrapipe::search::Suggestion;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a report column may get before its cells are truncated.
pub const REPORT_COLUMN_WIDTH: usize = 24;
pub const ELLIPSIS: &str = "…";

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

fn value_label(value: &str, color: bool) -> String {
    if value == BLANK {
        paint(&PALETTE.blank, value, color)
    } else {
        value.to_string()
    }
}

pub fn render_dimensions(registry: &Registry, color: bool) -> String {
    let key_width = registry.keys().map(|k| k.width()).max().unwrap_or(0);
    let label_width = registry.iter().map(|d| d.label.width()).max().unwrap_or(0);

    let mut out = format!("{}\n", paint(&PALETTE.heading, "Dimensions", color));
    for dimension in registry.iter() {
        out.push_str(&format!(
            "  {}  {}  {}\n",
            paint(&PALETTE.key, &pad(dimension.key, key_width), color),
            pad(dimension.label, label_width),
            paint(&PALETTE.muted, &dimension.properties.join(", "), color),
        ));
    }
    out
}

/// A dimension's controls as a checklist. Hidden controls are left out.
pub fn render_controls(label: &str, set: &FilterControlSet, color: bool) -> String {
    let excluded = set.active_values().len();
    let mut out = format!(
        "{} {}\n",
        paint(&PALETTE.heading, label, color),
        paint(
            &PALETTE.muted,
            &format!("({} values, {} excluded)", set.len(), excluded),
            color
        ),
    );

    if set.is_empty() {
        out.push_str("  No values.\n");
        return out;
    }

    let mark = |active: bool| {
        if active {
            paint(&PALETTE.active, "[x]", color)
        } else {
            "[ ]".to_string()
        }
    };

    if !set.select_all_hidden() {
        out.push_str(&format!(
            "  {} {}\n",
            mark(set.select_all_active()),
            SELECT_ALL_LABEL
        ));
    }
    for control in set.visible() {
        out.push_str(&format!(
            "  {} {}\n",
            mark(control.active),
            value_label(&control.value, color)
        ));
    }
    out
}

/// Count line plus the exclusions that produced it.
pub fn render_summary(count: Option<&str>, excluded: &[(&str, Vec<String>)], color: bool) -> String {
    let mut out = match count {
        Some(text) => format!("{}\n", paint(&PALETTE.count, text, color)),
        None => "Nothing published.\n".to_string(),
    };
    if excluded.is_empty() {
        return out;
    }

    out.push_str(&format!("{}\n", paint(&PALETTE.heading, "Excluding", color)));
    for (label, values) in excluded {
        let values: Vec<String> = values.iter().map(|v| value_label(v, color)).collect();
        out.push_str(&format!("  {}: {}\n", label, values.join(", ")));
    }
    out
}

pub fn render_suggestions(suggestions: &[Suggestion], color: bool) -> String {
    if suggestions.is_empty() {
        return "No matching projects.\n".to_string();
    }

    let mut out = String::new();
    for (i, suggestion) in suggestions.iter().enumerate() {
        let asset = suggestion
            .asset_id
            .as_deref()
            .map(|id| format!(" {}", paint(&PALETTE.muted, &format!("[{id}]"), color)))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>2}. {}{}\n",
            i + 1,
            paint(&PALETTE.heading, &suggestion.project_name, color),
            asset
        ));
        if !suggestion.description.is_empty() {
            out.push_str(&format!("    {}\n", suggestion.description));
        }
    }
    out
}

pub fn render_report(report: &Report, color: bool) -> String {
    let cells: Vec<[&str; 8]> = report
        .rows
        .iter()
        .map(|r| {
            [
                r.project_name.as_str(),
                r.status.as_str(),
                r.program.as_str(),
                r.type_of_work.as_str(),
                r.civil_operations_staff.as_str(),
                r.contractor.as_str(),
                r.project_cost.as_str(),
                r.financial_year.as_str(),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..REPORT_HEADERS.len())
        .map(|col| {
            cells
                .iter()
                .map(|row| row[col].width())
                .chain(std::iter::once(REPORT_HEADERS[col].width()))
                .max()
                .unwrap_or(0)
                .min(REPORT_COLUMN_WIDTH)
        })
        .collect();

    let line = |row: &[&str]| -> String {
        let cols: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(&truncate(cell, *width), *width))
            .collect();
        cols.join("  ").trim_end().to_string()
    };

    let mut out = format!(
        "{}\n{}\n\n",
        paint(&PALETTE.heading, &report.title, color),
        paint(
            &PALETTE.muted,
            &format!("Created {}", report.created.format("%d/%m/%Y")),
            color
        ),
    );
    out.push_str(&format!(
        "{}\n",
        paint(&PALETTE.heading, &line(&REPORT_HEADERS), color)
    ));
    for row in &cells {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&format!(
        "\nTotal Projects: {}\n",
        paint(&PALETTE.count, &report.total_projects.to_string(), color)
    ));
    out
}
