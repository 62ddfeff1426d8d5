//! Plain-text rendering of the patient table.

use chrono::{Datelike, NaiveDate};
use inpatient_core::models::{parse_admission_date, Patient, SortDirection, SortDirective, SortKey};
use inpatient_core::pagination::page_window;
use inpatient_core::QueryEngine;

/// Short month names for the `id-ID` locale.
const ID_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format a date as `id-ID` does with 2-digit day, short month, numeric year.
pub fn format_date_id(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        ID_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Display form of a stored admission date; unparseable text is shown as-is.
pub fn format_admission_date(text: &str) -> String {
    parse_admission_date(text)
        .map(format_date_id)
        .unwrap_or_else(|| text.to_string())
}

fn column_title(key: SortKey) -> &'static str {
    match key {
        SortKey::Name => "Name",
        SortKey::NationalId => "National ID",
        SortKey::Diagnosis => "Diagnosis",
        SortKey::AdmissionDate => "Admitted",
        SortKey::Doctor => "Doctor",
        SortKey::Room => "Room",
    }
}

fn header(key: SortKey, sort: Option<SortDirective>) -> String {
    let title = column_title(key);
    match sort {
        Some(directive) if directive.key == key => match directive.direction {
            SortDirection::Ascending => format!("{title} ^"),
            SortDirection::Descending => format!("{title} v"),
        },
        _ => title.to_string(),
    }
}

fn cells(patient: &Patient) -> [String; 6] {
    [
        patient.name.clone(),
        patient.national_id.clone(),
        patient.diagnosis.clone(),
        format_admission_date(&patient.admission_date),
        patient.doctor.clone(),
        patient.room.clone(),
    ]
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Render the current page of the engine's view.
pub fn render_table(engine: &QueryEngine, max_visible_pages: usize) -> String {
    let mut out = String::new();

    if engine.is_loading() {
        out.push_str("Loading patients...\n");
        return out;
    }

    out.push_str(&format!("Inpatients: {} active patients\n", engine.view().len()));
    if let Some(error) = engine.last_load_error() {
        out.push_str(&format!("(last load failed: {error})\n"));
    }

    if engine.view().is_empty() {
        if engine.search_term().is_empty() {
            out.push_str("No patients yet. Start by admitting a new patient.\n");
        } else {
            out.push_str(&format!("No results for \"{}\"\n", engine.search_term()));
        }
        return out;
    }

    let page = engine.page();
    let headers: Vec<String> = SortKey::ALL
        .iter()
        .map(|key| header(*key, engine.sort_directive()))
        .collect();
    let rows: Vec<[String; 6]> = page.items.iter().map(cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(value, width)| pad(value, *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    out.push_str(&line(headers.as_slice()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(row.as_slice()));
        out.push('\n');
    }

    if page.is_empty() {
        out.push_str(&format!(
            "Page {} is out of range ({} pages)\n",
            page.page, page.total_pages
        ));
    } else {
        out.push_str(&format!(
            "Showing {}-{} of {} patients\n",
            page.start, page.end, page.total_items
        ));
    }

    if page.total_pages > 1 {
        let window: Vec<String> = page_window(page.page, page.total_pages, max_visible_pages)
            .into_iter()
            .map(|n| {
                if n == page.page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        let prev = if page.has_previous() { "<" } else { " " };
        let next = if page.has_next() { ">" } else { " " };
        out.push_str(&format!("{prev} {} {next}\n", window.join(" ")));
    }

    out
}
