//! Plain-text tables for employees and attendance.

use chrono::{DateTime, NaiveDate};
use owo_colors::OwoColorize;

use crate::api::{AttendanceRecord, AttendanceStats, Employee};
use crate::ui::HrmsDisplay;

/// Formats a record date as e.g. "Jan 5, 2025".
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is returned
/// unchanged.
pub fn format_record_date(raw: &str) -> String {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        });
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Renders employee and attendance listings.
pub struct TableRenderer<'a> {
    display: &'a HrmsDisplay,
}

impl<'a> TableRenderer<'a> {
    pub fn new(display: &'a HrmsDisplay) -> Self {
        Self { display }
    }

    /// Renders the employee list, or an empty-state message.
    pub fn employees(&self, employees: &[Employee]) -> String {
        if employees.is_empty() {
            return "No Employees Found\nStart by adding your first employee to the system."
                .to_string();
        }

        let headers = ["Employee ID", "Full Name", "Email", "Department", "Record ID"];
        let rows: Vec<[String; 5]> = employees
            .iter()
            .map(|e| {
                [
                    e.employee_id.clone(),
                    e.full_name.clone(),
                    e.email.clone(),
                    e.department.clone(),
                    e.id.clone(),
                ]
            })
            .collect();

        self.render(&headers, &rows, |column, cell| {
            if column == 0 && self.display.colors_enabled() {
                format!("{}", cell.color(self.display.theme().employee_id))
            } else {
                cell.to_string()
            }
        })
    }

    /// Renders attendance records, or an empty-state message.
    pub fn attendance(&self, records: &[AttendanceRecord]) -> String {
        if records.is_empty() {
            return "No Attendance Records\nNo attendance has been marked for this employee yet."
                .to_string();
        }

        let headers = ["Employee ID", "Date", "Status"];
        let rows: Vec<[String; 3]> = records
            .iter()
            .map(|r| [r.employee_id.clone(), format_record_date(&r.date), r.status.clone()])
            .collect();

        let present = crate::api::AttendanceStatus::Present.as_str();
        self.render(&headers, &rows, |column, cell| {
            if column != 2 || !self.display.colors_enabled() {
                return cell.to_string();
            }
            let theme = self.display.theme();
            if cell.trim_end() == present {
                format!("{}", cell.color(theme.success))
            } else {
                format!("{}", cell.color(theme.error))
            }
        })
    }

    /// Renders the attendance totals line.
    pub fn stats(&self, stats: &AttendanceStats) -> String {
        format!(
            "Total Days: {}  Present: {}  Absent: {}",
            stats.total_days, stats.present_days, stats.absent_days
        )
    }

    /// Lays out a table with left-aligned, space-padded columns.
    ///
    /// `style` is applied to already padded cells so escape codes do not
    /// disturb alignment.
    fn render<const N: usize>(
        &self,
        headers: &[&str; N],
        rows: &[[String; N]],
        style: impl Fn(usize, &str) -> String,
    ) -> String {
        let mut widths: [usize; N] = headers.map(|h| h.chars().count());
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(join_padded(headers.iter().copied(), &widths, |_, cell| {
            cell.to_string()
        }));
        lines.push(
            widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in rows {
            lines.push(join_padded(row.iter().map(String::as_str), &widths, &style));
        }
        lines.join("\n")
    }
}

fn join_padded<'c>(
    cells: impl Iterator<Item = &'c str>,
    widths: &[usize],
    style: impl Fn(usize, &str) -> String,
) -> String {
    cells
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, width))| {
            let padding = width.saturating_sub(cell.chars().count());
            style(column, &format!("{}{}", cell, " ".repeat(padding)))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
