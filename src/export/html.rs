//! Legacy spreadsheet renderer: one HTML table string, saved as .xls.
//!
//! Excel opens styled HTML tables directly, which is how the original report
//! screens shipped their "Excel" download. Employee blocks follow insertion
//! order; only days with a record produce rows.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::grid::{EmployeeDayGrid, EmployeeGrid};
use crate::models::attendance::Status;
use crate::models::report::ReportMeta;
use crate::summary::{grand_total, summarize};

const HEADER_BG: &str = "#4472C4";

/// Render the full report as a single self-contained HTML document.
/// Never errors; the caller gates empty datasets before invoking this.
pub fn render_attendance_html(grid: &EmployeeDayGrid, meta: &ReportMeta) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<html><head><meta charset=\"utf-8\"></head><body>\n");
    out.push_str("<table border=\"1\" cellspacing=\"0\" cellpadding=\"3\" style=\"border-collapse:collapse;font-family:Arial;font-size:12px\">\n");

    write_title_block(&mut out, meta);
    write_summary_block(&mut out, grid);

    for employee in grid.employees() {
        write_employee_block(&mut out, employee, meta);
    }

    out.push_str("</table>\n</body></html>\n");
    out
}

fn write_title_block(out: &mut String, meta: &ReportMeta) {
    let span = 6;
    let _ = writeln!(
        out,
        "<tr><td colspan=\"{span}\" style=\"font-size:16px;font-weight:bold;text-align:center\">{}</td></tr>",
        escape(&meta.company_name)
    );
    let _ = writeln!(
        out,
        "<tr><td colspan=\"{span}\" style=\"font-weight:bold;text-align:center\">{} - {}</td></tr>",
        escape(&meta.title),
        escape(&meta.period.label())
    );
    for filter in &meta.filters {
        let _ = writeln!(out, "<tr><td colspan=\"{span}\">{}</td></tr>", escape(filter));
    }
    let _ = writeln!(
        out,
        "<tr><td colspan=\"{span}\">Generated: {}</td></tr>",
        meta.generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "<tr><td colspan=\"{span}\">&nbsp;</td></tr>");
}

fn write_summary_block(out: &mut String, grid: &EmployeeDayGrid) {
    let total = grand_total(grid);
    let _ = writeln!(
        out,
        "<tr><td colspan=\"6\" style=\"font-weight:bold;background:{HEADER_BG};color:white\">Summary</td></tr>"
    );
    let _ = writeln!(out, "<tr><td>Employees</td><td>{}</td><td colspan=\"4\"></td></tr>", total.employees);
    let _ = writeln!(
        out,
        "<tr><td>Days Recorded</td><td>{}</td><td colspan=\"4\"></td></tr>",
        total.recorded_days
    );
    for status in Status::ALL {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td colspan=\"4\"></td></tr>",
            status.label(),
            total.summary.count(status)
        );
    }
    let _ = writeln!(
        out,
        "<tr><td>Total Hours</td><td>{}</td><td colspan=\"4\"></td></tr>",
        total.summary.total_hours()
    );
    let _ = writeln!(out, "<tr><td colspan=\"6\">&nbsp;</td></tr>");
}

fn write_employee_block(out: &mut String, employee: &EmployeeGrid, meta: &ReportMeta) {
    let summary = summarize(employee);
    let _ = writeln!(
        out,
        "<tr><td colspan=\"6\" style=\"font-weight:bold;background:{HEADER_BG};color:white\">{} &mdash; {}</td></tr>",
        escape(&employee.display_name()),
        escape(&summary.inline_label())
    );
    out.push_str(
        "<tr style=\"font-weight:bold;background:#D9E1F2\"><td>Date</td><td>Status</td><td>Clock In</td><td>Clock Out</td><td>Hours</td><td></td></tr>\n",
    );

    for (day, cell) in &employee.days {
        let date_label = NaiveDate::from_ymd_opt(meta.period.year, meta.period.month, *day)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| format!("Day {day}"));
        let _ = writeln!(
            out,
            "<tr><td>{date_label}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td></td></tr>",
            cell.status.map(|s| s.code()).unwrap_or(""),
            escape(cell.clock_in.as_deref().unwrap_or("--")),
            escape(cell.clock_out.as_deref().unwrap_or("--")),
            escape(cell.worked_hours.as_deref().unwrap_or("")),
        );
    }

    // Blank separator between employee blocks.
    out.push_str("<tr><td colspan=\"6\">&nbsp;</td></tr>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
