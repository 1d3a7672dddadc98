//! Native Excel workbook renderer.

use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};

use crate::grid::EmployeeDayGrid;
use crate::models::attendance::Status;
use crate::models::report::ReportMeta;
use crate::summary::{grand_total, summarize};

/// Export the attendance grid to a real .xlsx workbook: a detail sheet with
/// one row per employee per recorded day, and a summary sheet with per-status
/// counts and a grand-total row.
pub fn export_attendance_grid_to_excel(grid: &EmployeeDayGrid, meta: &ReportMeta, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);

    let title_format = Format::new().set_bold();

    write_detail_sheet(&mut workbook, grid, meta, &header_format, &title_format)?;
    write_summary_sheet(&mut workbook, grid, &header_format, &title_format)?;

    workbook.save(path)?;
    Ok(())
}

fn write_detail_sheet(
    workbook: &mut Workbook,
    grid: &EmployeeDayGrid,
    meta: &ReportMeta,
    header_format: &Format,
    title_format: &Format,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance Report")?;

    // Title block
    worksheet.write_string_with_format(0, 0, &meta.company_name, title_format)?;
    worksheet.write_string_with_format(1, 0, format!("{} - {}", meta.title, meta.period.label()), title_format)?;
    let mut row: u32 = 2;
    for filter in &meta.filters {
        worksheet.write_string(row, 0, filter)?;
        row += 1;
    }
    worksheet.write_string(row, 0, format!("Generated: {}", meta.generated_at.format("%Y-%m-%d %H:%M:%S")))?;
    row += 2;

    // Headers
    let headers = ["Employee Code", "Employee Name", "Date", "Status", "Clock In", "Clock Out", "Hours"];
    let header_row = row;
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *header, header_format)?;
    }
    row += 1;

    // Column widths
    worksheet.set_column_width(0, 15)?; // Employee Code
    worksheet.set_column_width(1, 30)?; // Employee Name
    worksheet.set_column_width(2, 12)?; // Date
    worksheet.set_column_width(3, 10)?; // Status
    worksheet.set_column_width(4, 10)?; // Clock In
    worksheet.set_column_width(5, 10)?; // Clock Out
    worksheet.set_column_width(6, 10)?; // Hours

    // Data rows: one per recorded day, employees in insertion order
    for employee in grid.employees() {
        for (day, cell) in &employee.days {
            worksheet.write_string(row, 0, employee.code.as_deref().unwrap_or(""))?;
            worksheet.write_string(row, 1, &employee.name)?;

            let date_label = NaiveDate::from_ymd_opt(meta.period.year, meta.period.month, *day)
                .map(|d| d.to_string())
                .unwrap_or_else(|| format!("Day {day}"));
            worksheet.write_string(row, 2, date_label)?;

            worksheet.write_string(row, 3, cell.status.map(|s| s.code()).unwrap_or(""))?;
            worksheet.write_string(row, 4, cell.clock_in.as_deref().unwrap_or("--"))?;
            worksheet.write_string(row, 5, cell.clock_out.as_deref().unwrap_or("--"))?;
            worksheet.write_string(row, 6, cell.worked_hours.as_deref().unwrap_or(""))?;
            row += 1;
        }
    }

    // Autofilter over the data region
    if row > header_row + 1 {
        worksheet.autofilter(header_row, 0, row - 1, 6)?;
    }

    // Freeze everything above the first data row
    worksheet.set_freeze_panes(header_row + 1, 0)?;

    Ok(())
}

fn write_summary_sheet(
    workbook: &mut Workbook,
    grid: &EmployeeDayGrid,
    header_format: &Format,
    title_format: &Format,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Summary")?;

    let headers = [
        "Employee Code",
        "Employee Name",
        "Present",
        "Absent",
        "Leave",
        "Week Off",
        "Half Day",
        "Holiday",
        "Total Hours",
    ];
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, header_format)?;
    }

    worksheet.set_column_width(0, 15)?;
    worksheet.set_column_width(1, 30)?;
    worksheet.set_column_width(8, 12)?;

    let mut row: u32 = 1;
    for employee in grid.employees() {
        let summary = summarize(employee);
        worksheet.write_string(row, 0, employee.code.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 1, &employee.name)?;
        for (offset, status) in Status::ALL.iter().enumerate() {
            worksheet.write_number(row, (2 + offset) as u16, f64::from(summary.count(*status)))?;
        }
        worksheet.write_string(row, 8, summary.total_hours())?;
        row += 1;
    }

    // Grand total row
    let total = grand_total(grid);
    worksheet.write_string_with_format(row, 0, "Total", title_format)?;
    worksheet.write_string_with_format(row, 1, format!("{} employees", total.employees), title_format)?;
    for (offset, status) in Status::ALL.iter().enumerate() {
        worksheet.write_number_with_format(row, (2 + offset) as u16, f64::from(total.summary.count(*status)), title_format)?;
    }
    worksheet.write_string_with_format(row, 8, total.summary.total_hours(), title_format)?;

    worksheet.set_freeze_panes(1, 0)?;

    Ok(())
}
