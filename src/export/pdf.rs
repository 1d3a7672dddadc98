//! Paginated document renderer: landscape A4 PDF, one atomic block per
//! employee, packed whole onto pages by a fixed row budget.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::config::PdfConfig;
use crate::error::{AppError, Result};
use crate::grid::{EmployeeDayGrid, EmployeeGrid};
use crate::models::report::ReportMeta;
use crate::summary::{summarize, EmployeeSummary};

// Landscape A4, millimetres.
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;

// Widths of the fixed columns flanking the day grid.
const LABEL_WIDTH: f32 = 36.0;
const SUMMARY_WIDTH: f32 = 42.0;

// Vertical space reserved above and below the employee blocks.
const HEADER_HEIGHT: f32 = 26.0;
const FOOTER_HEIGHT: f32 = 8.0;

/// Text rows one employee block occupies: name + in/out/total/status.
pub const BLOCK_ROWS: u32 = 5;

/// Assign employee block indices to pages. Blocks are atomic: a block that
/// does not fit the remaining budget starts the next page.
pub fn paginate(block_count: usize, rows_per_page: u32) -> Vec<Vec<usize>> {
    let per_page = (rows_per_page / BLOCK_ROWS).max(1) as usize;
    let mut pages = Vec::new();
    let mut current = Vec::new();
    for index in 0..block_count {
        if current.len() == per_page {
            pages.push(std::mem::take(&mut current));
        }
        current.push(index);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Render the grid to PDF bytes. Employees are ordered by name then code.
pub fn render_attendance_pdf(grid: &EmployeeDayGrid, meta: &ReportMeta, config: &PdfConfig) -> Result<Vec<u8>> {
    let employees = grid.employees_sorted();
    let summaries: Vec<EmployeeSummary> = employees.iter().map(|e| summarize(e)).collect();
    let pages = paginate(employees.len(), config.rows_per_page);
    let page_total = pages.len().max(1);

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("{} - {}", meta.title, meta.period.label()),
        Mm(PAGE_WIDTH.into()),
        Mm(PAGE_HEIGHT.into()),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    let geometry = PageGeometry::new(meta.period.days_in_month(), config);

    if pages.is_empty() {
        // Degenerate but legal: header and footer only.
        let layer = doc.get_page(first_page).get_layer(first_layer);
        draw_header(&layer, meta, &geometry, &font, &bold);
        draw_footer(&layer, 1, 1, &geometry, &font);
    }

    for (page_index, block_indices) in pages.iter().enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH.into()), Mm(PAGE_HEIGHT.into()), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        draw_header(&layer, meta, &geometry, &font, &bold);

        let mut row_cursor = 0u32;
        for &index in block_indices {
            draw_employee_block(
                &layer,
                employees[index],
                &summaries[index],
                &geometry,
                row_cursor,
                &font,
                &bold,
            );
            row_cursor += BLOCK_ROWS;
        }

        draw_footer(&layer, page_index + 1, page_total, &geometry, &font);
    }

    doc.save_to_bytes().map_err(|e| AppError::Pdf(e.to_string()))
}

/// Derived page measurements shared by every drawing routine.
struct PageGeometry {
    days: u32,
    day_width: f32,
    row_height: f32,
    font_size: f32,
}

impl PageGeometry {
    fn new(days: u32, config: &PdfConfig) -> PageGeometry {
        let day_area = PAGE_WIDTH - 2.0 * MARGIN - LABEL_WIDTH - SUMMARY_WIDTH;
        let body = PAGE_HEIGHT - 2.0 * MARGIN - HEADER_HEIGHT - FOOTER_HEIGHT;
        PageGeometry {
            days,
            day_width: day_area / days.max(1) as f32,
            row_height: body / config.rows_per_page.max(1) as f32,
            font_size: config.font_size,
        }
    }

    /// Left edge of a day column (1-based day).
    fn day_x(&self, day: u32) -> f32 {
        MARGIN + LABEL_WIDTH + (day - 1) as f32 * self.day_width
    }

    fn summary_x(&self) -> f32 {
        PAGE_WIDTH - MARGIN - SUMMARY_WIDTH
    }

    /// Baseline y for a body row, measured from the top of the block area.
    fn row_y(&self, row: u32) -> f32 {
        PAGE_HEIGHT - MARGIN - HEADER_HEIGHT - (row + 1) as f32 * self.row_height
    }
}

fn draw_header(
    layer: &PdfLayerReference,
    meta: &ReportMeta,
    geometry: &PageGeometry,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let top = PAGE_HEIGHT - MARGIN;
    layer.use_text(meta.company_name.clone(), 11.0, Mm(MARGIN.into()), Mm((top - 4.0).into()), bold);
    layer.use_text(
        format!("{} - {}", meta.title, meta.period.label()),
        9.0,
        Mm(MARGIN.into()),
        Mm((top - 9.0).into()),
        font,
    );
    let mut line_y = top - 13.0;
    for filter in &meta.filters {
        layer.use_text(filter.clone(), 7.0, Mm(MARGIN.into()), Mm(line_y.into()), font);
        line_y -= 3.5;
    }
    layer.use_text(
        format!("Generated: {}", meta.generated_at.format("%Y-%m-%d %H:%M")),
        7.0,
        Mm((geometry.summary_x()).into()),
        Mm((top - 4.0).into()),
        font,
    );

    // Fixed day-column header: day number and weekday token.
    let numbers_y = top - HEADER_HEIGHT + 6.0;
    let weekday_y = numbers_y - 3.0;
    layer.use_text("Employee", geometry.font_size.into(), Mm(MARGIN.into()), Mm(weekday_y.into()), bold);
    for day in 1..=geometry.days {
        let x = geometry.day_x(day);
        layer.use_text(day.to_string(), geometry.font_size.into(), Mm(x.into()), Mm(numbers_y.into()), bold);
        layer.use_text(
            meta.period.weekday_token(day),
            geometry.font_size.into(),
            Mm(x.into()),
            Mm(weekday_y.into()),
            font,
        );
    }
    layer.use_text(
        "Summary",
        geometry.font_size.into(),
        Mm(geometry.summary_x().into()),
        Mm(weekday_y.into()),
        bold,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_employee_block(
    layer: &PdfLayerReference,
    employee: &EmployeeGrid,
    summary: &EmployeeSummary,
    geometry: &PageGeometry,
    row_cursor: u32,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    let size = geometry.font_size;
    layer.use_text(
        employee.display_name(),
        size.into(),
        Mm(MARGIN.into()),
        Mm(geometry.row_y(row_cursor).into()),
        bold,
    );

    let rows: [(&str, fn(&crate::grid::DayCell) -> String); 4] = [
        ("In", |cell| cell.clock_in.clone().unwrap_or_default()),
        ("Out", |cell| cell.clock_out.clone().unwrap_or_default()),
        ("Total", |cell| {
            cell.worked_hours.clone().unwrap_or_default().replace(' ', "")
        }),
        ("Status", |cell| cell.status.map(|s| s.code().to_string()).unwrap_or_default()),
    ];

    for (offset, (label, value_of)) in rows.iter().enumerate() {
        let row = row_cursor + 1 + offset as u32;
        let y = geometry.row_y(row);
        layer.use_text(*label, size.into(), Mm((MARGIN + 2.0).into()), Mm(y.into()), font);

        for day in 1..=geometry.days {
            if let Some(cell) = employee.days.get(&day) {
                let text = value_of(cell);
                if !text.is_empty() {
                    layer.use_text(text, size.into(), Mm(geometry.day_x(day).into()), Mm(y.into()), font);
                }
            }
        }
    }

    // Per-employee summary sits inline with the block's "Out" row, the
    // layout the original reports used.
    let out_row_y = geometry.row_y(row_cursor + 2);
    layer.use_text(
        summary.inline_label(),
        size.into(),
        Mm(geometry.summary_x().into()),
        Mm(out_row_y.into()),
        font,
    );
}

fn draw_footer(layer: &PdfLayerReference, page: usize, total: usize, geometry: &PageGeometry, font: &IndirectFontRef) {
    layer.use_text(
        format!("Page {page} of {total}"),
        geometry.font_size.into(),
        Mm((PAGE_WIDTH / 2.0 - 8.0).into()),
        Mm((MARGIN / 2.0).into()),
        font,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use crate::models::attendance::AttendanceRecord;
    use crate::models::report::ReportPeriod;

    #[test]
    fn test_paginate_packs_whole_blocks() {
        // 30 rows / 5 rows per block = 6 blocks per page.
        let pages = paginate(7, 30);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(pages[1], vec![6]);
    }

    #[test]
    fn test_paginate_exact_fit() {
        let pages = paginate(6, 30);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_paginate_tiny_budget_still_places_blocks() {
        // Budget below one block still yields one block per page.
        let pages = paginate(3, 4);
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_paginate_empty() {
        assert!(paginate(0, 30).is_empty());
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let records = vec![
            AttendanceRecord {
                employee_code: Some("E1".to_string()),
                employee_name: Some("Alice".to_string()),
                date: "2025-08-01".to_string(),
                clock_in: Some("09:00".to_string()),
                clock_out: Some("18:00".to_string()),
                worked_hours: Some("8h 30m".to_string()),
                status: Some("P".to_string()),
            },
            AttendanceRecord {
                employee_code: Some("E2".to_string()),
                employee_name: Some("Bob".to_string()),
                date: "2025-08-02".to_string(),
                clock_in: None,
                clock_out: None,
                worked_hours: None,
                status: Some("A".to_string()),
            },
        ];
        let grid = build_grid(&records);
        let meta = ReportMeta::new("Monthly Attendance Report", "Acme", ReportPeriod::new(2025, 8).unwrap())
            .with_filters(vec!["Branch: Main".to_string()]);
        let bytes = render_attendance_pdf(&grid, &meta, &PdfConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_many_employees_span_multiple_pages() {
        let records: Vec<AttendanceRecord> = (0..15)
            .map(|i| AttendanceRecord {
                employee_code: Some(format!("E{i:02}")),
                employee_name: Some(format!("Employee {i:02}")),
                date: "2025-08-01".to_string(),
                clock_in: Some("09:00".to_string()),
                clock_out: Some("17:00".to_string()),
                worked_hours: Some("8h".to_string()),
                status: Some("P".to_string()),
            })
            .collect();
        let grid = build_grid(&records);
        let meta = ReportMeta::new("Monthly Attendance Report", "Acme", ReportPeriod::new(2025, 8).unwrap());
        let config = PdfConfig::default();
        // 6 blocks per page at the default budget: 15 employees need 3 pages.
        assert_eq!(paginate(grid.len(), config.rows_per_page).len(), 3);
        let bytes = render_attendance_pdf(&grid, &meta, &config).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
