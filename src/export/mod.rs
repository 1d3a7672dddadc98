//! Export pipeline: renders a built grid to downloadable report files.

pub mod html;
pub mod pdf;
pub mod xlsx;

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::grid::build_grid;
use crate::models::attendance::AttendanceRecord;
use crate::models::report::ReportMeta;

/// Output format for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Legacy spreadsheet path: HTML table saved with a .xls extension.
    Xls,
    /// Native Excel workbook.
    Xlsx,
    /// Paginated landscape document.
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xls => "xls",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.{extension}", ts = now.format("%Y%m%d_%H%M%S"))
}

/// Run the whole pipeline for one user-initiated export: group rows into the
/// grid, render the requested format, and write the file.
///
/// Empty datasets are rejected before any renderer runs; a dataset whose rows
/// were all dropped during grid building counts as empty too. Returns the
/// path of the written file.
pub fn export_report(
    records: &[AttendanceRecord],
    meta: &ReportMeta,
    format: ExportFormat,
    config: &AppConfig,
    output_dir: &Path,
) -> Result<PathBuf> {
    if records.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let grid = build_grid(records);
    if grid.is_empty() {
        return Err(AppError::EmptyDataset);
    }

    let filename = generate_export_filename("attendance_report", format.extension());
    let path = output_dir.join(filename);

    match format {
        ExportFormat::Xls => {
            let document = html::render_attendance_html(&grid, meta);
            std::fs::write(&path, document)?;
        }
        ExportFormat::Xlsx => {
            xlsx::export_attendance_grid_to_excel(&grid, meta, &path)?;
        }
        ExportFormat::Pdf => {
            let bytes = pdf::render_attendance_pdf(&grid, meta, &config.pdf)?;
            std::fs::write(&path, bytes)?;
        }
    }

    info!("Exported {} employees to {}", grid.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::ReportPeriod;

    #[test]
    fn test_empty_dataset_is_rejected_before_rendering() {
        let meta = ReportMeta::new("Report", "Co", ReportPeriod::new(2025, 8).unwrap());
        let config = AppConfig::default();
        let result = export_report(&[], &meta, ExportFormat::Xls, &config, Path::new("."));
        assert!(matches!(result, Err(AppError::EmptyDataset)));
    }

    #[test]
    fn test_all_rows_dropped_counts_as_empty() {
        let meta = ReportMeta::new("Report", "Co", ReportPeriod::new(2025, 8).unwrap());
        let config = AppConfig::default();
        let records = vec![AttendanceRecord {
            employee_code: None,
            employee_name: None,
            date: "2025-08-01".to_string(),
            clock_in: None,
            clock_out: None,
            worked_hours: None,
            status: Some("P".to_string()),
        }];
        let result = export_report(&records, &meta, ExportFormat::Xls, &config, Path::new("."));
        assert!(matches!(result, Err(AppError::EmptyDataset)));
    }

    #[test]
    fn test_filename_carries_extension() {
        let name = generate_export_filename("attendance_report", "pdf");
        assert!(name.starts_with("attendance_report_"));
        assert!(name.ends_with(".pdf"));
    }
}
