//! Summary aggregator: status counts and worked-hours totals per employee.

use std::collections::BTreeMap;

use crate::grid::{EmployeeDayGrid, EmployeeGrid};
use crate::models::attendance::Status;

/// Per-employee status counts plus total worked time.
///
/// Counts cover only days that have a record; a month with gaps sums to
/// fewer than its day count. Worked time accumulates as whole minutes and is
/// converted to hours/minutes exactly once at display time, so a total can
/// never show "60m".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeSummary {
    counts: BTreeMap<Status, u32>,
    pub total_minutes: u64,
}

impl EmployeeSummary {
    /// Count for one status bucket.
    pub fn count(&self, status: Status) -> u32 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// Total worked time formatted as "<h>h <m>m".
    pub fn total_hours(&self) -> String {
        format!("{}h {}m", self.total_minutes / 60, self.total_minutes % 60)
    }

    /// Compact one-line summary, e.g. "P:20 A:2 ½P:1 | 162h 30m".
    /// Zero buckets are omitted.
    pub fn inline_label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for status in Status::ALL {
            let n = self.count(status);
            if n > 0 {
                parts.push(format!("{}:{n}", status.code()));
            }
        }
        if parts.is_empty() {
            format!("- | {}", self.total_hours())
        } else {
            format!("{} | {}", parts.join(" "), self.total_hours())
        }
    }

    fn add_cell(&mut self, status: Option<Status>, worked_hours: Option<&str>) {
        if let Some(status) = status {
            *self.counts.entry(status).or_insert(0) += 1;
        }
        if let Some(text) = worked_hours {
            self.total_minutes += u64::from(parse_worked_minutes(text));
        }
    }
}

/// Totals across every employee in a report, shown in the footer blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrandTotal {
    pub employees: usize,
    pub recorded_days: usize,
    pub summary: EmployeeSummary,
}

/// Single pass over one employee's day grid.
pub fn summarize(employee: &EmployeeGrid) -> EmployeeSummary {
    let mut summary = EmployeeSummary::default();
    for cell in employee.days.values() {
        summary.add_cell(cell.status, cell.worked_hours.as_deref());
    }
    summary
}

/// Fold every employee summary into one grand total.
pub fn grand_total(grid: &EmployeeDayGrid) -> GrandTotal {
    let mut total = GrandTotal {
        employees: grid.len(),
        ..GrandTotal::default()
    };
    for employee in grid.employees() {
        total.recorded_days += employee.days.len();
        let summary = summarize(employee);
        for status in Status::ALL {
            let n = summary.count(status);
            if n > 0 {
                *total.summary.counts.entry(status).or_insert(0) += n;
            }
        }
        total.summary.total_minutes += summary.total_minutes;
    }
    total
}

/// Parse free-form worked-hours text of the approximate shape "<int>h <int>m"
/// into whole minutes. Either token may be absent; malformed input
/// contributes nothing rather than erroring.
pub fn parse_worked_minutes(text: &str) -> u32 {
    let mut minutes = 0u32;
    for token in text.split_whitespace() {
        if let Some(hours) = token.strip_suffix(['h', 'H']) {
            if let Ok(h) = hours.trim().parse::<u32>() {
                minutes = minutes.saturating_add(h.saturating_mul(60));
            }
        } else if let Some(mins) = token.strip_suffix(['m', 'M']) {
            if let Ok(m) = mins.trim().parse::<u32>() {
                minutes = minutes.saturating_add(m);
            }
        }
    }
    minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_grid;
    use crate::models::attendance::AttendanceRecord;

    fn record(date: &str, status: Option<&str>, worked: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            employee_code: Some("E1".to_string()),
            employee_name: Some("Alice".to_string()),
            date: date.to_string(),
            clock_in: None,
            clock_out: None,
            worked_hours: worked.map(String::from),
            status: status.map(String::from),
        }
    }

    fn single_employee(records: Vec<AttendanceRecord>) -> EmployeeSummary {
        let grid = build_grid(&records);
        assert_eq!(grid.len(), 1);
        summarize(&grid.employees()[0])
    }

    #[test]
    fn test_status_counts() {
        let summary = single_employee(vec![
            record("2025-08-01", Some("P"), None),
            record("2025-08-02", Some("P"), None),
            record("2025-08-03", Some("P"), None),
            record("2025-08-04", Some("A"), None),
            record("2025-08-05", Some("A"), None),
        ]);
        assert_eq!(summary.count(Status::Present), 3);
        assert_eq!(summary.count(Status::Absent), 2);
        assert_eq!(summary.count(Status::Leave), 0);
        assert_eq!(summary.count(Status::WeekOff), 0);
        assert_eq!(summary.count(Status::HalfDay), 0);
        assert_eq!(summary.count(Status::Holiday), 0);
    }

    #[test]
    fn test_hours_accumulation() {
        let summary = single_employee(vec![
            record("2025-08-01", Some("P"), Some("2h 30m")),
            record("2025-08-02", Some("P"), Some("1h")),
            record("2025-08-03", Some("½P"), Some("45m")),
        ]);
        assert_eq!(summary.total_minutes, 255);
        assert_eq!(summary.total_hours(), "4h 15m");
    }

    #[test]
    fn test_null_worked_hours_contributes_zero() {
        let summary = single_employee(vec![
            record("2025-08-01", Some("P"), None),
            record("2025-08-02", Some("P"), Some("8h")),
        ]);
        assert_eq!(summary.total_minutes, 480);
    }

    #[test]
    fn test_half_day_variants_share_one_bucket() {
        let summary = single_employee(vec![
            record("2025-08-01", Some("1/2P"), None),
            record("2025-08-02", Some("HalfP"), None),
            record("2025-08-03", Some("Half Day"), None),
        ]);
        assert_eq!(summary.count(Status::HalfDay), 3);
    }

    #[test]
    fn test_parse_worked_minutes_tolerance() {
        assert_eq!(parse_worked_minutes("8h 30m"), 510);
        assert_eq!(parse_worked_minutes("8h"), 480);
        assert_eq!(parse_worked_minutes("45m"), 45);
        assert_eq!(parse_worked_minutes(""), 0);
        assert_eq!(parse_worked_minutes("--"), 0);
        assert_eq!(parse_worked_minutes("banana"), 0);
        assert_eq!(parse_worked_minutes("xh ym"), 0);
    }

    #[test]
    fn test_no_sixty_minute_artifact() {
        // 31 days of 59 minutes each would trip independent rounding.
        let records: Vec<AttendanceRecord> = (1..=31)
            .map(|day| record(&format!("2025-08-{day:02}"), Some("½P"), Some("0h 59m")))
            .collect();
        let summary = single_employee(records);
        assert_eq!(summary.total_minutes, 31 * 59);
        // 1829 minutes = 30h 29m; minutes component stays below 60.
        assert_eq!(summary.total_hours(), "30h 29m");
    }

    #[test]
    fn test_grand_total_folds_all_employees() {
        let mut records = Vec::new();
        for day in 1..=5 {
            records.push(AttendanceRecord {
                employee_code: Some("E1".to_string()),
                employee_name: Some("Alice".to_string()),
                date: format!("2025-08-{day:02}"),
                clock_in: None,
                clock_out: None,
                worked_hours: Some("8h".to_string()),
                status: Some("P".to_string()),
            });
            records.push(AttendanceRecord {
                employee_code: Some("E2".to_string()),
                employee_name: Some("Bob".to_string()),
                date: format!("2025-08-{day:02}"),
                clock_in: None,
                clock_out: None,
                worked_hours: None,
                status: Some("A".to_string()),
            });
        }
        let grid = build_grid(&records);
        let total = grand_total(&grid);
        assert_eq!(total.employees, 2);
        assert_eq!(total.recorded_days, 10);
        assert_eq!(total.summary.count(Status::Present), 5);
        assert_eq!(total.summary.count(Status::Absent), 5);
        assert_eq!(total.summary.total_minutes, 5 * 480);
    }

    #[test]
    fn test_inline_label_skips_zero_buckets() {
        let summary = single_employee(vec![
            record("2025-08-01", Some("P"), Some("8h")),
            record("2025-08-02", Some("WO"), None),
        ]);
        assert_eq!(summary.inline_label(), "P:1 WO:1 | 8h 0m");
    }
}
