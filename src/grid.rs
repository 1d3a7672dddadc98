//! Grid builder: groups flat attendance rows into per-employee day grids.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::models::attendance::{clean_time, AttendanceRecord, EmployeeKey, Status};

/// One day's normalized cell inside an employee grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    /// Raw worked-hours text, parsed only during aggregation.
    pub worked_hours: Option<String>,
    pub status: Option<Status>,
}

/// All recorded days for one employee, keyed by day-of-month. Days without a
/// record have no entry; renderers emit empty cells for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeGrid {
    pub key: EmployeeKey,
    pub code: Option<String>,
    pub name: String,
    pub days: BTreeMap<u32, DayCell>,
}

impl EmployeeGrid {
    /// Display name for report headers: "name (code)" when both are known.
    pub fn display_name(&self) -> String {
        match &self.code {
            Some(code) if !code.is_empty() => format!("{} ({code})", self.name),
            _ => self.name.clone(),
        }
    }
}

/// The derived per-employee, per-day lookup structure driving every renderer.
/// Built fresh per export and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeDayGrid {
    employees: Vec<EmployeeGrid>,
}

impl EmployeeDayGrid {
    /// Employees in insertion order (the order their first record appeared).
    /// The legacy spreadsheet layout iterates in this order.
    pub fn employees(&self) -> &[EmployeeGrid] {
        &self.employees
    }

    /// Employees sorted by name, then code. The paginated document layout
    /// iterates in this order.
    pub fn employees_sorted(&self) -> Vec<&EmployeeGrid> {
        let mut sorted: Vec<&EmployeeGrid> = self.employees.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }
}

/// Group raw rows into an [`EmployeeDayGrid`].
///
/// Rows without a resolvable identity or a parseable date are dropped, not
/// errors: the report is best-effort over whatever the backend returned.
/// Callers constrain the batch to one calendar month; only the day-of-month
/// is kept per cell.
pub fn build_grid(records: &[AttendanceRecord]) -> EmployeeDayGrid {
    let mut employees: Vec<EmployeeGrid> = Vec::new();
    let mut index: HashMap<EmployeeKey, usize> = HashMap::new();
    let mut dropped = 0usize;

    for record in records {
        let Some(key) = EmployeeKey::resolve(record) else {
            dropped += 1;
            continue;
        };
        let Some(day) = parse_day_of_month(&record.date) else {
            dropped += 1;
            continue;
        };

        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                if key.is_name_fallback() {
                    warn!("No employee code for '{}', grouping by name (collisions possible)", name_of(record));
                }
                employees.push(EmployeeGrid {
                    key: key.clone(),
                    code: record.employee_code.as_deref().map(str::trim).filter(|c| !c.is_empty()).map(String::from),
                    name: name_of(record),
                    days: BTreeMap::new(),
                });
                index.insert(key, employees.len() - 1);
                employees.len() - 1
            }
        };

        employees[slot].days.insert(
            day,
            DayCell {
                clock_in: clean_time(record.clock_in.as_deref()),
                clock_out: clean_time(record.clock_out.as_deref()),
                worked_hours: record.worked_hours.clone(),
                status: record.status.as_deref().and_then(Status::parse),
            },
        );
    }

    if dropped > 0 {
        warn!("Dropped {dropped} attendance rows with missing identity or unparseable date");
    }
    debug!("Built grid for {} employees from {} rows", employees.len(), records.len());

    EmployeeDayGrid { employees }
}

fn name_of(record: &AttendanceRecord) -> String {
    record
        .employee_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("(unnamed)")
        .to_string()
}

/// Extract the day-of-month from the raw date text. The backend is not
/// consistent about date formats, so several are tried in order.
fn parse_day_of_month(raw: &str) -> Option<u32> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.day());
        }
    }

    // Timestamps like "2025-08-14 09:00:00" carry a date prefix.
    if text.len() >= 10 {
        if let Ok(date) = NaiveDate::parse_from_str(&text[..10], "%Y-%m-%d") {
            return Some(date.day());
        }
    }

    None
}
