//! Attendance row DTOs and the canonical status vocabulary.

use serde::{Deserialize, Serialize};

/// One employee's attendance data for one calendar day, as delivered by the
/// backend. Fields arrive as loosely formatted text and are normalized during
/// grid building, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub employee_code: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    /// Raw date text, e.g. "2025-08-14". Unparseable dates drop the record.
    #[serde(default)]
    pub date: String,
    /// Clock-in time of day; "--" is the absent sentinel.
    #[serde(default)]
    pub clock_in: Option<String>,
    /// Clock-out time of day; "--" is the absent sentinel.
    #[serde(default)]
    pub clock_out: Option<String>,
    /// Free-form duration text, e.g. "8h 30m". Either token may be missing.
    #[serde(default)]
    pub worked_hours: Option<String>,
    /// Raw status text in any of the known source spellings.
    #[serde(default)]
    pub status: Option<String>,
}

/// Canonical day status. The backend uses several spellings per status;
/// [`Status::parse`] is the single place they are folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Present,
    Absent,
    Leave,
    WeekOff,
    HalfDay,
    Holiday,
}

impl Status {
    /// Translate a raw status string into the canonical vocabulary.
    /// Unknown spellings return `None` and count toward no bucket.
    pub fn parse(raw: &str) -> Option<Status> {
        let trimmed = raw.trim();
        // Half-day spellings vary the most across backend call sites.
        match trimmed {
            "½P" | "1/2P" | "HalfP" | "HD" => return Some(Status::HalfDay),
            _ => {}
        }
        let folded = trimmed.to_ascii_uppercase().replace([' ', '-', '_'], "");
        match folded.as_str() {
            "P" | "PRESENT" => Some(Status::Present),
            "A" | "ABSENT" => Some(Status::Absent),
            "L" | "LEAVE" | "ONLEAVE" => Some(Status::Leave),
            "WO" | "WEEKOFF" | "WEEKLYOFF" => Some(Status::WeekOff),
            "HALFDAY" | "HALFP" | "HD" => Some(Status::HalfDay),
            "H" | "HOLIDAY" => Some(Status::Holiday),
            _ => None,
        }
    }

    /// Short code used in report cells.
    pub fn code(&self) -> &'static str {
        match self {
            Status::Present => "P",
            Status::Absent => "A",
            Status::Leave => "L",
            Status::WeekOff => "WO",
            Status::HalfDay => "½P",
            Status::Holiday => "H",
        }
    }

    /// Full label used in report legends and summary blocks.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
            Status::Leave => "Leave",
            Status::WeekOff => "Week Off",
            Status::HalfDay => "Half Day",
            Status::Holiday => "Holiday",
        }
    }

    /// All statuses in report display order.
    pub const ALL: [Status; 6] = [
        Status::Present,
        Status::Absent,
        Status::Leave,
        Status::WeekOff,
        Status::HalfDay,
        Status::Holiday,
    ];
}

/// Grouping identity for one employee. The employee code is authoritative;
/// the name is a degraded fallback for rows where the backend omitted the
/// code, and name collisions on that path can merge distinct employees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmployeeKey {
    Code(String),
    Name(String),
}

impl EmployeeKey {
    /// Resolve the grouping key for a record. `None` when the record carries
    /// neither a code nor a name (such records are dropped by the builder).
    pub fn resolve(record: &AttendanceRecord) -> Option<EmployeeKey> {
        if let Some(code) = non_blank(record.employee_code.as_deref()) {
            return Some(EmployeeKey::Code(code.to_string()));
        }
        non_blank(record.employee_name.as_deref()).map(|name| EmployeeKey::Name(name.to_string()))
    }

    /// True when this key fell back to the employee name.
    pub fn is_name_fallback(&self) -> bool {
        matches!(self, EmployeeKey::Name(_))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Normalize a clock time field: trims, and maps the "--" absent sentinel
/// and empty text to `None`.
pub fn clean_time(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed == "--" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_short_codes() {
        assert_eq!(Status::parse("P"), Some(Status::Present));
        assert_eq!(Status::parse("A"), Some(Status::Absent));
        assert_eq!(Status::parse("L"), Some(Status::Leave));
        assert_eq!(Status::parse("WO"), Some(Status::WeekOff));
        assert_eq!(Status::parse("½P"), Some(Status::HalfDay));
        assert_eq!(Status::parse("H"), Some(Status::Holiday));
    }

    #[test]
    fn test_status_parse_full_words() {
        assert_eq!(Status::parse("Present"), Some(Status::Present));
        assert_eq!(Status::parse("week off"), Some(Status::WeekOff));
        assert_eq!(Status::parse("HOLIDAY"), Some(Status::Holiday));
    }

    #[test]
    fn test_half_day_spellings_fold_together() {
        for raw in ["1/2P", "HalfP", "Half Day", "½P", "HD", "half day"] {
            assert_eq!(Status::parse(raw), Some(Status::HalfDay), "spelling: {raw}");
        }
    }

    #[test]
    fn test_status_parse_unknown() {
        assert_eq!(Status::parse("??"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_employee_key_prefers_code() {
        let record = AttendanceRecord {
            employee_code: Some("E042".to_string()),
            employee_name: Some("Jordan Lee".to_string()),
            date: "2025-08-01".to_string(),
            clock_in: None,
            clock_out: None,
            worked_hours: None,
            status: None,
        };
        assert_eq!(EmployeeKey::resolve(&record), Some(EmployeeKey::Code("E042".to_string())));
    }

    #[test]
    fn test_employee_key_name_fallback() {
        let record = AttendanceRecord {
            employee_code: Some("  ".to_string()),
            employee_name: Some("Jordan Lee".to_string()),
            date: "2025-08-01".to_string(),
            clock_in: None,
            clock_out: None,
            worked_hours: None,
            status: None,
        };
        let key = EmployeeKey::resolve(&record).unwrap();
        assert!(key.is_name_fallback());
    }

    #[test]
    fn test_employee_key_missing_identity() {
        let record = AttendanceRecord {
            employee_code: None,
            employee_name: None,
            date: "2025-08-01".to_string(),
            clock_in: None,
            clock_out: None,
            worked_hours: None,
            status: None,
        };
        assert_eq!(EmployeeKey::resolve(&record), None);
    }

    #[test]
    fn test_clean_time_sentinel() {
        assert_eq!(clean_time(Some("--")), None);
        assert_eq!(clean_time(Some("  ")), None);
        assert_eq!(clean_time(None), None);
        assert_eq!(clean_time(Some(" 09:15 ")), Some("09:15".to_string()));
    }
}
