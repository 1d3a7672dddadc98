//! Data models for attendance rows, statuses, and report metadata.

pub mod attendance;
pub mod report;

pub use attendance::{AttendanceRecord, EmployeeKey, Status};
pub use report::{ReportMeta, ReportPeriod};
