//! Data models for the report pipeline.
//!
//! These models are created once per run from the Jira and Tempo responses
//! and are read-only afterwards. Nothing is persisted.

pub mod identity;
pub mod period;
pub mod timesheet_approval;

// Re-exports for convenient access
pub use identity::Identity;
pub use period::{parse_date, DateRange, Period, DATE_FORMAT};
pub use timesheet_approval::{ApprovalRow, RowStatus, TimesheetApproval, Totals};
