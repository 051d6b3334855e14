//! Per-period approval figures and their totals.

use crate::models::Period;

/// Required and approved time for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimesheetApproval {
    pub period: Period,
    pub required_seconds: u64,
    pub time_spent_seconds: u64,
}

impl TimesheetApproval {
    /// Placeholder for a period whose approval could not be fetched.
    pub fn zeroed(period: Period) -> Self {
        Self {
            period,
            required_seconds: 0,
            time_spent_seconds: 0,
        }
    }

    /// Time spent minus time required; negative means undertime.
    pub fn overtime_seconds(&self) -> i64 {
        signed_difference(self.time_spent_seconds, self.required_seconds)
    }
}

/// Whether a row carries fetched figures or a zeroed placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Complete,
    Degraded,
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRow {
    pub approval: TimesheetApproval,
    pub status: RowStatus,
}

impl ApprovalRow {
    pub fn complete(approval: TimesheetApproval) -> Self {
        Self {
            approval,
            status: RowStatus::Complete,
        }
    }

    pub fn degraded(period: Period) -> Self {
        Self {
            approval: TimesheetApproval::zeroed(period),
            status: RowStatus::Degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == RowStatus::Degraded
    }
}

/// Grand totals over every row, degraded rows included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total_required_seconds: u64,
    pub total_time_spent_seconds: u64,
}

impl Totals {
    pub fn overtime_seconds(&self) -> i64 {
        signed_difference(self.total_time_spent_seconds, self.total_required_seconds)
    }
}

fn signed_difference(a: u64, b: u64) -> i64 {
    (a as i128 - b as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overtime_sign() {
        let mut approval = TimesheetApproval::zeroed(Period::new("2024-01-01", "2024-01-15"));
        approval.required_seconds = 57600;
        approval.time_spent_seconds = 50400;
        assert_eq!(approval.overtime_seconds(), -7200);

        approval.time_spent_seconds = 61200;
        assert_eq!(approval.overtime_seconds(), 3600);
    }

    #[test]
    fn test_degraded_row_keeps_its_period() {
        let period = Period::new("2024-01-16", "2024-01-31");
        let row = ApprovalRow::degraded(period.clone());
        assert!(row.is_degraded());
        assert_eq!(row.approval.period, period);
        assert_eq!(row.approval.required_seconds, 0);
        assert_eq!(row.approval.time_spent_seconds, 0);
    }
}
