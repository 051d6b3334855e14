//! Aggregation and text rendering of the approval report.

use crate::models::{ApprovalRow, Totals};
use std::fmt::Write;

/// Sum required and spent time over every row, degraded rows included.
///
/// A degraded row contributes zero to both sums, so totals understate the
/// real figures for that period.
pub fn aggregate(rows: &[ApprovalRow]) -> Totals {
    rows.iter().fold(Totals::default(), |mut totals, row| {
        totals.total_required_seconds = totals
            .total_required_seconds
            .saturating_add(row.approval.required_seconds);
        totals.total_time_spent_seconds = totals
            .total_time_spent_seconds
            .saturating_add(row.approval.time_spent_seconds);
        totals
    })
}

/// Unsigned seconds as a duration input, capped at `i64::MAX`.
fn signed(seconds: u64) -> i64 {
    i64::try_from(seconds).unwrap_or(i64::MAX)
}

/// Format whole seconds as a compact signed duration: `0s`, `45s`, `1m5s`, `1h1m1s`, `-2h0m0s`.
pub fn format_duration(seconds: i64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }

    let sign = if seconds < 0 { "-" } else { "" };
    let abs = seconds.unsigned_abs();
    let (hours, minutes, secs) = (abs / 3600, abs % 3600 / 60, abs % 60);

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, secs)
    } else {
        format!("{}{}s", sign, secs)
    }
}

/// Render the rows as a fixed-width table followed by the grand total.
///
/// With `mark_incomplete`, degraded rows get a trailing `*` and a footnote
/// says how many periods are missing. Without it the output carries no
/// indication of degraded rows.
pub fn render(rows: &[ApprovalRow], totals: &Totals, mark_incomplete: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<12} {:<12} {:<12} {:<12} {}",
        "From", "To", "Required", "Approved", "Overtime"
    );

    for row in rows {
        let approval = &row.approval;
        let marker = if mark_incomplete && row.is_degraded() {
            " *"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "{:<12} {:<12} {:<12} {:<12} {:<12}{}",
            approval.period.from,
            approval.period.to,
            format_duration(signed(approval.required_seconds)),
            format_duration(signed(approval.time_spent_seconds)),
            format_duration(approval.overtime_seconds()),
            marker,
        );
    }

    let _ = writeln!(out, "\nTotal: {:<12}", format_duration(totals.overtime_seconds()));

    let degraded = rows.iter().filter(|r| r.is_degraded()).count();
    if mark_incomplete && degraded > 0 {
        let _ = writeln!(
            out,
            "* {} period(s) could not be fetched; totals are incomplete",
            degraded
        );
    }

    out
}

/// Rows of one run with their totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ApprovalRow>,
    pub totals: Totals,
    pub mark_incomplete: bool,
}

impl Report {
    pub fn new(rows: Vec<ApprovalRow>, mark_incomplete: bool) -> Self {
        let totals = aggregate(&rows);
        Self {
            rows,
            totals,
            mark_incomplete,
        }
    }

    /// Number of rows that hold a zeroed placeholder.
    pub fn degraded_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_degraded()).count()
    }

    pub fn render(&self) -> String {
        render(&self.rows, &self.totals, self.mark_incomplete)
    }
}
