//! Report pipeline.
//!
//! Identity resolution, then period enumeration, then one approval lookup per
//! period, then aggregation. The first two stages abort the run on failure;
//! an approval failure only zeroes its own row.

use crate::config::RunConfig;
use crate::error::FatalError;
use crate::models::{ApprovalRow, Identity, Period};
use crate::services::report::Report;
use crate::services::{jira_client, tempo_client};
use futures::stream::{self, StreamExt};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    IdentityResolved,
    PeriodsEnumerated,
    ApprovalsCollected,
    Reported,
    Done,
    Aborted,
}

/// One run of the report pipeline over a validated configuration.
pub struct Pipeline<'a> {
    config: &'a RunConfig,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            state: PipelineState::Start,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run every stage and return the report.
    ///
    /// On a fatal error the state ends up `Aborted` and no report exists.
    pub async fn run(&mut self) -> Result<Report, FatalError> {
        let config = self.config;
        let context = &config.context;
        let endpoints = &config.endpoints;

        let identity = jira_client::resolve_identity(context, endpoints).await;
        let identity = self.check(identity)?;
        self.advance(PipelineState::IdentityResolved);

        let periods = tempo_client::enumerate_periods(context, endpoints).await;
        let periods = self.check(periods)?;
        self.advance(PipelineState::PeriodsEnumerated);

        let rows = collect_approvals(config, &identity, &periods).await;
        self.advance(PipelineState::ApprovalsCollected);

        let report = Report::new(rows, config.mark_incomplete);
        self.advance(PipelineState::Reported);

        if report.degraded_count() > 0 {
            log::warn!(
                "{} of {} period(s) could not be fetched; totals are incomplete",
                report.degraded_count(),
                report.rows.len()
            );
        }

        self.advance(PipelineState::Done);
        Ok(report)
    }

    fn check<T>(&mut self, result: Result<T, FatalError>) -> Result<T, FatalError> {
        if result.is_err() {
            self.advance(PipelineState::Aborted);
        }
        result
    }

    fn advance(&mut self, next: PipelineState) {
        log::debug!("Pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Fetch the approval for every period, at most `config.concurrency` at a time.
///
/// Rows come back in period order whatever order the requests finish in.
/// A failed lookup is logged and yields a zeroed row for its period.
pub async fn collect_approvals(
    config: &RunConfig,
    identity: &Identity,
    periods: &[Period],
) -> Vec<ApprovalRow> {
    log::info!(
        "Collecting timesheet approvals for {} period(s)...",
        periods.len()
    );

    let context = &config.context;
    let endpoints = &config.endpoints;

    // `buffered` yields in input order, so row i always belongs to period i.
    stream::iter(periods.iter().map(|period| async move {
        match tempo_client::fetch_approval(context, endpoints, identity, period).await {
            Ok(approval) => ApprovalRow::complete(approval),
            Err(e) => {
                log::warn!("Error, skipping {}", e);
                ApprovalRow::degraded(e.period)
            }
        }
    }))
    .buffered(config.concurrency.max(1))
    .collect()
    .await
}
