//! Tempo Cloud client.
//!
//! A timesheet is the basic unit of time tracking in Tempo. Each one covers a
//! single period, typically a pay period, and records how much time was
//! required and how much was logged and approved.

use crate::config::{CredentialContext, ServiceEndpoints};
use crate::error::{AppError, FatalError, PeriodError, Stage};
use crate::models::{Identity, Period, TimesheetApproval};
use crate::services::http;
use serde::Deserialize;

/// Endpoint names used in diagnostics.
pub const PERIODS_ENDPOINT: &str = "periods";
pub const APPROVALS_ENDPOINT: &str = "timesheet-approvals/user";

const PERIODS_PATH: &str = "/core/3/periods";
const APPROVALS_PATH: &str = "/core/3/timesheet-approvals/user";

/// Response from the periods endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsDocument {
    pub periods: Vec<Period>,
}

/// Response from the timesheet approvals endpoint.
///
/// The echoed period is ignored; rows are keyed by the period that was asked for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetApprovalDocument {
    pub required_seconds: u64,
    pub time_spent_seconds: u64,
}

/// List the timesheet periods overlapping the configured date range.
///
/// Periods keep the order the service returned them in. An empty list is valid.
pub async fn enumerate_periods(
    context: &CredentialContext,
    endpoints: &ServiceEndpoints,
) -> Result<Vec<Period>, FatalError> {
    log::info!(
        "Acquiring the list of timesheet periods from {} to {}...",
        context.range.from_param(),
        context.range.to_param()
    );

    fetch_periods(context, endpoints)
        .await
        .map_err(|e| FatalError::new(Stage::PeriodEnumeration, e))
}

async fn fetch_periods(
    context: &CredentialContext,
    endpoints: &ServiceEndpoints,
) -> Result<Vec<Period>, AppError> {
    let client = http::build_client(context.timeout)?;
    let url = http::api_url(&endpoints.tempo_base_url, PERIODS_PATH);

    let request = client
        .get(&url)
        .bearer_auth(&context.tempo_token)
        .query(&[
            ("from", context.range.from_param()),
            ("to", context.range.to_param()),
        ]);

    let document: PeriodsDocument = http::get_json(request, PERIODS_ENDPOINT).await?;

    if let Some(bad) = document.periods.iter().find(|p| !p.is_valid()) {
        return Err(AppError::parse(
            format!("invalid period {} to {}", bad.from, bad.to),
            PERIODS_ENDPOINT,
        ));
    }

    log::debug!("Received {} period(s)", document.periods.len());
    Ok(document.periods)
}

/// Fetch the approval figures for one period.
///
/// A failure here only concerns `period`; the caller decides how to degrade.
pub async fn fetch_approval(
    context: &CredentialContext,
    endpoints: &ServiceEndpoints,
    identity: &Identity,
    period: &Period,
) -> Result<TimesheetApproval, PeriodError> {
    fetch_approval_document(context, endpoints, identity, period)
        .await
        .map(|doc| TimesheetApproval {
            period: period.clone(),
            required_seconds: doc.required_seconds,
            time_spent_seconds: doc.time_spent_seconds,
        })
        .map_err(|source| PeriodError {
            period: period.clone(),
            source,
        })
}

async fn fetch_approval_document(
    context: &CredentialContext,
    endpoints: &ServiceEndpoints,
    identity: &Identity,
    period: &Period,
) -> Result<TimesheetApprovalDocument, AppError> {
    let client = http::build_client(context.timeout)?;
    let url = approval_url(&endpoints.tempo_base_url, &identity.account_id);

    let request = client
        .get(&url)
        .bearer_auth(&context.tempo_token)
        .query(&[("from", period.from.as_str()), ("to", period.to.as_str())]);

    http::get_json(request, APPROVALS_ENDPOINT).await
}

/// Build the per-account approvals URL, with the account ID as one path segment.
fn approval_url(base_url: &str, account_id: &str) -> String {
    let path = format!("{}/{}", APPROVALS_PATH, urlencoding::encode(account_id));
    http::api_url(base_url, &path)
}
