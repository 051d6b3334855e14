//! Run configuration.
//!
//! Options come from the command line or the environment (the variable names
//! are the ones the tool has always used) and are validated once into an
//! immutable [`RunConfig`] that every pipeline stage borrows.

use crate::error::AppError;
use crate::models::{parse_date, DateRange};
use chrono::NaiveDate;
use clap::Parser;
use std::fmt;
use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Jira Cloud site the identity is resolved against.
pub const DEFAULT_JIRA_BASE_URL: &str = "https://verifa.atlassian.net";

/// Tempo Cloud API.
pub const DEFAULT_TEMPO_BASE_URL: &str = "https://api.tempo.io";

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "temposaurus")]
#[command(about = "Compare approved Tempo timesheet hours against required hours")]
#[command(version)]
pub struct Cli {
    /// Jira account email, used with the Atlassian token for basic auth
    #[arg(long, env = "JIRA_EMAIL")]
    pub email: String,

    /// Atlassian API token
    #[arg(long, env = "ATLASSIAN_TOKEN", hide_env_values = true)]
    pub atlassian_token: String,

    /// Tempo API token
    #[arg(long, env = "TEMPO_TOKEN", hide_env_values = true)]
    pub tempo_token: String,

    /// First day of the report (YYYY-MM-DD)
    #[arg(long, env = "DATE_FROM")]
    pub date_from: String,

    /// Last day of the report (YYYY-MM-DD, defaults to today)
    #[arg(long, env = "DATE_TO")]
    pub date_to: Option<String>,

    /// Request timeout in whole seconds
    #[arg(long, env = "HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub http_timeout: u64,

    /// Jira Cloud base URL
    #[arg(long, env = "JIRA_BASE_URL", default_value = DEFAULT_JIRA_BASE_URL)]
    pub jira_base_url: String,

    /// Tempo API base URL
    #[arg(long, env = "TEMPO_BASE_URL", default_value = DEFAULT_TEMPO_BASE_URL)]
    pub tempo_base_url: String,

    /// Maximum number of approval requests in flight
    #[arg(long, env = "FETCH_CONCURRENCY", default_value_t = 1)]
    pub concurrency: usize,

    /// Flag rows that could not be fetched instead of showing silent zeros
    #[arg(long, env = "MARK_INCOMPLETE")]
    pub mark_incomplete: bool,
}

impl Cli {
    /// Validate the options into a run configuration.
    ///
    /// `today` is the default end date when none is given.
    pub fn into_config(self, today: NaiveDate) -> Result<RunConfig, AppError> {
        let email = required(self.email, "JIRA_EMAIL")?;
        let atlassian_token = required(self.atlassian_token, "ATLASSIAN_TOKEN")?;
        let tempo_token = required(self.tempo_token, "TEMPO_TOKEN")?;

        let from = date(&self.date_from, "DATE_FROM")?;
        let to = match self.date_to.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => date(value, "DATE_TO")?,
            _ => today,
        };
        let range = DateRange::new(from, to).ok_or_else(|| {
            AppError::invalid_input_field(
                format!("DATE_TO ({}) precedes DATE_FROM ({})", to, from),
                "DATE_TO",
            )
        })?;

        if self.http_timeout == 0 {
            return Err(AppError::invalid_input_field(
                "expected a positive integer for HTTP_TIMEOUT but read: 0",
                "HTTP_TIMEOUT",
            ));
        }

        if self.concurrency == 0 {
            return Err(AppError::invalid_input_field(
                "expected a positive integer for FETCH_CONCURRENCY but read: 0",
                "FETCH_CONCURRENCY",
            ));
        }

        Ok(RunConfig {
            context: CredentialContext {
                email,
                atlassian_token,
                tempo_token,
                timeout: Duration::from_secs(self.http_timeout),
                range,
            },
            endpoints: ServiceEndpoints {
                jira_base_url: self.jira_base_url,
                tempo_base_url: self.tempo_base_url,
            },
            concurrency: self.concurrency,
            mark_incomplete: self.mark_incomplete,
        })
    }
}

fn required(value: String, field: &str) -> Result<String, AppError> {
    if value.trim().is_empty() {
        Err(AppError::invalid_input_field(
            format!("{} not set", field),
            field,
        ))
    } else {
        Ok(value)
    }
}

fn date(value: &str, field: &str) -> Result<NaiveDate, AppError> {
    parse_date(value.trim()).ok_or_else(|| {
        AppError::invalid_input_field(
            format!("expected a YYYY-MM-DD date for {} but read: {}", field, value),
            field,
        )
    })
}

/// Credentials, timeout and date range shared by every request of a run.
#[derive(Clone)]
pub struct CredentialContext {
    /// Jira account email.
    pub email: String,

    /// Atlassian API token (basic auth password).
    pub atlassian_token: String,

    /// Tempo API token (bearer).
    pub tempo_token: String,

    /// Timeout applied to each request.
    pub timeout: Duration,

    /// Range the report covers.
    pub range: DateRange,
}

impl fmt::Debug for CredentialContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialContext")
            .field("email", &self.email)
            .field("atlassian_token", &"<redacted>")
            .field("tempo_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("range", &self.range)
            .finish()
    }
}

/// Base URLs of the two services.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    pub jira_base_url: String,
    pub tempo_base_url: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            jira_base_url: DEFAULT_JIRA_BASE_URL.to_string(),
            tempo_base_url: DEFAULT_TEMPO_BASE_URL.to_string(),
        }
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub context: CredentialContext,
    pub endpoints: ServiceEndpoints,

    /// Maximum number of approval requests in flight (1 = sequential).
    pub concurrency: usize,

    /// Mark degraded rows in the rendered report.
    pub mark_incomplete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec![
            "temposaurus",
            "--email",
            "mia@example.com",
            "--atlassian-token",
            "atl",
            "--tempo-token",
            "tmp",
            "--date-from",
            "2024-01-01",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    fn field_of(err: AppError) -> Option<String> {
        match err {
            AppError::InvalidInput { field, .. } => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).into_config(today()).unwrap();

        assert_eq!(config.context.timeout, Duration::from_secs(30));
        assert_eq!(config.context.range.from_param(), "2024-01-01");
        assert_eq!(config.context.range.to_param(), "2024-03-15");
        assert_eq!(config.endpoints.jira_base_url, DEFAULT_JIRA_BASE_URL);
        assert_eq!(config.endpoints.tempo_base_url, DEFAULT_TEMPO_BASE_URL);
        assert_eq!(config.concurrency, 1);
        assert!(!config.mark_incomplete);
    }

    #[test]
    fn test_explicit_options() {
        let config = parse(&[
            "--date-to",
            "2024-01-31",
            "--http-timeout",
            "5",
            "--concurrency",
            "4",
            "--mark-incomplete",
        ])
        .into_config(today())
        .unwrap();

        assert_eq!(config.context.range.to_param(), "2024-01-31");
        assert_eq!(config.context.timeout, Duration::from_secs(5));
        assert_eq!(config.concurrency, 4);
        assert!(config.mark_incomplete);
    }

    #[test]
    fn test_rejects_malformed_dates() {
        let err = parse(&["--date-to", "31.01.2024"])
            .into_config(today())
            .unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("DATE_TO"));

        let mut cli = parse(&[]);
        cli.date_from = "2024-1-1".to_string();
        let err = cli.into_config(today()).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("DATE_FROM"));
    }

    #[test]
    fn test_rejects_reversed_range() {
        let err = parse(&["--date-to", "2023-12-31"])
            .into_config(today())
            .unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("DATE_TO"));
    }

    #[test]
    fn test_rejects_empty_credentials_and_zero_values() {
        let mut cli = parse(&[]);
        cli.tempo_token = "  ".to_string();
        let err = cli.into_config(today()).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("TEMPO_TOKEN"));

        let err = parse(&["--http-timeout", "0"])
            .into_config(today())
            .unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("HTTP_TIMEOUT"));

        let err = parse(&["--concurrency", "0"])
            .into_config(today())
            .unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("FETCH_CONCURRENCY"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = parse(&[]).into_config(today()).unwrap();
        let debug = format!("{:?}", config.context);
        assert!(!debug.contains("atl\""));
        assert!(!debug.contains("tmp\""));
        assert!(debug.contains("<redacted>"));
    }
}
