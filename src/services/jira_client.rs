//! Jira Cloud client.
//!
//! Resolves the configured credentials into the Atlassian account ID through
//! the `Myself` endpoint:
//! <https://developer.atlassian.com/cloud/jira/platform/rest/v3/api-group-myself/#api-rest-api-3-myself-get>

use crate::config::{CredentialContext, ServiceEndpoints};
use crate::error::{AppError, FatalError, Stage};
use crate::models::Identity;
use crate::services::http;

/// Endpoint name used in diagnostics.
pub const MYSELF_ENDPOINT: &str = "Myself";

const MYSELF_PATH: &str = "/rest/api/3/myself";

/// Resolve the account identity for the configured email and Atlassian token.
///
/// Any failure is fatal: without an account ID no timesheet can be looked up.
pub async fn resolve_identity(
    context: &CredentialContext,
    endpoints: &ServiceEndpoints,
) -> Result<Identity, FatalError> {
    log::info!("Acquiring Atlassian account ID...");

    fetch_myself(context, endpoints)
        .await
        .map_err(|e| FatalError::new(Stage::IdentityResolution, e))
}

async fn fetch_myself(
    context: &CredentialContext,
    endpoints: &ServiceEndpoints,
) -> Result<Identity, AppError> {
    let client = http::build_client(context.timeout)?;
    let url = http::api_url(&endpoints.jira_base_url, MYSELF_PATH);

    let request = client
        .get(&url)
        .basic_auth(&context.email, Some(&context.atlassian_token));

    let identity: Identity = http::get_json(request, MYSELF_ENDPOINT).await?;

    if identity.account_id.trim().is_empty() {
        return Err(AppError::parse("empty accountId", MYSELF_ENDPOINT));
    }

    log::debug!("Resolved account ID {}", identity.account_id);
    Ok(identity)
}
