//! Atlassian account identity.

use serde::Deserialize;

/// The user the report is generated for, as returned by the Jira `Myself` endpoint.
///
/// The account ID uniquely identifies the user across all Atlassian products
/// and is what Tempo keys timesheets by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque, stable Atlassian account ID.
    pub account_id: String,

    /// Email address (hidden by some privacy settings).
    #[serde(default)]
    pub email_address: Option<String>,

    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
}
