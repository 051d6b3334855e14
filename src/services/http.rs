//! Shared HTTP/JSON plumbing for the Jira and Tempo clients.
//!
//! Every call builds its own [`Client`], so no connection state is shared
//! between calls and approval lookups can run side by side.

use crate::error::AppError;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build an HTTP client for a single call.
pub fn build_client(timeout: Duration) -> Result<Client, AppError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static("application/json"),
    );

    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::request(format!("Failed to build HTTP client: {}", e)))
}

/// Join a base URL and an API path.
pub fn api_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Send a GET request and decode the 200 response body.
pub async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    endpoint: &str,
) -> Result<T, AppError> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::from(e).at_endpoint(endpoint))?;

    handle_response(response, endpoint).await
}

/// Turn a response into a decoded document or an error.
///
/// Only 200 counts as success; 4xx and 5xx are treated alike.
async fn handle_response<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<T, AppError> {
    let status = response.status();

    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        return Err(AppError::api(message, status.as_u16(), endpoint));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AppError::from(e).at_endpoint(endpoint))?;

    decode_body(&body, endpoint)
}

/// Decode a JSON document. Unknown fields are ignored.
pub fn decode_body<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T, AppError> {
    serde_json::from_str(body).map_err(|e| AppError::parse(e.to_string(), endpoint))
}

/// Extract a readable message from an error body.
///
/// Jira returns `{"errorMessages": [...]}`, Tempo returns
/// `{"errors": [{"message": "..."}]}`, and both occasionally use `{"message": "..."}`.
fn error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

    let jira_messages = value.get("errorMessages").and_then(|v| v.as_array());
    let tempo_errors = value.get("errors").and_then(|v| v.as_array());

    let messages: Vec<String> = if let Some(list) = jira_messages {
        list.iter()
            .filter_map(|m| m.as_str().map(str::to_string))
            .collect()
    } else if let Some(list) = tempo_errors {
        list.iter()
            .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
            .map(str::to_string)
            .collect()
    } else {
        value
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| vec![s.to_string()])
            .unwrap_or_default()
    };

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Doc {
        value: u32,
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        assert_eq!(
            api_url("https://api.tempo.io/", "/core/3/periods"),
            "https://api.tempo.io/core/3/periods"
        );
        assert_eq!(
            api_url("https://api.tempo.io", "/core/3/periods"),
            "https://api.tempo.io/core/3/periods"
        );
    }

    #[test]
    fn test_decode_body_ignores_unknown_fields() {
        let doc: Doc = decode_body(r#"{"value": 7, "other": "x"}"#, "test").unwrap();
        assert_eq!(doc.value, 7);
    }

    #[test]
    fn test_decode_body_reports_endpoint() {
        let err = decode_body::<Doc>("<html>", "periods").unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
        assert_eq!(err.endpoint(), Some("periods"));
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"errorMessages": ["Token expired", "Log in again"]}"#).as_deref(),
            Some("Token expired; Log in again")
        );
        assert_eq!(
            error_message(r#"{"errors": [{"message": "Period not found"}]}"#).as_deref(),
            Some("Period not found")
        );
        assert_eq!(
            error_message(r#"{"message": "Rate limited"}"#).as_deref(),
            Some("Rate limited")
        );
        assert_eq!(error_message("not json"), None);
        assert_eq!(error_message(r#"{"errorMessages": []}"#), None);
    }
}
