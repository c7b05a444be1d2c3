use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{Contact, ContactId, NewContact},
    error::ErrorBody,
};
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("contact service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from contact service: {0}")]
    MalformedResponse(String),
    #[error("contact service rejected the request with status {status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ClientError {
    /// The server-provided `error` text, when the failing response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid contact service URL '{url}': {reason}")]
pub struct InvalidApiUrl {
    pub url: String,
    pub reason: String,
}

/// Normalize a configured base URL: require an absolute http(s) URL and
/// strip trailing slashes so joined request paths stay canonical.
pub fn normalize_api_url(raw: &str) -> Result<String, InvalidApiUrl> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|source| InvalidApiUrl {
        url: trimmed.to_string(),
        reason: source.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        other => Err(InvalidApiUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Operations the remote contact collection exposes. Apps and tests depend
/// on this seam rather than on the concrete HTTP client.
#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ClientError>;
    async fn create_contact(&self, draft: &NewContact) -> Result<Contact, ClientError>;
    async fn delete_contact(&self, id: &ContactId) -> Result<(), ClientError>;
}

pub struct ContactClient {
    http: Client,
    api_url: String,
}

impl ContactClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            api_url,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn contacts_url(&self) -> String {
        format!("{}/contacts", self.api_url)
    }

    fn contact_url(&self, id: &ContactId) -> String {
        format!("{}/contacts/{}", self.api_url, id)
    }

    async fn status_error(operation: &'static str, response: Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => None,
        };
        warn!(
            operation,
            %status,
            message = message.as_deref().unwrap_or("<no error body>"),
            "contact service reported failure"
        );
        ClientError::Status { status, message }
    }
}

#[async_trait]
impl ContactApi for ContactClient {
    async fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        let response = self.http.get(self.contacts_url()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "contact list request rejected");
            return Err(ClientError::Status {
                status,
                message: None,
            });
        }

        let body = response.text().await?;
        parse_contact_list(&body)
    }

    async fn create_contact(&self, draft: &NewContact) -> Result<Contact, ClientError> {
        let response = self
            .http
            .post(self.contacts_url())
            .json(draft)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::status_error("create_contact", response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            ClientError::MalformedResponse(format!("created contact failed to parse: {err}"))
        })
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<(), ClientError> {
        let response = self.http.delete(self.contact_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error("delete_contact", response).await);
        }

        // Success body is ignored by contract.
        Ok(())
    }
}

// Explicit parse step at the collaborator boundary: unvalidated JSON never
// crosses into the typed collection.
fn parse_contact_list(body: &str) -> Result<Vec<Contact>, ClientError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|err| ClientError::MalformedResponse(format!("invalid JSON: {err}")))?;

    if !value.is_array() {
        return Err(ClientError::MalformedResponse(format!(
            "expected a JSON array of contacts, got {}",
            json_kind(&value)
        )));
    }

    serde_json::from_value(value).map_err(|err| {
        ClientError::MalformedResponse(format!("contact entry failed to parse: {err}"))
    })
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
