use serde::{Deserialize, Serialize};

/// Body the contact service attaches to failed create/delete responses.
/// The `error` field is optional; callers fall back to a generic message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }
}
