//! UI/backend events and error modeling for the desktop controller.

use client_core::ClientError;
use shared::domain::{Contact, ContactId};

pub enum UiEvent {
    ContactsLoaded(Vec<Contact>),
    LoadFailed { reason: String },
    ContactCreated(Contact),
    ContactDeleted(ContactId),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    CreateContact,
    DeleteContact,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        Self {
            context,
            message: alert_text(context, err),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// Server-reported errors surface verbatim. A rejection without an error
// body gets the operation's fixed generic text; transport-level failures
// get the retry variant.
fn alert_text(context: UiErrorContext, err: &ClientError) -> String {
    if let Some(message) = err.server_message() {
        return message.to_string();
    }

    match (context, err) {
        (UiErrorContext::CreateContact, ClientError::Status { .. }) => {
            "Failed to add contact".to_string()
        }
        (UiErrorContext::DeleteContact, ClientError::Status { .. }) => {
            "Failed to delete contact".to_string()
        }
        (UiErrorContext::CreateContact, _) => {
            "Failed to add contact. Please try again.".to_string()
        }
        (UiErrorContext::DeleteContact, _) => {
            "Failed to delete contact. Please try again.".to_string()
        }
    }
}
