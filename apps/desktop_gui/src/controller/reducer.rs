//! Reducer over the controller's state: the authoritative contact cache
//! and every transition the UI can apply to it. Pure with respect to the
//! network; requests are dispatched elsewhere and only confirmed outcomes
//! arrive here as events.

use std::time::{Duration, Instant};

use shared::domain::{sorted_by, Contact, ContactId, SortCriterion};
use tracing::error;

use crate::controller::events::UiEvent;

pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct ControllerState {
    contacts: Vec<Contact>,
    sort_by: SortCriterion,
    notification: Option<Notification>,
    pending_delete: Option<ContactId>,
    alert: Option<String>,
}

impl ControllerState {
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    pub fn sort_by(&self) -> SortCriterion {
        self.sort_by
    }

    /// Pure local update; no network effect.
    pub fn set_sort(&mut self, by: SortCriterion) {
        self.sort_by = by;
    }

    /// Recomputed from a copy on every render; the cache itself keeps
    /// server order (newest-first after prepends).
    pub fn sorted_view(&self) -> Vec<Contact> {
        sorted_by(&self.contacts, self.sort_by)
    }

    pub fn apply_event(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::ContactsLoaded(contacts) => {
                self.contacts = contacts;
            }
            UiEvent::LoadFailed { reason } => {
                error!(%reason, "contact list load failed; falling back to empty collection");
                self.contacts.clear();
            }
            UiEvent::ContactCreated(contact) => {
                self.contacts.insert(0, contact);
                self.raise_notification("Contact added successfully!", now);
            }
            UiEvent::ContactDeleted(id) => {
                self.contacts.retain(|contact| contact.id != id);
                self.raise_notification("Contact deleted successfully!", now);
            }
            UiEvent::Error(error) => {
                self.alert = Some(error.message().to_string());
            }
        }
    }

    // Deletion flows through request -> confirm/cancel so the confirmation
    // capability can be rendered as a modal, a prompt, or driven directly
    // by tests.

    pub fn request_delete(&mut self, id: ContactId) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<&ContactId> {
        self.pending_delete.as_ref()
    }

    /// Returns the id to dispatch; the cache is untouched until the
    /// server-confirmed `ContactDeleted` event comes back.
    pub fn confirm_delete(&mut self) -> Option<ContactId> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn notification(&self, now: Instant) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|notification| notification.expires_at > now)
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Drop the notification once its deadline passes.
    pub fn tick(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.expires_at <= now)
        {
            self.notification = None;
        }
    }

    // Replacing the previous notification also replaces its deadline, so a
    // stale timer can never clear a newer message early.
    fn raise_notification(&mut self, message: &str, now: Instant) {
        self.notification = Some(Notification {
            message: message.to_string(),
            expires_at: now + NOTIFICATION_TTL,
        });
    }

    #[cfg(test)]
    fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}
