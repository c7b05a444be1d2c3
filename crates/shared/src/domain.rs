use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque server-assigned identifier. Never minted locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub String);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id")]
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// The optional note, with an empty or whitespace-only string counting as absent.
    pub fn message_text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Create-request payload. `id` and `created_at` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortCriterion {
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::Newest,
        SortCriterion::Oldest,
        SortCriterion::NameAsc,
        SortCriterion::NameDesc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortCriterion::Newest => "Newest First",
            SortCriterion::Oldest => "Oldest First",
            SortCriterion::NameAsc => "Name (A-Z)",
            SortCriterion::NameDesc => "Name (Z-A)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::Newest => "newest",
            SortCriterion::Oldest => "oldest",
            SortCriterion::NameAsc => "name-asc",
            SortCriterion::NameDesc => "name-desc",
        }
    }
}

impl Default for SortCriterion {
    fn default() -> Self {
        SortCriterion::Newest
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown sort criterion '{0}' (expected newest, oldest, name-asc or name-desc)")]
pub struct UnknownSortCriterion(String);

impl FromStr for SortCriterion {
    type Err = UnknownSortCriterion;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "newest" => Ok(SortCriterion::Newest),
            "oldest" => Ok(SortCriterion::Oldest),
            "name-asc" => Ok(SortCriterion::NameAsc),
            "name-desc" => Ok(SortCriterion::NameDesc),
            other => Err(UnknownSortCriterion(other.to_string())),
        }
    }
}

/// Derive a freshly ordered view. The input is never mutated; ties keep
/// their incoming relative order (stable sort).
pub fn sorted_by(contacts: &[Contact], by: SortCriterion) -> Vec<Contact> {
    let mut view = contacts.to_vec();
    view.sort_by(|a, b| compare(a, b, by));
    view
}

fn compare(a: &Contact, b: &Contact, by: SortCriterion) -> Ordering {
    match by {
        SortCriterion::Newest => b.created_at.cmp(&a.created_at),
        SortCriterion::Oldest => a.created_at.cmp(&b.created_at),
        SortCriterion::NameAsc => name_key(&a.name).cmp(&name_key(&b.name)),
        SortCriterion::NameDesc => name_key(&b.name).cmp(&name_key(&a.name)),
    }
}

// Case-insensitive fold standing in for locale collation.
fn name_key(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contact(id: &str, name: &str, created_minute: u32) -> Contact {
        Contact {
            id: ContactId::from(id),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "555-0100".to_string(),
            message: None,
            created_at: Utc
                .with_ymd_and_hms(2024, 3, 1, 12, created_minute, 0)
                .unwrap(),
        }
    }

    fn ids(view: &[Contact]) -> Vec<&str> {
        view.iter().map(|c| c.id.0.as_str()).collect()
    }

    #[test]
    fn parses_wire_contact_with_mongo_field_names() {
        let raw = r#"{
            "_id": "64b1",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "555-0100",
            "message": "Analytical engines",
            "createdAt": "2024-03-01T12:00:00.000Z"
        }"#;

        let contact: Contact = serde_json::from_str(raw).expect("wire contact");
        assert_eq!(contact.id, ContactId::from("64b1"));
        assert_eq!(contact.name, "Ada Lovelace");
        assert_eq!(contact.message_text(), Some("Analytical engines"));
    }

    #[test]
    fn missing_and_empty_messages_both_count_as_absent() {
        let raw = r#"{
            "_id": "64b2",
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "phone": "555-0101",
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let contact: Contact = serde_json::from_str(raw).expect("wire contact");
        assert_eq!(contact.message_text(), None);

        let mut with_empty = contact.clone();
        with_empty.message = Some("   ".to_string());
        assert_eq!(with_empty.message_text(), None);
    }

    #[test]
    fn newest_orders_descending_by_creation_time() {
        let contacts = vec![
            contact("1", "Ada", 0),
            contact("2", "Bryn", 1),
            contact("3", "Cleo", 2),
        ];
        assert_eq!(
            ids(&sorted_by(&contacts, SortCriterion::Newest)),
            vec!["3", "2", "1"]
        );
    }

    #[test]
    fn oldest_orders_ascending_by_creation_time() {
        let contacts = vec![
            contact("2", "Bryn", 1),
            contact("3", "Cleo", 2),
            contact("1", "Ada", 0),
        ];
        assert_eq!(
            ids(&sorted_by(&contacts, SortCriterion::Oldest)),
            vec!["1", "2", "3"]
        );
    }

    #[test]
    fn name_ordering_ignores_case_in_both_directions() {
        let contacts = vec![
            contact("1", "charlie", 0),
            contact("2", "Alice", 1),
            contact("3", "Bob", 2),
        ];
        assert_eq!(
            ids(&sorted_by(&contacts, SortCriterion::NameAsc)),
            vec!["2", "3", "1"]
        );
        assert_eq!(
            ids(&sorted_by(&contacts, SortCriterion::NameDesc)),
            vec!["1", "3", "2"]
        );
    }

    #[test]
    fn ties_keep_their_incoming_order() {
        let shared_instant = 5;
        let contacts = vec![
            contact("1", "Same", shared_instant),
            contact("2", "same", shared_instant),
        ];
        assert_eq!(
            ids(&sorted_by(&contacts, SortCriterion::Newest)),
            vec!["1", "2"]
        );
        assert_eq!(
            ids(&sorted_by(&contacts, SortCriterion::NameAsc)),
            vec!["1", "2"]
        );
    }

    #[test]
    fn sorting_never_mutates_the_source_collection() {
        let contacts = vec![contact("1", "Zed", 0), contact("2", "Ada", 1)];
        let before = contacts.clone();
        let _ = sorted_by(&contacts, SortCriterion::NameAsc);
        assert_eq!(contacts, before);
    }

    #[test]
    fn criterion_wire_names_round_trip() {
        for criterion in SortCriterion::ALL {
            let parsed: SortCriterion = criterion.as_str().parse().expect("wire name");
            assert_eq!(parsed, criterion);
        }
        assert!("alphabetical".parse::<SortCriterion>().is_err());
    }
}
