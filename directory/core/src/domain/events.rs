// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::contact::{ContactId, TrustLevel, WalletAddress};

/// Why a contact's trust level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustUpdateReason {
    Manual,
    Bulk,
    /// Suggested level applied from the detail view.
    Suggestion,
}

/// Directory change notifications, published on the
/// [`EventBus`](crate::infrastructure::event_bus::EventBus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryEvent {
    ContactAdded {
        contact_id: ContactId,
        address: WalletAddress,
        added_at: DateTime<Utc>,
    },
    ContactUpdated {
        contact_id: ContactId,
        updated_at: DateTime<Utc>,
    },
    ContactsDeleted {
        contact_ids: Vec<ContactId>,
        deleted_at: DateTime<Utc>,
    },
    TrustLevelsUpdated {
        contact_ids: Vec<ContactId>,
        trust_level: TrustLevel,
        reason: TrustUpdateReason,
        updated_at: DateTime<Utc>,
    },
    TagCreated {
        tag_id: Uuid,
        name: String,
        created_at: DateTime<Utc>,
    },
    TagUpdated {
        tag_id: Uuid,
        name: String,
        updated_at: DateTime<Utc>,
    },
    TagsDeleted {
        names: Vec<String>,
        deleted_at: DateTime<Utc>,
    },
}

impl DirectoryEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            DirectoryEvent::ContactAdded { added_at, .. } => *added_at,
            DirectoryEvent::ContactUpdated { updated_at, .. } => *updated_at,
            DirectoryEvent::ContactsDeleted { deleted_at, .. } => *deleted_at,
            DirectoryEvent::TrustLevelsUpdated { updated_at, .. } => *updated_at,
            DirectoryEvent::TagCreated { created_at, .. } => *created_at,
            DirectoryEvent::TagUpdated { updated_at, .. } => *updated_at,
            DirectoryEvent::TagsDeleted { deleted_at, .. } => *deleted_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            DirectoryEvent::ContactAdded { .. } => "contact_added",
            DirectoryEvent::ContactUpdated { .. } => "contact_updated",
            DirectoryEvent::ContactsDeleted { .. } => "contacts_deleted",
            DirectoryEvent::TrustLevelsUpdated { .. } => "trust_levels_updated",
            DirectoryEvent::TagCreated { .. } => "tag_created",
            DirectoryEvent::TagUpdated { .. } => "tag_updated",
            DirectoryEvent::TagsDeleted { .. } => "tags_deleted",
        }
    }

    /// One-line human summary for terminal notices.
    pub fn summary(&self) -> String {
        match self {
            DirectoryEvent::ContactAdded { address, .. } => format!("contact added: {}", address.short()),
            DirectoryEvent::ContactUpdated { contact_id, .. } => format!("contact updated: {}", contact_id),
            DirectoryEvent::ContactsDeleted { contact_ids, .. } => {
                format!("{} contact(s) deleted", contact_ids.len())
            }
            DirectoryEvent::TrustLevelsUpdated {
                contact_ids,
                trust_level,
                reason,
                ..
            } => format!(
                "trust level {} set on {} contact(s) ({:?})",
                trust_level,
                contact_ids.len(),
                reason
            ),
            DirectoryEvent::TagCreated { name, .. } => format!("tag created: {}", name),
            DirectoryEvent::TagUpdated { name, .. } => format!("tag updated: {}", name),
            DirectoryEvent::TagsDeleted { names, .. } => format!("{} tag(s) deleted", names.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = DirectoryEvent::TrustLevelsUpdated {
            contact_ids: vec![ContactId::from("3")],
            trust_level: TrustLevel::new(9),
            reason: TrustUpdateReason::Bulk,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "trust_levels_updated");
        assert_eq!(json["reason"], "bulk");
        assert_eq!(json["trust_level"], 9);
        assert_eq!(event.event_type(), "trust_levels_updated");
    }

    #[test]
    fn test_summary() {
        let event = DirectoryEvent::ContactsDeleted {
            contact_ids: vec![ContactId::from("1"), ContactId::from("2")],
            deleted_at: Utc::now(),
        };
        assert_eq!(event.summary(), "2 contact(s) deleted");
    }
}
