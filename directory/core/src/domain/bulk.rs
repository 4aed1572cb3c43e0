// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Bulk mutations over a contact collection.
//!
//! Both functions consume the collection and hand back the new one. Contacts
//! not named in `ids` are moved through untouched, and ids that match no
//! contact are ignored.

use std::collections::HashSet;

use crate::domain::contact::{Contact, ContactId, TrustLevel};

/// Set `level` on every contact whose id is in `ids`.
pub fn bulk_set_trust_level(
    contacts: Vec<Contact>,
    ids: &HashSet<ContactId>,
    level: TrustLevel,
) -> Vec<Contact> {
    contacts
        .into_iter()
        .map(|mut contact| {
            if ids.contains(&contact.id) {
                contact.trust_level = level;
            }
            contact
        })
        .collect()
}

/// Remove every contact whose id is in `ids`. Remaining order is kept.
pub fn bulk_delete(mut contacts: Vec<Contact>, ids: &HashSet<ContactId>) -> Vec<Contact> {
    contacts.retain(|contact| !ids.contains(&contact.id));
    contacts
}

/// Ids from `ids` that name a contact in `contacts`, in collection order.
pub fn matching_ids(contacts: &[Contact], ids: &HashSet<ContactId>) -> Vec<ContactId> {
    contacts
        .iter()
        .filter(|c| ids.contains(&c.id))
        .map(|c| c.id.clone())
        .collect()
}
