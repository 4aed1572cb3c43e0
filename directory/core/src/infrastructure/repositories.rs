// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::bulk;
use crate::domain::contact::{Contact, ContactId, TrustLevel};
use crate::domain::repository::{ContactMutation, ContactRepository, ContactRevision, RepositoryError};

/// Contact collection held in process memory. Insertion order is listing order.
#[derive(Clone, Default)]
pub struct InMemoryContactRepository {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Arc::new(RwLock::new(contacts)),
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.read().is_empty()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn save(&self, contact: &Contact) -> Result<(), RepositoryError> {
        let mut contacts = self.contacts.write();
        match contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => *existing = contact.clone(),
            None => contacts.push(contact.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, RepositoryError> {
        let contacts = self.contacts.read();
        Ok(contacts.iter().find(|c| &c.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        Ok(self.contacts.read().clone())
    }

    async fn replace_all(&self, contacts: Vec<Contact>) -> Result<(), RepositoryError> {
        *self.contacts.write() = contacts;
        Ok(())
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, RepositoryError> {
        let mut contacts = self.contacts.write();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        Ok(contacts.len() != before)
    }

    async fn modify(
        &self,
        id: &ContactId,
        mutation: ContactMutation,
    ) -> Result<Option<ContactRevision>, RepositoryError> {
        let mut contacts = self.contacts.write();
        let Some(contact) = contacts.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };
        let previous = contact.clone();
        mutation(contact);
        Ok(Some(ContactRevision {
            previous,
            current: contact.clone(),
        }))
    }

    async fn rename_tag(&self, from: &str, to: &str) -> Result<usize, RepositoryError> {
        let mut contacts = self.contacts.write();
        Ok(contacts
            .iter_mut()
            .map(|contact| contact.tags.rename(from, to))
            .filter(|renamed| *renamed)
            .count())
    }

    async fn set_trust_levels(
        &self,
        ids: &HashSet<ContactId>,
        level: TrustLevel,
    ) -> Result<Vec<ContactId>, RepositoryError> {
        let mut contacts = self.contacts.write();
        let matched = bulk::matching_ids(&contacts, ids);
        if !matched.is_empty() {
            let current = std::mem::take(&mut *contacts);
            *contacts = bulk::bulk_set_trust_level(current, ids, level);
        }
        Ok(matched)
    }

    async fn delete_many(&self, ids: &HashSet<ContactId>) -> Result<Vec<ContactId>, RepositoryError> {
        let mut contacts = self.contacts.write();
        let matched = bulk::matching_ids(&contacts, ids);
        if !matched.is_empty() {
            let current = std::mem::take(&mut *contacts);
            *contacts = bulk::bulk_delete(current, ids);
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::{NewContact, TagSet, WalletAddress};

    fn contact(id: &str) -> Contact {
        Contact {
            id: ContactId::from(id),
            address: WalletAddress::parse(&format!("0x{:0>40}", id)).unwrap(),
            name: None,
            role: None,
            notes: String::new(),
            tags: TagSet::new(),
            trust_level: TrustLevel::DEFAULT,
            interaction_count: 0,
            last_interaction: None,
        }
    }

    #[tokio::test]
    async fn test_save_inserts_then_replaces_in_place() {
        let repo = InMemoryContactRepository::with_contacts(vec![contact("1"), contact("2")]);

        let mut updated = contact("1");
        updated.name = Some("Alice".to_string());
        repo.save(&updated).await.unwrap();
        repo.save(&contact("3")).await.unwrap();

        let all = repo.list_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(all[0].name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_find_and_delete() {
        let repo = InMemoryContactRepository::new();
        let created = Contact::create(
            NewContact::new("0x742d35Cc6634C0532925a3b8D5c8c50B7C3a5d2A"),
            TrustLevel::DEFAULT,
        )
        .unwrap();
        repo.save(&created).await.unwrap();

        assert!(repo.find_by_id(&created.id).await.unwrap().is_some());
        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_bulk_operations_report_matches() {
        let repo = InMemoryContactRepository::with_contacts(vec![contact("1"), contact("2"), contact("3")]);
        let ids: HashSet<ContactId> = ["2", "404"].iter().map(|s| ContactId::from(*s)).collect();

        let updated = repo.set_trust_levels(&ids, TrustLevel::new(9)).await.unwrap();
        assert_eq!(updated, vec![ContactId::from("2")]);
        let two = repo.find_by_id(&ContactId::from("2")).await.unwrap().unwrap();
        assert_eq!(two.trust_level.value(), 9);

        let removed = repo.delete_many(&ids).await.unwrap();
        assert_eq!(removed, vec![ContactId::from("2")]);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_modify_returns_revision() {
        let repo = InMemoryContactRepository::with_contacts(vec![contact("1")]);
        let revision = repo
            .modify(
                &ContactId::from("1"),
                Box::new(|c: &mut Contact| c.trust_level = TrustLevel::new(8)),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(revision.previous.trust_level, TrustLevel::DEFAULT);
        assert_eq!(revision.current.trust_level.value(), 8);

        let missing = repo
            .modify(&ContactId::from("404"), Box::new(|_: &mut Contact| {}))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_rename_tag_touches_only_carriers() {
        let mut tagged = contact("1");
        tagged.tags = TagSet::from(vec!["Developer".to_string(), "VIP".to_string()]);
        let repo = InMemoryContactRepository::with_contacts(vec![tagged, contact("2")]);

        assert_eq!(repo.rename_tag("Developer", "Engineer").await.unwrap(), 1);
        let one = repo.find_by_id(&ContactId::from("1")).await.unwrap().unwrap();
        assert_eq!(one.tags.iter().collect::<Vec<_>>(), vec!["Engineer", "VIP"]);
        assert_eq!(repo.rename_tag("Developer", "Engineer").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_all() {
        let repo = InMemoryContactRepository::with_contacts(vec![contact("1")]);
        repo.replace_all(vec![contact("7"), contact("8")]).await.unwrap();
        assert_eq!(repo.len(), 2);
        assert!(repo.find_by_id(&ContactId::from("1")).await.unwrap().is_none());
    }
}
