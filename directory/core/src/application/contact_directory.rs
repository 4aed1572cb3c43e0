// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::contact::{Contact, ContactId, ContactUpdate, NewContact, TrustLevel};
use crate::domain::directory_config::DirectoryConfig;
use crate::domain::events::{DirectoryEvent, TrustUpdateReason};
use crate::domain::pagination::{Page, DEFAULT_PAGE_SIZE};
use crate::domain::query::{self, ContactQuery};
use crate::domain::repository::{ContactRepository, ContactRevision, RepositoryError};
use crate::domain::trust::{TrustScoreEstimator, TrustSuggestion};
use crate::infrastructure::event_bus::EventBus;

/// Use cases over the contact directory.
#[async_trait]
pub trait ContactDirectoryService: Send + Sync {
    async fn add_contact(&self, draft: NewContact) -> Result<Contact>;
    async fn update_contact(&self, id: &ContactId, update: ContactUpdate) -> Result<Contact>;
    async fn delete_contact(&self, id: &ContactId) -> Result<()>;
    async fn get_contact(&self, id: &ContactId) -> Result<Contact>;
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Contacts matching `query`, in directory order.
    async fn search(&self, query: &ContactQuery) -> Result<Vec<Contact>>;

    /// One page (1-indexed) of the contacts matching `query`.
    async fn list_page(&self, query: &ContactQuery, page_number: usize) -> Result<Page<Contact>>;

    /// Predefined tags followed by custom tags in use.
    async fn available_tags(&self) -> Result<Vec<String>>;

    /// Tags in use, sorted for filter panels.
    async fn used_tags(&self) -> Result<Vec<String>>;

    async fn suggest_trust(&self, id: &ContactId) -> Result<TrustSuggestion>;

    /// Overwrite the contact's trust level with its suggestion.
    async fn apply_suggestion(&self, id: &ContactId) -> Result<TrustLevel>;

    /// Returns how many contacts were updated. Unknown ids are skipped.
    async fn bulk_set_trust_level(&self, ids: &HashSet<ContactId>, level: TrustLevel) -> Result<usize>;

    /// Returns how many contacts were deleted. Unknown ids are skipped.
    async fn bulk_delete(&self, ids: &HashSet<ContactId>) -> Result<usize>;

    fn page_size(&self) -> usize;
}

pub struct StandardContactDirectoryService {
    repository: Arc<dyn ContactRepository>,
    event_bus: Arc<EventBus>,
    estimator: TrustScoreEstimator,
    page_size: usize,
    default_trust_level: TrustLevel,
}

impl StandardContactDirectoryService {
    pub fn new(repository: Arc<dyn ContactRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            repository,
            event_bus,
            estimator: TrustScoreEstimator::new(),
            page_size: DEFAULT_PAGE_SIZE,
            default_trust_level: TrustLevel::DEFAULT,
        }
    }

    /// Listing and creation defaults taken from `config.spec.listing`.
    pub fn from_config(
        repository: Arc<dyn ContactRepository>,
        event_bus: Arc<EventBus>,
        config: &DirectoryConfig,
    ) -> Self {
        Self::new(repository, event_bus)
            .with_page_size(config.spec.listing.page_size)
            .with_default_trust_level(config.spec.listing.default_trust())
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_default_trust_level(mut self, level: TrustLevel) -> Self {
        self.default_trust_level = level;
        self
    }

    async fn require(&self, id: &ContactId) -> Result<Contact> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    fn not_found(id: &ContactId) -> anyhow::Error {
        RepositoryError::NotFound(format!("contact {}", id)).into()
    }

    fn publish_trust_update(&self, ids: Vec<ContactId>, level: TrustLevel, reason: TrustUpdateReason) {
        metrics::counter!("trustlist_trust_updates_total").increment(ids.len() as u64);
        self.event_bus.publish(DirectoryEvent::TrustLevelsUpdated {
            contact_ids: ids,
            trust_level: level,
            reason,
            updated_at: Utc::now(),
        });
    }
}

#[async_trait]
impl ContactDirectoryService for StandardContactDirectoryService {
    async fn add_contact(&self, draft: NewContact) -> Result<Contact> {
        let contact = Contact::create(draft, self.default_trust_level)?;
        self.repository
            .save(&contact)
            .await
            .context("Failed to save new contact")?;

        info!(contact_id = %contact.id, address = %contact.address, "Contact added");
        metrics::counter!("trustlist_contacts_added_total").increment(1);
        self.event_bus.publish(DirectoryEvent::ContactAdded {
            contact_id: contact.id.clone(),
            address: contact.address.clone(),
            added_at: Utc::now(),
        });
        Ok(contact)
    }

    async fn update_contact(&self, id: &ContactId, update: ContactUpdate) -> Result<Contact> {
        if update.is_empty() {
            debug!(contact_id = %id, "Empty update, nothing to do");
            return self.require(id).await;
        }

        let ContactRevision { previous, current: contact } = self
            .repository
            .modify(id, Box::new(move |contact: &mut Contact| contact.apply_update(update)))
            .await
            .with_context(|| format!("Failed to update contact {}", id))?
            .ok_or_else(|| Self::not_found(id))?;

        info!(contact_id = %id, "Contact updated");
        self.event_bus.publish(DirectoryEvent::ContactUpdated {
            contact_id: id.clone(),
            updated_at: Utc::now(),
        });
        if contact.trust_level != previous.trust_level {
            self.publish_trust_update(vec![id.clone()], contact.trust_level, TrustUpdateReason::Manual);
        }
        Ok(contact)
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(Self::not_found(id));
        }

        info!(contact_id = %id, "Contact deleted");
        metrics::counter!("trustlist_contacts_deleted_total").increment(1);
        self.event_bus.publish(DirectoryEvent::ContactsDeleted {
            contact_ids: vec![id.clone()],
            deleted_at: Utc::now(),
        });
        Ok(())
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        self.require(id).await
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        self.repository
            .list_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list contacts: {}", e))
    }

    async fn search(&self, query: &ContactQuery) -> Result<Vec<Contact>> {
        let contacts = self.list_contacts().await?;
        let matched: Vec<Contact> = query::filter(&contacts, query).into_iter().cloned().collect();
        debug!(total = contacts.len(), matched = matched.len(), "Contact search");
        Ok(matched)
    }

    async fn list_page(&self, query: &ContactQuery, page_number: usize) -> Result<Page<Contact>> {
        let matched = self.search(query).await?;
        Ok(Page::from_slice(&matched, self.page_size, page_number))
    }

    async fn available_tags(&self) -> Result<Vec<String>> {
        let contacts = self.list_contacts().await?;
        Ok(query::available_tags(&contacts))
    }

    async fn used_tags(&self) -> Result<Vec<String>> {
        let contacts = self.list_contacts().await?;
        Ok(query::sorted_tags(&contacts))
    }

    async fn suggest_trust(&self, id: &ContactId) -> Result<TrustSuggestion> {
        let contact = self.require(id).await?;
        Ok(self.estimator.explain(&contact))
    }

    async fn apply_suggestion(&self, id: &ContactId) -> Result<TrustLevel> {
        let estimator = self.estimator;
        let revision = self
            .repository
            .modify(
                id,
                Box::new(move |contact: &mut Contact| contact.trust_level = estimator.suggest(contact)),
            )
            .await
            .with_context(|| format!("Failed to apply suggestion to contact {}", id))?
            .ok_or_else(|| Self::not_found(id))?;
        let level = revision.current.trust_level;

        info!(contact_id = %id, trust_level = %level, "Suggested trust level applied");
        self.publish_trust_update(vec![id.clone()], level, TrustUpdateReason::Suggestion);
        Ok(level)
    }

    async fn bulk_set_trust_level(&self, ids: &HashSet<ContactId>, level: TrustLevel) -> Result<usize> {
        let matched = self
            .repository
            .set_trust_levels(ids, level)
            .await
            .context("Failed to apply bulk trust level")?;
        let updated = matched.len();

        info!(requested = ids.len(), updated, trust_level = %level, "Bulk trust level applied");
        if updated > 0 {
            self.publish_trust_update(matched, level, TrustUpdateReason::Bulk);
        }
        Ok(updated)
    }

    async fn bulk_delete(&self, ids: &HashSet<ContactId>) -> Result<usize> {
        let matched = self
            .repository
            .delete_many(ids)
            .await
            .context("Failed to apply bulk delete")?;
        let removed = matched.len();

        info!(requested = ids.len(), removed, "Bulk delete applied");
        if removed > 0 {
            metrics::counter!("trustlist_contacts_deleted_total").increment(removed as u64);
            self.event_bus.publish(DirectoryEvent::ContactsDeleted {
                contact_ids: matched,
                deleted_at: Utc::now(),
            });
        }
        Ok(removed)
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
