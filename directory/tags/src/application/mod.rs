// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Tag catalog use cases.
//!
//! Tags are addressed by name from the outside; ids stay internal to the
//! catalog.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{usage_count, Tag, TagDraft, TagError, TagId, TagRepository, TagSummary};
use trustlist_core::domain::events::DirectoryEvent;
use trustlist_core::domain::pagination::{Page, DEFAULT_PAGE_SIZE};
use trustlist_core::domain::repository::ContactRepository;
use trustlist_core::infrastructure::event_bus::EventBus;

#[async_trait]
pub trait TagCatalogService: Send + Sync {
    /// Tags whose name or description contains `search` (case-insensitive),
    /// with usage counts, in catalog order.
    async fn list_tags(&self, search: &str) -> Result<Vec<TagSummary>>;

    async fn list_page(&self, search: &str, page_number: usize) -> Result<Page<TagSummary>>;

    async fn get_tag(&self, name: &str) -> Result<TagSummary>;

    async fn create_tag(&self, draft: TagDraft) -> Result<Tag>;

    /// Edit the tag called `name`. A rename is applied to every contact
    /// carrying the old name.
    async fn update_tag(&self, name: &str, draft: TagDraft) -> Result<Tag>;

    async fn delete_tag(&self, name: &str) -> Result<()>;

    /// Delete every named tag. Unknown names are skipped. Returns how many
    /// tags were removed.
    async fn delete_tags(&self, names: &[String]) -> Result<usize>;

    fn page_size(&self) -> usize;
}

pub struct StandardTagCatalogService {
    tags: Arc<dyn TagRepository>,
    contacts: Arc<dyn ContactRepository>,
    event_bus: Arc<EventBus>,
    page_size: usize,
}

impl StandardTagCatalogService {
    pub fn new(
        tags: Arc<dyn TagRepository>,
        contacts: Arc<dyn ContactRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            tags,
            contacts,
            event_bus,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    async fn require(&self, name: &str) -> Result<Tag> {
        self.tags
            .find_by_name(name.trim())
            .await?
            .ok_or_else(|| TagError::NotFound(name.trim().to_string()).into())
    }

    async fn ensure_unique(&self, name: &str, except: Option<TagId>) -> Result<()> {
        if let Some(existing) = self.tags.find_by_name(name).await? {
            if Some(existing.id) != except {
                return Err(TagError::DuplicateName(name.to_string()).into());
            }
        }
        Ok(())
    }

    async fn rename_on_contacts(&self, from: &str, to: &str) -> Result<usize> {
        self.contacts
            .rename_tag(from, to)
            .await
            .context("Failed to rename tag on contacts")
    }
}

#[async_trait]
impl TagCatalogService for StandardTagCatalogService {
    async fn list_tags(&self, search: &str) -> Result<Vec<TagSummary>> {
        let tags = self.tags.list_all().await?;
        let contacts = self.contacts.list_all().await?;

        let summaries: Vec<TagSummary> = tags
            .into_iter()
            .filter(|tag| tag.matches_search(search))
            .map(|tag| {
                let usage_count = usage_count(&tag.name, &contacts);
                TagSummary { tag, usage_count }
            })
            .collect();
        debug!(matched = summaries.len(), "Tag search");
        Ok(summaries)
    }

    async fn list_page(&self, search: &str, page_number: usize) -> Result<Page<TagSummary>> {
        let summaries = self.list_tags(search).await?;
        Ok(Page::from_slice(&summaries, self.page_size, page_number))
    }

    async fn get_tag(&self, name: &str) -> Result<TagSummary> {
        let tag = self.require(name).await?;
        let contacts = self.contacts.list_all().await?;
        let usage_count = usage_count(&tag.name, &contacts);
        Ok(TagSummary { tag, usage_count })
    }

    async fn create_tag(&self, draft: TagDraft) -> Result<Tag> {
        let tag = Tag::create(draft)?;
        self.ensure_unique(&tag.name, None).await?;
        self.tags.save(&tag).await.context("Failed to save tag")?;

        info!(tag = %tag.name, modifier = %tag.trust_modifier, "Tag created");
        metrics::counter!("trustlist_tags_created_total").increment(1);
        self.event_bus.publish(DirectoryEvent::TagCreated {
            tag_id: tag.id.0,
            name: tag.name.clone(),
            created_at: Utc::now(),
        });
        Ok(tag)
    }

    async fn update_tag(&self, name: &str, draft: TagDraft) -> Result<Tag> {
        let mut tag = self.require(name).await?;
        let old_name = tag.name.clone();
        tag.apply_edit(draft)?;
        self.ensure_unique(&tag.name, Some(tag.id)).await?;

        // Contacts first: if that fails the catalog still holds the old name.
        let renamed = if tag.name != old_name {
            Some(self.rename_on_contacts(&old_name, &tag.name).await?)
        } else {
            None
        };

        if let Err(e) = self.tags.save(&tag).await {
            if renamed.is_some_and(|count| count > 0) {
                if let Err(revert) = self.contacts.rename_tag(&tag.name, &old_name).await {
                    warn!(from = %tag.name, to = %old_name, error = %revert, "Failed to revert contact tags");
                }
            }
            return Err(anyhow::Error::new(e).context("Failed to save tag"));
        }

        match renamed {
            Some(contacts) => info!(from = %old_name, to = %tag.name, contacts, "Tag renamed"),
            None => info!(tag = %tag.name, "Tag updated"),
        }
        self.event_bus.publish(DirectoryEvent::TagUpdated {
            tag_id: tag.id.0,
            name: tag.name.clone(),
            updated_at: Utc::now(),
        });
        Ok(tag)
    }

    async fn delete_tag(&self, name: &str) -> Result<()> {
        let tag = self.require(name).await?;
        self.delete_tags(&[tag.name]).await?;
        Ok(())
    }

    async fn delete_tags(&self, names: &[String]) -> Result<usize> {
        let wanted: HashSet<&str> = names.iter().map(|n| n.trim()).collect();
        let ids: HashSet<TagId> = self
            .tags
            .list_all()
            .await?
            .into_iter()
            .filter(|tag| wanted.contains(tag.name.as_str()))
            .map(|tag| tag.id)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let removed = self.tags.delete_many(&ids).await.context("Failed to delete tags")?;
        info!(requested = names.len(), removed = removed.len(), "Tags deleted");
        self.event_bus.publish(DirectoryEvent::TagsDeleted {
            names: removed.iter().map(|t| t.name.clone()).collect(),
            deleted_at: Utc::now(),
        });
        Ok(removed.len())
    }

    fn page_size(&self) -> usize {
        self.page_size
    }
}
