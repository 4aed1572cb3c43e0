// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Tag, TagId, TagRepository};
use trustlist_core::domain::repository::RepositoryError;

#[derive(Clone, Default)]
pub struct InMemoryTagRepository {
    tags: Arc<RwLock<Vec<Tag>>>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self {
            tags: Arc::new(RwLock::new(tags)),
        }
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn save(&self, tag: &Tag) -> Result<(), RepositoryError> {
        let mut tags = self.tags.write();
        match tags.iter_mut().find(|t| t.id == tag.id) {
            Some(existing) => *existing = tag.clone(),
            None => tags.push(tag.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, RepositoryError> {
        Ok(self.tags.read().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError> {
        Ok(self.tags.read().iter().find(|t| t.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepositoryError> {
        Ok(self.tags.read().clone())
    }

    async fn delete_many(&self, ids: &HashSet<TagId>) -> Result<Vec<Tag>, RepositoryError> {
        let mut tags = self.tags.write();
        let (removed, kept): (Vec<Tag>, Vec<Tag>) =
            std::mem::take(&mut *tags).into_iter().partition(|t| ids.contains(&t.id));
        *tags = kept;
        Ok(removed)
    }
}
