// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::tag::{Tag, TagId};
use trustlist_core::domain::repository::RepositoryError;

/// Persistence contract for the tag catalog. Listing order is insertion order.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Insert, or replace the tag with the same id in place.
    async fn save(&self, tag: &Tag) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, RepositoryError>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Tag>, RepositoryError>;

    /// Delete every listed tag and return the removed ones.
    async fn delete_many(&self, ids: &HashSet<TagId>) -> Result<Vec<Tag>, RepositoryError>;
}
