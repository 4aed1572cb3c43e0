// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Contact Repository Interface
//!
//! Persistence contract for the contact collection. The interface lives in the
//! domain layer; the in-memory implementation lives in
//! `crate::infrastructure::repositories`.
//!
//! Listing order is insertion order. Every mutation, including the
//! read-modify-write ones (`modify`, `rename_tag`), runs under a single write
//! of the collection, so readers never see a half-applied update and
//! concurrent writers never overwrite each other with a stale copy.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::contact::{Contact, ContactId, TrustLevel};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert, or replace the contact with the same id in place.
    async fn save(&self, contact: &Contact) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, RepositoryError>;

    /// All contacts in insertion order.
    async fn list_all(&self) -> Result<Vec<Contact>, RepositoryError>;

    /// Swap the whole collection.
    async fn replace_all(&self, contacts: Vec<Contact>) -> Result<(), RepositoryError>;

    /// Delete one contact. Returns `false` when the id was unknown.
    async fn delete(&self, id: &ContactId) -> Result<bool, RepositoryError>;

    /// Apply `mutation` to the contact with `id` in place. Returns `None`
    /// when the id was unknown.
    async fn modify(
        &self,
        id: &ContactId,
        mutation: ContactMutation,
    ) -> Result<Option<ContactRevision>, RepositoryError>;

    /// Rename tag `from` to `to` on every contact carrying it. Returns how
    /// many contacts changed.
    async fn rename_tag(&self, from: &str, to: &str) -> Result<usize, RepositoryError>;

    /// Set `level` on every listed contact. Returns the ids that matched, in
    /// directory order.
    async fn set_trust_levels(
        &self,
        ids: &HashSet<ContactId>,
        level: TrustLevel,
    ) -> Result<Vec<ContactId>, RepositoryError>;

    /// Delete every listed contact. Returns the ids that were removed, in
    /// directory order.
    async fn delete_many(&self, ids: &HashSet<ContactId>) -> Result<Vec<ContactId>, RepositoryError>;
}

/// In-place edit applied by [`ContactRepository::modify`].
pub type ContactMutation = Box<dyn FnOnce(&mut Contact) + Send>;

/// A contact before and after a [`ContactRepository::modify`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRevision {
    pub previous: Contact,
    pub current: Contact,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
