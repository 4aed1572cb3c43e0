// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-process directory
//!
//! Loads configuration and seed data, then wires repositories, services and
//! the event bus together. Every command runs against one of these; nothing
//! is written back to disk.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use trustlist_core::{
    application::{ContactDirectoryService, StandardContactDirectoryService},
    domain::directory_config::DirectoryConfig,
    infrastructure::{event_bus::EventBus, repositories::InMemoryContactRepository, seed},
};
use trustlist_tags::{
    application::{StandardTagCatalogService, TagCatalogService},
    infrastructure::{seed as tag_seed, InMemoryTagRepository},
};

pub struct Directory {
    pub config: DirectoryConfig,
    pub contacts: Arc<dyn ContactDirectoryService>,
    pub tags: Arc<dyn TagCatalogService>,
    pub event_bus: Arc<EventBus>,
}

impl Directory {
    /// Discover configuration (or use `config_path`), validate it and load seeds.
    pub fn bootstrap(config_path: Option<PathBuf>) -> Result<Self> {
        let config = DirectoryConfig::load_or_default(config_path).context("Failed to load configuration")?;
        Self::from_config(config)
    }

    pub fn from_config(config: DirectoryConfig) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let contacts = seed::load_or_default(config.spec.seed.contacts.as_deref())
            .context("Failed to load contacts")?;
        let tags = tag_seed::load_or_default(config.spec.seed.tags.as_deref()).context("Failed to load tags")?;
        tracing::debug!(contacts = contacts.len(), tags = tags.len(), "Directory seeded");

        let event_bus = Arc::new(EventBus::with_default_capacity());
        let contact_repo = Arc::new(InMemoryContactRepository::with_contacts(contacts));
        let tag_repo = Arc::new(InMemoryTagRepository::with_tags(tags));

        let contact_service = StandardContactDirectoryService::from_config(
            contact_repo.clone(),
            event_bus.clone(),
            &config,
        );
        let tag_service = StandardTagCatalogService::new(tag_repo, contact_repo, event_bus.clone())
            .with_page_size(config.spec.listing.page_size);

        Ok(Self {
            config,
            contacts: Arc::new(contact_service),
            tags: Arc::new(tag_service),
            event_bus,
        })
    }
}
