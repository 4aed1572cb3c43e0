// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Tag catalog seed data: a YAML list of tags. Ids are generated when absent.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::domain::Tag;

const DEFAULT_SEED: &str = include_str!("../../templates/seed-tags.yaml");

pub fn default_tags() -> Result<Vec<Tag>> {
    parse_tags(DEFAULT_SEED).context("Embedded tag seed is invalid")
}

pub fn load_tags(path: impl AsRef<Path>) -> Result<Vec<Tag>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read tag seed {:?}", path))?;
    parse_tags(&content).with_context(|| format!("Invalid tag seed {:?}", path))
}

pub fn load_or_default(path: Option<&Path>) -> Result<Vec<Tag>> {
    match path {
        Some(path) => {
            tracing::info!("Loading tags from {:?}", path);
            load_tags(path)
        }
        None => default_tags(),
    }
}

pub fn parse_tags(yaml: &str) -> Result<Vec<Tag>> {
    let mut tags: Vec<Tag> = serde_yaml::from_str(yaml)?;

    let mut seen = HashSet::new();
    for tag in tags.iter_mut() {
        tag.name = tag.name.trim().to_string();
        if tag.name.is_empty() {
            anyhow::bail!("Tag name cannot be empty");
        }
        if !seen.insert(tag.name.clone()) {
            anyhow::bail!("Duplicate tag name '{}'", tag.name);
        }
    }
    Ok(tags)
}
