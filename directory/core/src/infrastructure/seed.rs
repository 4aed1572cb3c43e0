// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Contact seed data.
//!
//! A seed file is a YAML list of contacts. Addresses are validated while
//! deserializing, so one bad entry rejects the whole file.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::domain::contact::Contact;

const DEFAULT_SEED: &str = include_str!("../../templates/seed-contacts.yaml");

/// The embedded demo directory.
pub fn default_contacts() -> Result<Vec<Contact>> {
    parse_contacts(DEFAULT_SEED).context("Embedded contact seed is invalid")
}

pub fn load_contacts(path: impl AsRef<Path>) -> Result<Vec<Contact>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read contact seed {:?}", path))?;
    parse_contacts(&content).with_context(|| format!("Invalid contact seed {:?}", path))
}

/// Seed file at `path` when given, else the embedded demo directory.
pub fn load_or_default(path: Option<&Path>) -> Result<Vec<Contact>> {
    match path {
        Some(path) => {
            tracing::info!("Loading contacts from {:?}", path);
            load_contacts(path)
        }
        None => default_contacts(),
    }
}

pub fn parse_contacts(yaml: &str) -> Result<Vec<Contact>> {
    let contacts: Vec<Contact> = serde_yaml::from_str(yaml)?;

    let mut seen = HashSet::new();
    for contact in &contacts {
        if !seen.insert(&contact.id) {
            anyhow::bail!("Duplicate contact id '{}'", contact.id);
        }
    }
    Ok(contacts)
}
