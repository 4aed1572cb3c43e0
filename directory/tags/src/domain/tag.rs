// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Tag Catalog Aggregates
//!
//! - [`Tag`]: a named label with a description and a display-only trust modifier.
//! - [`TagId`]: unique identifier (UUID newtype).
//! - [`TrustModifier`]: value object clamped to `[-5, 5]`.
//! - [`TagSummary`]: a tag plus how many contacts currently carry it.
//!
//! Contacts reference tags by name, not by id. Usage counts are therefore
//! derived by scanning contacts, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use trustlist_core::domain::contact::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub Uuid);

impl TagId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TagId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trust adjustment attached to a tag, in `[-5, 5]`.
///
/// Shown next to the tag. It does not feed the suggested trust level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i8")]
pub struct TrustModifier(i8);

impl TrustModifier {
    pub const MIN: i8 = -5;
    pub const MAX: i8 = 5;

    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as i8)
    }

    pub fn value(self) -> i8 {
        self.0
    }

    pub fn polarity(self) -> ModifierPolarity {
        match self.0 {
            v if v > 0 => ModifierPolarity::Positive,
            v if v < 0 => ModifierPolarity::Negative,
            _ => ModifierPolarity::Neutral,
        }
    }
}

impl From<i64> for TrustModifier {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<TrustModifier> for i8 {
    fn from(modifier: TrustModifier) -> Self {
        modifier.0
    }
}

/// `+2`, `0`, `-3`.
impl fmt::Display for TrustModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierPolarity {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Tag name is required")]
    EmptyName,

    #[error("A tag named '{0}' already exists")]
    DuplicateName(String),

    #[error("Tag not found: {0}")]
    NotFound(String),
}

/// Aggregate root of the tag catalog.
///
/// # Invariants
///
/// - `name` is trimmed and non-empty.
/// - Names are unique within a catalog (exact, case-sensitive), enforced by the
///   catalog service since a single tag cannot see its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: TagId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trust_modifier: TrustModifier,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn create(draft: TagDraft) -> Result<Self, TagError> {
        let draft = draft.normalized()?;
        Ok(Self {
            id: TagId::new(),
            name: draft.name,
            description: draft.description,
            trust_modifier: draft.trust_modifier,
            created_at: Utc::now(),
        })
    }

    /// Replace name, description and modifier. Id and creation time are kept.
    pub fn apply_edit(&mut self, draft: TagDraft) -> Result<(), TagError> {
        let draft = draft.normalized()?;
        self.name = draft.name;
        self.description = draft.description;
        self.trust_modifier = draft.trust_modifier;
        Ok(())
    }

    /// Case-insensitive substring match over name and description. A blank
    /// term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.description.to_lowercase().contains(&needle)
    }
}

/// Raw create/edit input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trust_modifier: TrustModifier,
}

impl TagDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_modifier(mut self, modifier: i64) -> Self {
        self.trust_modifier = TrustModifier::new(modifier);
        self
    }

    fn normalized(self) -> Result<Self, TagError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(TagError::EmptyName);
        }
        Ok(Self {
            name,
            description: self.description.trim().to_string(),
            trust_modifier: self.trust_modifier,
        })
    }
}

/// A tag together with its current usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSummary {
    pub tag: Tag,
    pub usage_count: usize,
}

/// Number of contacts carrying a tag named `name`.
pub fn usage_count(name: &str, contacts: &[Contact]) -> usize {
    contacts.iter().filter(|c| c.tags.contains(name)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_clamps_and_displays() {
        assert_eq!(TrustModifier::new(9).value(), 5);
        assert_eq!(TrustModifier::new(-9).value(), -5);
        assert_eq!(TrustModifier::new(2).to_string(), "+2");
        assert_eq!(TrustModifier::new(0).to_string(), "0");
        assert_eq!(TrustModifier::new(-3).to_string(), "-3");
    }

    #[test]
    fn test_modifier_polarity() {
        assert_eq!(TrustModifier::new(1).polarity(), ModifierPolarity::Positive);
        assert_eq!(TrustModifier::new(0).polarity(), ModifierPolarity::Neutral);
        assert_eq!(TrustModifier::new(-1).polarity(), ModifierPolarity::Negative);
    }

    #[test]
    fn test_create_requires_name() {
        assert_eq!(Tag::create(TagDraft::new("   ")).unwrap_err(), TagError::EmptyName);
        let tag = Tag::create(TagDraft::new(" Auditor ").with_description(" Code reviewers ")).unwrap();
        assert_eq!(tag.name, "Auditor");
        assert_eq!(tag.description, "Code reviewers");
        assert_eq!(tag.trust_modifier.value(), 0);
    }

    #[test]
    fn test_apply_edit_keeps_identity() {
        let mut tag = Tag::create(TagDraft::new("Auditor")).unwrap();
        let (id, created_at) = (tag.id, tag.created_at);

        tag.apply_edit(TagDraft::new("Security Auditor").with_modifier(3)).unwrap();
        assert_eq!(tag.id, id);
        assert_eq!(tag.created_at, created_at);
        assert_eq!(tag.name, "Security Auditor");
        assert_eq!(tag.trust_modifier.value(), 3);

        assert!(tag.apply_edit(TagDraft::new("")).is_err());
        assert_eq!(tag.name, "Security Auditor");
    }

    #[test]
    fn test_search_covers_description() {
        let tag = Tag::create(TagDraft::new("Exchange").with_description("Cryptocurrency exchange addresses")).unwrap();
        assert!(tag.matches_search("CRYPTO"));
        assert!(tag.matches_search("exch"));
        assert!(tag.matches_search("  "));
        assert!(!tag.matches_search("defi"));
    }

    #[test]
    fn test_yaml_defaults() {
        let tag: Tag = serde_yaml::from_str("name: Client\ntrust_modifier: 12\n").unwrap();
        assert_eq!(tag.name, "Client");
        assert_eq!(tag.trust_modifier.value(), 5);
        assert!(tag.description.is_empty());
    }

    #[test]
    fn test_summary_json_shape() {
        let tag = Tag::create(TagDraft::new("Flagged").with_modifier(-3)).unwrap();
        let summary = TagSummary { tag, usage_count: 2 };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["tag"]["name"], "Flagged");
        assert_eq!(value["tag"]["trust_modifier"], -3);
        assert_eq!(value["usage_count"], 2);
    }
}
