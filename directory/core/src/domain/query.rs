// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Contact Query Engine
//!
//! Combines the three listing filters into one predicate:
//!
//! | Dimension | Empty means | Otherwise |
//! |-----------|-------------|-----------|
//! | search term | no constraint | case-insensitive substring of address, name, role or any tag |
//! | selected tags | no constraint | contact has **at least one** selected tag |
//! | minimum trust | no constraint | `trust_level >= min` |
//!
//! Dimensions are AND-ed. [`filter`] is stable: output order is input order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::contact::{Contact, TrustLevel, PREDEFINED_TAGS};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactQuery {
    /// Free-text term. Trimmed before use, so whitespace-only means "no term".
    #[serde(default)]
    pub search_term: String,

    /// Tags to match, OR-combined.
    #[serde(default)]
    pub selected_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_trust_level: Option<TrustLevel>,
}

impl ContactQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.selected_tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_min_trust_level(mut self, level: TrustLevel) -> Self {
        self.min_trust_level = Some(level);
        self
    }

    /// Toggle a tag in the selection, the way a filter chip behaves.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    /// Drop tag and trust filters. The search term is kept.
    pub fn clear_filters(&mut self) {
        self.selected_tags.clear();
        self.min_trust_level = None;
    }

    pub fn has_active_filters(&self) -> bool {
        !self.selected_tags.is_empty() || self.min_trust_level.is_some()
    }

    /// `true` when no dimension constrains the result.
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && !self.has_active_filters()
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        Matcher::new(self).matches(contact)
    }
}

/// Query with the search needle lower-cased once.
struct Matcher<'q> {
    needle: Option<String>,
    query: &'q ContactQuery,
}

impl<'q> Matcher<'q> {
    fn new(query: &'q ContactQuery) -> Self {
        let term = query.search_term.trim();
        let needle = (!term.is_empty()).then(|| term.to_lowercase());
        Self { needle, query }
    }

    fn matches(&self, contact: &Contact) -> bool {
        self.matches_search(contact) && self.matches_tags(contact) && self.matches_trust(contact)
    }

    fn matches_search(&self, contact: &Contact) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        let hit = |field: &str| field.to_lowercase().contains(needle.as_str());

        hit(contact.address.as_str())
            || hit(contact.name.as_deref().unwrap_or_default())
            || hit(contact.role.as_deref().unwrap_or_default())
            || contact.tags.iter().any(hit)
    }

    fn matches_tags(&self, contact: &Contact) -> bool {
        self.query.selected_tags.is_empty()
            || contact
                .tags
                .contains_any(self.query.selected_tags.iter().map(String::as_str))
    }

    fn matches_trust(&self, contact: &Contact) -> bool {
        match self.query.min_trust_level {
            Some(min) => contact.trust_level >= min,
            None => true,
        }
    }
}

/// Contacts matching `query`, in input order.
pub fn filter<'a>(contacts: &'a [Contact], query: &ContactQuery) -> Vec<&'a Contact> {
    let matcher = Matcher::new(query);
    contacts.iter().filter(|c| matcher.matches(c)).collect()
}

/// Every tag used by at least one contact, in first-seen order.
pub fn distinct_tags(contacts: &[Contact]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for tag in contacts.iter().flat_map(|c| c.tags.iter()) {
        if seen.insert(tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// [`distinct_tags`] sorted alphabetically, for filter panels.
pub fn sorted_tags(contacts: &[Contact]) -> Vec<String> {
    let mut tags = distinct_tags(contacts);
    tags.sort();
    tags
}

/// Predefined vocabulary followed by any custom tag already in use.
pub fn available_tags(contacts: &[Contact]) -> Vec<String> {
    let mut tags: Vec<String> = PREDEFINED_TAGS.iter().map(|t| t.to_string()).collect();
    for tag in distinct_tags(contacts) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
