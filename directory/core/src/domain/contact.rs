// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Contact Aggregate
//!
//! A [`Contact`] is one tracked wallet: a validated [`WalletAddress`] plus the
//! annotations a user keeps about it (name, role, notes, tags, trust level).
//!
//! ## Invariants
//!
//! - `address` is `0x` followed by 40 lower-case hex characters. It is checked
//!   once, when the contact is created or loaded, and never again.
//! - `trust_level` is always in `[1, 10]`. [`TrustLevel`] clamps on every
//!   construction path instead of rejecting.
//! - `tags` never holds the same tag twice; insertion order is kept for display.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Role assigned when none is given at creation or edit time.
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Tags offered when tagging a contact, before any custom tag exists.
pub const PREDEFINED_TAGS: [&str; 17] = [
    "Developer",
    "Designer",
    "Client",
    "Partner",
    "Trusted Partner",
    "NFT Creator",
    "DeFi Protocol",
    "DAO Member",
    "Validator",
    "High Value",
    "Regular Client",
    "New Contact",
    "VIP",
    "Flagged",
    "Potential Scam",
    "Unverified",
    "Inactive",
];

static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("address pattern is a valid regex"));

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Wallet address is required")]
    EmptyAddress,

    #[error("Invalid wallet address '{0}': expected 0x followed by 40 hex characters")]
    InvalidAddress(String),
}

/// Opaque contact identifier. Freshly created contacts get a UUID v4 string;
/// seed data may use any unique string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case normalised EVM wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Validate `raw` against `^0x[a-fA-F0-9]{40}$` and lower-case it.
    /// Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, ContactError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContactError::EmptyAddress);
        }
        if !ADDRESS_PATTERN.is_match(trimmed) {
            return Err(ContactError::InvalidAddress(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x742d...5d2a` form used in listings.
    pub fn short(&self) -> String {
        let len = self.0.len();
        format!("{}...{}", &self.0[..6], &self.0[len - 4..])
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ContactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trust rating between 1 and 10 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct TrustLevel(u8);

impl TrustLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Level given to new contacts when the caller does not pick one.
    pub const DEFAULT: TrustLevel = TrustLevel(5);

    /// Build a level, clamping out-of-range input to `[1, 10]`.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn band(self) -> TrustBand {
        TrustBand::of(self)
    }
}

impl Default for TrustLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for TrustLevel {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<TrustLevel> for u8 {
    fn from(level: TrustLevel) -> Self {
        level.0
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-bucket display classification of a [`TrustLevel`].
///
/// 1–4 Low, 5–7 Medium, 8–10 High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustBand {
    Low,
    Medium,
    High,
}

impl TrustBand {
    pub fn of(level: TrustLevel) -> Self {
        match level.value() {
            8..=10 => TrustBand::High,
            5..=7 => TrustBand::Medium,
            _ => TrustBand::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrustBand::Low => "Low Trust",
            TrustBand::Medium => "Medium Trust",
            TrustBand::High => "High Trust",
        }
    }
}

impl fmt::Display for TrustBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered set of tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a tag, trimmed. Blank and already-present tags are ignored.
    /// Returns `true` when the set changed.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Rename `from` to `to` in place. When `to` is already present the two
    /// collapse into one entry.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        let to = to.trim();
        if from == to {
            return false;
        }
        let Some(pos) = self.0.iter().position(|t| t == from) else {
            return false;
        };
        if to.is_empty() || self.contains(to) {
            self.0.remove(pos);
        } else {
            self.0[pos] = to.to_string();
        }
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// `true` when at least one of `candidates` is in the set.
    pub fn contains_any<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().any(|candidate| self.contains(candidate))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<TagSet> for Vec<String> {
    fn from(set: TagSet) -> Self {
        set.0
    }
}

/// A tracked wallet and everything the user noted about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub address: WalletAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: TagSet,
    #[serde(default)]
    pub trust_level: TrustLevel,
    #[serde(default)]
    pub interaction_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl Contact {
    /// Validate a draft and build a new contact with a fresh id.
    ///
    /// `default_trust` is used when the draft carries no trust level.
    pub fn create(draft: NewContact, default_trust: TrustLevel) -> Result<Self, ContactError> {
        let address = WalletAddress::parse(&draft.address)?;

        Ok(Self {
            id: ContactId::new(),
            address,
            name: normalize_name(draft.name),
            role: Some(normalize_role(draft.role)),
            notes: draft.notes.map(|n| n.trim().to_string()).unwrap_or_default(),
            tags: draft.tags.into_iter().collect(),
            trust_level: draft.trust_level.unwrap_or(default_trust),
            interaction_count: 0,
            last_interaction: None,
        })
    }

    /// Apply an edit. Fields left as `None` in `update` are kept.
    pub fn apply_update(&mut self, update: ContactUpdate) {
        if let Some(name) = update.name {
            self.name = normalize_name(Some(name));
        }
        if let Some(role) = update.role {
            self.role = Some(normalize_role(Some(role)));
        }
        if let Some(notes) = update.notes {
            self.notes = notes.trim().to_string();
        }
        if let Some(tags) = update.tags {
            self.tags = tags.into_iter().collect();
        }
        if let Some(level) = update.trust_level {
            self.trust_level = level;
        }
    }

    /// Name when set, otherwise the shortened address.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.address.short(),
        }
    }

    pub fn role_or_unknown(&self) -> &str {
        self.role.as_deref().unwrap_or(UNKNOWN_ROLE)
    }
}

/// Input of the "add contact" operation. Raw, unvalidated user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub trust_level: Option<TrustLevel>,
}

impl NewContact {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }
}

/// Input of the "edit contact" operation.
///
/// A blank `name` clears it; a blank `role` resets it to `"Unknown"`.
/// `tags` replaces the whole tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub trust_level: Option<TrustLevel>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.role.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.trust_level.is_none()
    }
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

fn normalize_role(role: Option<String>) -> String {
    role.map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| UNKNOWN_ROLE.to_string())
}
