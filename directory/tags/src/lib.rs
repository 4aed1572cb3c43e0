// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # trustlist-tags: Tag Catalog
//!
//! Named labels with descriptions and trust modifiers, managed separately from
//! the contacts that carry them.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `Tag`, `TagId`, `TrustModifier`, `TagRepository` |
//! | [`application`] | Application | `TagCatalogService` use cases |
//! | [`infrastructure`] | Infrastructure | In-memory repository, seed loading |
//!
//! Contacts hold tag names as plain strings. Renaming a tag rewrites those
//! names on every contact; deleting a tag leaves contacts untouched.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
