// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Directory Domain Layer
//!
//! Pure domain types and functions. No I/O.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`contact`] | `Contact`, `ContactId`, `WalletAddress`, `TrustLevel`, `TagSet` |
//! | [`query`] | `ContactQuery`, `filter`, `distinct_tags` |
//! | [`pagination`] | `paginate`, `total_pages`, `Page` |
//! | [`trust`] | `TrustScoreEstimator`, `TrustSuggestion` |
//! | [`bulk`] | `bulk_set_trust_level`, `bulk_delete` |
//! | [`session`] | `WalletSession` |
//! | [`events`] | `DirectoryEvent` |
//! | [`repository`] | `ContactRepository`, `RepositoryError` |
//! | [`directory_config`] | `DirectoryConfig` manifest |

pub mod contact;
pub mod query;
pub mod pagination;
pub mod trust;
pub mod bulk;
pub mod session;
pub mod events;
pub mod repository;
pub mod directory_config;

pub use contact::*;
pub use query::*;
pub use pagination::*;
pub use trust::*;
pub use bulk::*;
pub use session::*;
pub use events::*;
pub use repository::*;
