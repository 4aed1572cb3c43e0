// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # trustlist-core: Wallet Directory Core
//!
//! Domain model, query engine and trust heuristics for a personal directory of
//! wallet addresses ("contacts").
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `Contact`, `ContactQuery`, `TrustScoreEstimator`, pagination, bulk mutations |
//! | [`application`] | Application | `ContactDirectoryService` use cases |
//! | [`infrastructure`] | Infrastructure | In-memory repository, event bus, seed loading |
//!
//! Everything under [`domain`] is synchronous and side-effect free. The
//! application layer wraps it behind async services so hosts can swap the
//! in-memory repository for something else later.

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
