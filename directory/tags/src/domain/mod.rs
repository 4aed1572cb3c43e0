// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod tag;
pub mod repository;

pub use tag::*;
pub use repository::TagRepository;
