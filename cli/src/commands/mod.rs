// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the TrustList CLI

pub mod config;
pub mod contact;
pub mod shell;
pub mod tag;

pub use self::config::ConfigCommand;
pub use self::contact::ContactCommand;
pub use self::tag::TagCommand;

use colored::{ColoredString, Colorize};
use trustlist_core::domain::contact::{TrustBand, TrustLevel};
use trustlist_core::domain::pagination::Page;

/// `9 High` style badge, colored by band.
pub(crate) fn trust_badge(level: TrustLevel) -> ColoredString {
    let text = format!("{:>2} {}", level.value(), short_band(level.band()));
    match level.band() {
        TrustBand::High => text.green(),
        TrustBand::Medium => text.yellow(),
        TrustBand::Low => text.red(),
    }
}

fn short_band(band: TrustBand) -> &'static str {
    match band {
        TrustBand::High => "High",
        TrustBand::Medium => "Med",
        TrustBand::Low => "Low",
    }
}

/// Cut `value` to `width` characters, marking the cut with `…`.
pub(crate) fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let kept: String = value.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

pub(crate) fn print_pager<T>(page: &Page<T>, noun: &str) {
    if page.total_items == 0 {
        return;
    }
    let mut footer = format!(
        "Page {} of {} ({} {})",
        page.page_number, page.total_pages, page.total_items, noun
    );
    if page.has_next() {
        footer.push_str(&format!(" · next: --page {}", page.page_number + 1));
    }
    println!("{}", footer.dimmed());
}
