// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Suggested Trust Level
//!
//! Heuristic recommendation shown next to the manually set trust level:
//!
//! ```text
//! base     = min(interaction_count * 0.5, 5.0)
//! adjusted = base + 2 (any positive tag) - 3 (any negative tag)
//! level    = round_half_up(adjusted), clamped to [1, 10]
//! ```
//!
//! The tag adjustments are flat: two positive tags still add only `+2`.
//! Tag trust modifiers from the tag catalog are not part of this formula.

use serde::{Deserialize, Serialize};

use crate::domain::contact::{Contact, TrustLevel};

pub const POSITIVE_TRUST_TAGS: [&str; 4] = ["Trusted Partner", "Developer", "Client", "High Value"];
pub const NEGATIVE_TRUST_TAGS: [&str; 3] = ["Flagged", "Potential Scam", "Unverified"];

const POINTS_PER_INTERACTION: f64 = 0.5;
const INTERACTION_CAP: f64 = 5.0;
const POSITIVE_BONUS: f64 = 2.0;
const NEGATIVE_PENALTY: f64 = 3.0;

/// Breakdown of one suggestion, for detail views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustSuggestion {
    /// Interaction-derived score, capped at 5.
    pub base: f64,
    pub positive_bonus: bool,
    pub negative_penalty: bool,
    /// Score before rounding and clamping.
    pub adjusted: f64,
    pub level: TrustLevel,
}

impl TrustSuggestion {
    /// `true` when the suggestion differs from what the contact has now.
    pub fn differs_from(&self, current: TrustLevel) -> bool {
        self.level != current
    }
}

/// Stateless estimator. Same input, same output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustScoreEstimator;

impl TrustScoreEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn suggest(&self, contact: &Contact) -> TrustLevel {
        self.explain(contact).level
    }

    pub fn explain(&self, contact: &Contact) -> TrustSuggestion {
        let base = (f64::from(contact.interaction_count) * POINTS_PER_INTERACTION).min(INTERACTION_CAP);
        let positive_bonus = contact.tags.contains_any(POSITIVE_TRUST_TAGS);
        let negative_penalty = contact.tags.contains_any(NEGATIVE_TRUST_TAGS);

        let mut adjusted = base;
        if positive_bonus {
            adjusted += POSITIVE_BONUS;
        }
        if negative_penalty {
            adjusted -= NEGATIVE_PENALTY;
        }

        TrustSuggestion {
            base,
            positive_bonus,
            negative_penalty,
            adjusted,
            level: TrustLevel::new(round_half_up(adjusted)),
        }
    }
}

/// Shorthand for `TrustScoreEstimator::new().suggest(contact)`.
pub fn suggest(contact: &Contact) -> TrustLevel {
    TrustScoreEstimator::new().suggest(contact)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::{ContactId, TagSet, WalletAddress};

    fn contact(interactions: u32, tags: &[&str]) -> Contact {
        Contact {
            id: ContactId::from("c"),
            address: WalletAddress::parse("0x742d35Cc6634C0532925a3b8D5c8c50B7C3a5d2A").unwrap(),
            name: None,
            role: None,
            notes: String::new(),
            tags: tags.iter().copied().collect::<TagSet>(),
            trust_level: TrustLevel::DEFAULT,
            interaction_count: interactions,
            last_interaction: None,
        }
    }

    #[test]
    fn test_ten_interactions_no_tags() {
        assert_eq!(suggest(&contact(10, &[])).value(), 5);
    }

    #[test]
    fn test_flagged_new_contact_clamps_to_one() {
        let s = TrustScoreEstimator::new().explain(&contact(0, &["Flagged"]));
        assert_eq!(s.adjusted, -3.0);
        assert_eq!(s.level.value(), 1);
    }

    #[test]
    fn test_positive_bonus_is_flat() {
        let s = TrustScoreEstimator::new().explain(&contact(4, &["Developer", "Client"]));
        assert_eq!(s.base, 2.0);
        assert!(s.positive_bonus);
        assert_eq!(s.level.value(), 4);
    }

    #[test]
    fn test_brand_new_contact_is_one() {
        assert_eq!(suggest(&contact(0, &[])).value(), 1);
    }

    #[test]
    fn test_base_is_capped() {
        assert_eq!(suggest(&contact(1_000, &[])).value(), 5);
        assert_eq!(suggest(&contact(1_000, &["Trusted Partner"])).value(), 7);
    }

    #[test]
    fn test_mixed_tags_apply_both() {
        let s = TrustScoreEstimator::new().explain(&contact(15, &["Client", "Unverified"]));
        assert!(s.positive_bonus && s.negative_penalty);
        assert_eq!(s.adjusted, 4.0);
        assert_eq!(s.level.value(), 4);
    }

    #[test]
    fn test_half_rounds_up() {
        // 5 interactions -> 2.5 -> 3
        assert_eq!(suggest(&contact(5, &[])).value(), 3);
        // 3 interactions + positive -> 3.5 -> 4
        assert_eq!(suggest(&contact(3, &["High Value"])).value(), 4);
    }

    #[test]
    fn test_unrelated_tags_do_not_count() {
        assert_eq!(suggest(&contact(10, &["VIP", "Designer"])).value(), 5);
    }

    #[test]
    fn test_differs_from() {
        let s = TrustScoreEstimator::new().explain(&contact(10, &[]));
        assert!(!s.differs_from(TrustLevel::new(5)));
        assert!(s.differs_from(TrustLevel::new(9)));
    }
}
