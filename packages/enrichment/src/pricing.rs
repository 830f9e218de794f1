//! Keyword-based pricing classification.
//!
//! A deterministic decision table over page content. It deliberately
//! over-indexes on recall: "pricing" alone marks a freemium signal, and
//! a bare "$" marks a paid signal. The generative pass can override the
//! result; this detector is the fallback when it does not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pricing model of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(type_name = "pricing_tier"))]
pub enum PricingTier {
    Free,
    Freemium,
    Paid,
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingTier::Free => write!(f, "Free"),
            PricingTier::Freemium => write!(f, "Freemium"),
            PricingTier::Paid => write!(f, "Paid"),
        }
    }
}

impl FromStr for PricingTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(PricingTier::Free),
            "freemium" => Ok(PricingTier::Freemium),
            "paid" => Ok(PricingTier::Paid),
            other => Err(format!("unknown pricing tier: {}", other)),
        }
    }
}

const FREE_INDICATORS: &[&str] = &[
    "free forever",
    "completely free",
    "free plan",
    "free tier",
    "open source",
    "free to use",
];

const FREEMIUM_INDICATORS: &[&str] = &[
    "free trial",
    "upgrade to",
    "pro plan",
    "premium features",
    "pricing",
];

const PAID_INDICATORS: &[&str] = &["$", "subscription", "buy now", "purchase", "paid plan"];

/// Classify pricing from page HTML and extracted text.
///
/// Case-insensitive substring matching against both inputs. Returns
/// `None` when no indicator class fires, or when the free and paid
/// signals contradict without a freemium tiebreaker.
pub fn detect_pricing(html: &str, text: &str) -> Option<PricingTier> {
    let lower_text = text.to_lowercase();
    let lower_html = html.to_lowercase();

    let matches_any = |indicators: &[&str]| {
        indicators
            .iter()
            .any(|needle| lower_text.contains(needle) || lower_html.contains(needle))
    };

    let has_free = matches_any(FREE_INDICATORS);
    let has_freemium = matches_any(FREEMIUM_INDICATORS);
    let has_paid = matches_any(PAID_INDICATORS);

    // Rule order matters: free-only, then mixed, then paid-only.
    if has_free && !has_freemium && !has_paid {
        return Some(PricingTier::Free);
    }
    if (has_free || has_freemium) && has_paid {
        return Some(PricingTier::Freemium);
    }
    if has_paid && !has_free {
        return Some(PricingTier::Paid);
    }

    None
}
