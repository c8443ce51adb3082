//! Shared data structures used throughout the application.

use serde::Deserialize;
use std::collections::HashMap;

/// One currency's price record as served by the upstream feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceEntry {
    pub currency: String,
    /// Missing or `null` in the feed decodes as `None`.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl PriceEntry {
    /// Price usable for quoting: present, finite and strictly positive.
    pub fn valid_price(&self) -> Option<f64> {
        match self.price {
            Some(p) if p.is_finite() && p > 0.0 && !self.currency.is_empty() => Some(p),
            _ => None,
        }
    }
}

/// Which side of the swap a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}

/// Currency → price lookup plus the order tokens are offered in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
    tokens: Vec<String>,
}

impl PriceTable {
    /// Folds feed entries in order. Entries without a usable price are
    /// dropped; a repeated currency overwrites the earlier price but keeps
    /// its first position in the token list.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a PriceEntry>,
    {
        let mut table = Self::default();
        for entry in entries {
            let Some(price) = entry.valid_price() else {
                continue;
            };
            if table.prices.insert(entry.currency.clone(), price).is_none() {
                table.tokens.push(entry.currency.clone());
            }
        }
        table
    }

    pub fn price(&self, currency: &str) -> Option<f64> {
        self.prices.get(currency).copied()
    }

    pub fn contains(&self, currency: &str) -> bool {
        self.prices.contains_key(currency)
    }

    /// Available tokens in feed order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// One row of an open token picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOption {
    pub symbol: String,
    pub icon_url: String,
    /// Already chosen on the opposite side.
    pub disabled: bool,
}

/// Outcome of a simulated swap. Logged and displayed, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapSummary {
    pub source: String,
    pub target: String,
    pub amount_in: f64,
    pub amount_out: String,
    pub rate: f64,
}
