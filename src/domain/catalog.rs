use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Category buckets the scanner backend uses to organize its pair listing.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum PairCategory {
    Major,
    Defi,
    Altcoin,
}

// The backend's static category tables. Anything the backend adds later
// lands in Altcoin until these are extended.
static MAJOR_PAIRS: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "ADAUSDT", "XRPUSDT", "SOLUSDT", "DOGEUSDT", "DOTUSDT",
    "MATICUSDT", "AVAXUSDT",
];
static DEFI_PAIRS: &[&str] = &[
    "AAVEUSDT", "UNIUSDT", "LINKUSDT", "MKRUSDT", "COMPUSDT", "YFIUSDT", "SNXUSDT", "CRVUSDT",
    "BALUSDT", "RENUSDT",
];

impl PairCategory {
    pub fn of(symbol: &str) -> PairCategory {
        if MAJOR_PAIRS.iter().any(|p| symbol.eq_ignore_ascii_case(p)) {
            PairCategory::Major
        } else if DEFI_PAIRS.iter().any(|p| symbol.eq_ignore_ascii_case(p)) {
            PairCategory::Defi
        } else {
            PairCategory::Altcoin
        }
    }
}

impl fmt::Display for PairCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PairCategory::Major => write!(f, "Major"),
            PairCategory::Defi => write!(f, "DeFi"),
            PairCategory::Altcoin => write!(f, "Altcoins"),
        }
    }
}

/// The full set of selectable pairs offered by the backend for this session.
/// Immutable once built; the order is the backend's listing order.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PairCatalog {
    pairs: Vec<String>,
}

impl PairCatalog {
    /// Build from the wire listing, keeping the first occurrence of any
    /// duplicate so the backend's ordering survives.
    pub fn new(pairs: Vec<String>) -> Self {
        let pairs = pairs.into_iter().unique().collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[String] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Membership test matching the backend, which uppercases symbols
    /// before comparing.
    pub fn contains(&self, symbol: &str) -> bool {
        self.pairs.iter().any(|p| p.eq_ignore_ascii_case(symbol))
    }

    /// Pairs whose lowercase symbol contains the lowercase search term.
    /// Pure view of the listing: never touches any selection, and can be
    /// restarted with a fresh call at no cost. An empty term yields the
    /// whole catalog in listing order.
    pub fn filter<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a String> + 'a {
        let needle = term.to_lowercase();
        self.pairs
            .iter()
            .filter(move |pair| pair.to_lowercase().contains(&needle))
    }
}
