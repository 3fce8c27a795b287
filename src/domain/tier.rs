use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PLANS;

/// Subscription tier gating how many pairs the user may scan at once.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum Tier {
    #[default]
    Starter,
    Plus,
    Pro,
}

impl Tier {
    /// Parse the tier string sent by the backend.
    /// Unknown values resolve to the most restrictive plan, so a garbled
    /// payload can never unlock more pairs than the account paid for.
    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "starter" => Tier::Starter,
            "plus" => Tier::Plus,
            "pro" => Tier::Pro,
            _ => Tier::Starter,
        }
    }

    /// Maximum selectable pair count for this tier. None = no ceiling.
    pub fn max_pairs(&self) -> Option<usize> {
        PLANS.limits(*self).max_pairs
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tier::Starter => write!(f, "Starter"),
            Tier::Plus => write!(f, "Plus"),
            Tier::Pro => write!(f, "Pro"),
        }
    }
}
