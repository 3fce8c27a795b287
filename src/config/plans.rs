//! Subscription-plan configuration constants and types.

use crate::domain::Tier;

/// Limits attached to a single subscription plan
pub struct PlanLimits {
    /// Maximum number of pairs selectable at once. None = no ceiling.
    pub max_pairs: Option<usize>,
}

/// The Master Plan Configuration Struct
pub struct PlanConfig {
    pub starter: PlanLimits,
    pub plus: PlanLimits,
    pub pro: PlanLimits,
}

impl PlanConfig {
    pub const fn limits(&self, tier: Tier) -> &PlanLimits {
        match tier {
            Tier::Starter => &self.starter,
            Tier::Plus => &self.plus,
            Tier::Pro => &self.pro,
        }
    }
}

pub const PLANS: PlanConfig = PlanConfig {
    starter: PlanLimits {
        max_pairs: Some(10),
    },
    plus: PlanLimits {
        max_pairs: Some(25),
    },
    // Top tier scans without a pair ceiling
    pro: PlanLimits { max_pairs: None },
};
