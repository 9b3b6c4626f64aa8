use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscription tier. Each tier caps how many products the catalog may hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    /// Free tier.
    #[default]
    Starter,
    Professional,
    Business,
    Enterprise,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 4] = [
        SubscriptionPlan::Starter,
        SubscriptionPlan::Professional,
        SubscriptionPlan::Business,
        SubscriptionPlan::Enterprise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Starter => "starter",
            SubscriptionPlan::Professional => "professional",
            SubscriptionPlan::Business => "business",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    /// Maximum number of products under this tier.
    pub fn product_limit(&self) -> usize {
        match self {
            SubscriptionPlan::Starter => 10,
            SubscriptionPlan::Professional => 100,
            SubscriptionPlan::Business => 300,
            SubscriptionPlan::Enterprise => 500,
        }
    }

    /// Monthly price in cents (USD).
    pub fn monthly_price_cents(&self) -> u64 {
        match self {
            SubscriptionPlan::Starter => 0,
            SubscriptionPlan::Professional => 9_999,
            SubscriptionPlan::Business => 13_999,
            SubscriptionPlan::Enterprise => 24_900,
        }
    }

    /// The next tier up, if any.
    pub fn upgrade(&self) -> Option<SubscriptionPlan> {
        match self {
            SubscriptionPlan::Starter => Some(SubscriptionPlan::Professional),
            SubscriptionPlan::Professional => Some(SubscriptionPlan::Business),
            SubscriptionPlan::Business => Some(SubscriptionPlan::Enterprise),
            SubscriptionPlan::Enterprise => None,
        }
    }
}

impl core::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown subscription plan '{0}'")]
pub struct UnknownPlan(pub String);

impl FromStr for SubscriptionPlan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionPlan::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPlan(s.to_string()))
    }
}
