//! Subscription tiers and the product-count limit gate.
//!
//! Pure policy: no IO, no clock, no knowledge of products beyond a count.

pub mod limit;
pub mod plan;

pub use limit::{PlanDecision, PlanLimitPolicy, PlanLimitReason, PlanUsage};
pub use plan::{SubscriptionPlan, UnknownPlan};
