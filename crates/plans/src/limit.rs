use serde::{Deserialize, Serialize};

use crate::SubscriptionPlan;

/// Why a creation was refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanLimitReason {
    LimitReached,
}

/// Outcome of a plan-limit check.
///
/// When `allowed` is false the caller must route the user to an upgrade flow;
/// `upgrade_to` names the tier to offer (absent on the top tier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDecision {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<PlanLimitReason>,
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_to: Option<SubscriptionPlan>,
}

/// Product-count gate for new products.
///
/// Only consulted when a product is created; existing products stay editable
/// even when the catalog is over the limit (e.g. after a downgrade).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlanLimitPolicy {
    plan: SubscriptionPlan,
    limit: usize,
}

impl Default for PlanLimitPolicy {
    fn default() -> Self {
        Self::for_plan(SubscriptionPlan::default())
    }
}

impl PlanLimitPolicy {
    pub fn for_plan(plan: SubscriptionPlan) -> Self {
        Self {
            plan,
            limit: plan.product_limit(),
        }
    }

    /// Override the tier's limit (e.g. a negotiated contract).
    pub fn with_limit(plan: SubscriptionPlan, limit: usize) -> Self {
        Self { plan, limit }
    }

    pub fn plan(&self) -> SubscriptionPlan {
        self.plan
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_create_product(&self, current_count: usize) -> PlanDecision {
        if current_count < self.limit {
            PlanDecision {
                allowed: true,
                reason: None,
                limit: self.limit,
                upgrade_to: None,
            }
        } else {
            PlanDecision {
                allowed: false,
                reason: Some(PlanLimitReason::LimitReached),
                limit: self.limit,
                upgrade_to: self.plan.upgrade(),
            }
        }
    }

    pub fn usage(&self, current_count: usize) -> PlanUsage {
        PlanUsage::new(self.plan, current_count, self.limit)
    }
}

/// Plan consumption, as shown on the dashboard meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUsage {
    pub plan: SubscriptionPlan,
    pub used: usize,
    pub limit: usize,
    /// Percent of the limit in use, capped at 100.
    pub percent_used: f64,
}

impl PlanUsage {
    fn new(plan: SubscriptionPlan, used: usize, limit: usize) -> Self {
        let percent_used = if limit == 0 {
            100.0
        } else {
            (used as f64 / limit as f64 * 100.0).min(100.0)
        };
        Self {
            plan,
            used,
            limit,
            percent_used,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ninth_and_tenth_products_allowed_eleventh_refused() {
        let policy = PlanLimitPolicy::default();
        assert!(policy.can_create_product(8).allowed);
        assert!(policy.can_create_product(9).allowed);

        let decision = policy.can_create_product(10);
        assert!(!decision.allowed);
        assert_eq!(decision.reason, Some(PlanLimitReason::LimitReached));
        assert_eq!(decision.upgrade_to, Some(SubscriptionPlan::Professional));
    }

    #[test]
    fn top_tier_has_no_upgrade_signal() {
        let policy = PlanLimitPolicy::for_plan(SubscriptionPlan::Enterprise);
        let decision = policy.can_create_product(500);
        assert!(!decision.allowed);
        assert_eq!(decision.upgrade_to, None);
    }

    #[test]
    fn custom_limit_overrides_tier() {
        let policy = PlanLimitPolicy::with_limit(SubscriptionPlan::Starter, 2);
        assert!(policy.can_create_product(1).allowed);
        assert!(!policy.can_create_product(2).allowed);
    }

    #[test]
    fn usage_caps_at_one_hundred_percent() {
        let policy = PlanLimitPolicy::default();
        assert_eq!(policy.usage(5).percent_used, 50.0);
        let over = policy.usage(14);
        assert_eq!(over.percent_used, 100.0);
        assert!(over.is_exhausted());
    }

    #[test]
    fn allowed_decision_serializes_without_reason() {
        let json = serde_json::to_value(PlanLimitPolicy::default().can_create_product(0)).unwrap();
        assert_eq!(json["allowed"], true);
        assert!(json.get("reason").is_none());
    }

    proptest! {
        /// Property: creation is allowed exactly while the count is below the limit.
        #[test]
        fn allowed_iff_below_limit(limit in 0usize..1_000, count in 0usize..2_000) {
            let policy = PlanLimitPolicy::with_limit(SubscriptionPlan::Starter, limit);
            let decision = policy.can_create_product(count);
            prop_assert_eq!(decision.allowed, count < limit);
            prop_assert_eq!(decision.reason.is_some(), count >= limit);
        }
    }
}
