//! Audit-trail entry construction.
//!
//! Everything here is pure: given a fixed `now` and a deterministic
//! [`IdGenerator`], output is fully reproducible.

use chrono::{DateTime, Utc};

use assetpro_auth::User;
use assetpro_core::IdGenerator;

use crate::product::{ActivityAction, ActivityLog, Asset, PriceRecord};

/// Timestamp format of activity-log entries (sorts correctly as text).
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Date label of price-history entries (`Mar 05`).
pub const PRICE_DATE_FORMAT: &str = "%b %d";

pub const INITIAL_PRICE_REASON: &str = "Initial Entry";

/// Builds activity-log entries with fresh ids and formatted timestamps.
#[derive(Debug)]
pub struct AuditTrailBuilder<'a, G> {
    ids: &'a G,
}

impl<'a, G: IdGenerator> AuditTrailBuilder<'a, G> {
    pub fn new(ids: &'a G) -> Self {
        Self { ids }
    }

    pub fn entry(
        &self,
        action: ActivityAction,
        details: impl Into<String>,
        actor: &User,
        now: DateTime<Utc>,
    ) -> ActivityLog {
        ActivityLog {
            id: self.ids.next_id(),
            timestamp: now.format(LOG_TIMESTAMP_FORMAT).to_string(),
            user: actor.name.clone(),
            action,
            details: details.into(),
        }
    }

    pub fn creation(&self, actor: &User, now: DateTime<Utc>) -> ActivityLog {
        self.entry(ActivityAction::Create, "Initial asset creation", actor, now)
    }

    pub fn metadata_update(&self, actor: &User, now: DateTime<Utc>) -> ActivityLog {
        self.entry(ActivityAction::Update, "Product metadata updated", actor, now)
    }

    pub fn price_change(
        &self,
        old: f64,
        new: f64,
        actor: &User,
        now: DateTime<Utc>,
    ) -> ActivityLog {
        self.entry(
            ActivityAction::PriceChange,
            format!("Price updated from ${old} to ${new}"),
            actor,
            now,
        )
    }

    pub fn bulk_price_change(
        &self,
        old: f64,
        new: f64,
        reason: &str,
        actor: &User,
        now: DateTime<Utc>,
    ) -> ActivityLog {
        self.entry(
            ActivityAction::PriceChange,
            format!("Bulk price update: ${old} -> ${new}. Reason: {reason}"),
            actor,
            now,
        )
    }

    pub fn asset_link(&self, asset: &Asset, actor: &User, now: DateTime<Utc>) -> ActivityLog {
        self.entry(
            ActivityAction::AssetLink,
            format!("Linked {} ({})", asset.name, asset.asset_type),
            actor,
            now,
        )
    }
}

/// A price-history entry stamped with the short month/day label.
pub fn price_record(
    price: f64,
    reason: impl Into<String>,
    actor: &User,
    now: DateTime<Utc>,
) -> PriceRecord {
    PriceRecord {
        date: now.format(PRICE_DATE_FORMAT).to_string(),
        price,
        reason: reason.into(),
        user: actor.name.clone(),
    }
}
