//! Product mutations: create, edit, bulk price update, delete, asset linking.
//!
//! The service holds no product state. Each operation checks its gates first
//! (plan limit, then permission), then builds audit entries and returns a new
//! [`Catalog`]. A failed operation changes nothing.

use chrono::{DateTime, Utc};

use assetpro_auth::{Permission, User};
use assetpro_core::{DomainError, DomainResult, IdGenerator, ProductId};
use assetpro_plans::{PlanDecision, PlanLimitPolicy};

use crate::audit::{AuditTrailBuilder, INITIAL_PRICE_REASON, price_record};
use crate::bulk::{BulkPriceRow, CsvBulkParser};
use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::product::{ActivityLog, Asset, AssetUpload, Product, ProductDraft};

/// Result of a mutation that commits one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Committed {
    pub catalog: Catalog,
    pub product: Product,
}

/// Result of a bulk price update.
///
/// Row-level problems are tallied here and never raised as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkUpdateOutcome {
    pub catalog: Catalog,
    /// Rows that changed a price.
    pub updated_count: usize,
    /// Rows whose price already matched.
    pub unchanged: usize,
    /// Rows whose SKU matched no product.
    pub unmatched: usize,
    /// Rows with a blank SKU or unusable price.
    pub invalid: usize,
}

pub struct ProductMutationService<G> {
    ids: G,
    plan: PlanLimitPolicy,
}

impl<G: IdGenerator> ProductMutationService<G> {
    pub fn new(ids: G, plan: PlanLimitPolicy) -> Self {
        Self { ids, plan }
    }

    pub fn plan(&self) -> &PlanLimitPolicy {
        &self.plan
    }

    /// Pre-check for the "add product" action.
    pub fn can_create(&self, catalog: &Catalog) -> PlanDecision {
        self.plan.can_create_product(catalog.len())
    }

    /// Create a product from a draft.
    ///
    /// The plan limit is checked before the actor's role, so a full catalog
    /// reports `PlanLimitReached` to every user.
    pub fn create(
        &self,
        catalog: &Catalog,
        draft: ProductDraft,
        actor: &User,
        now: DateTime<Utc>,
    ) -> CatalogResult<Committed> {
        let decision = self.can_create(catalog);
        if !decision.allowed {
            tracing::warn!(
                current = catalog.len(),
                limit = decision.limit,
                actor = %actor.name,
                "product creation blocked by plan limit"
            );
            return Err(CatalogError::PlanLimitReached {
                current: catalog.len(),
                limit: decision.limit,
                upgrade_to: decision.upgrade_to,
            });
        }

        self.require(actor, Permission::EditProduct)?;
        let draft = normalize_draft(draft)?;

        if catalog.find_by_sku(&draft.sku).is_some() {
            return Err(DomainError::conflict(format!("sku '{}' already exists", draft.sku)).into());
        }

        let audit = AuditTrailBuilder::new(&self.ids);
        let price = draft.current_price;
        let mut product = Product::from_draft(self.ids.next_id(), draft, now.date_naive());
        product.set_price(price_record(price, INITIAL_PRICE_REASON, actor, now));
        product.push_log(audit.creation(actor, now));

        tracing::info!(
            product_id = %product.id_typed(),
            sku = product.sku(),
            actor = %actor.name,
            "product created"
        );

        Ok(Committed {
            catalog: catalog.with_inserted_front(product.clone()),
            product,
        })
    }

    /// Replace a product's editable fields with `draft`.
    ///
    /// A price change needs a non-blank `price_reason`; it appends a price
    /// record and a `PRICE_CHANGE` log. Otherwise a single `UPDATE` log is
    /// added.
    pub fn update(
        &self,
        catalog: &Catalog,
        id: ProductId,
        draft: ProductDraft,
        price_reason: Option<&str>,
        actor: &User,
        now: DateTime<Utc>,
    ) -> CatalogResult<Committed> {
        self.require(actor, Permission::EditProduct)?;

        let idx = catalog.position(id).ok_or(CatalogError::NotFound(id))?;
        let existing = &catalog.products()[idx];

        let old_price = existing.current_price();
        let new_price = draft.current_price;
        let price_changed = old_price != new_price;

        let reason = if price_changed {
            let reason = price_reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or(CatalogError::MissingPriceReason)?;
            Some(reason)
        } else {
            None
        };

        let draft = normalize_draft(draft)?;
        let sku_taken = catalog
            .products()
            .iter()
            .any(|p| p.id_typed() != id && p.sku_matches(&draft.sku));
        if sku_taken {
            return Err(DomainError::conflict(format!("sku '{}' already exists", draft.sku)).into());
        }

        let audit = AuditTrailBuilder::new(&self.ids);
        let mut product = existing.overwrite(draft);

        match reason {
            Some(reason) => {
                product.set_price(price_record(new_price, reason, actor, now));
                product.push_log(audit.price_change(old_price, new_price, actor, now));
                tracing::info!(
                    product_id = %id,
                    old_price,
                    new_price,
                    actor = %actor.name,
                    "product price changed"
                );
            }
            None => {
                product.push_log(audit.metadata_update(actor, now));
                tracing::info!(product_id = %id, actor = %actor.name, "product updated");
            }
        }

        Ok(Committed {
            catalog: catalog.with_replaced(idx, product.clone()),
            product,
        })
    }

    /// Apply parsed bulk rows. `EDIT_PRICE` is checked once for the batch.
    pub fn bulk_update(
        &self,
        catalog: &Catalog,
        rows: &[BulkPriceRow],
        actor: &User,
        now: DateTime<Utc>,
    ) -> CatalogResult<BulkUpdateOutcome> {
        self.require(actor, Permission::EditPrice)?;
        Ok(self.apply_bulk(catalog, rows, actor, now))
    }

    /// Parse a `sku,price,reason` payload and apply it. Lines the parser
    /// drops are tallied as `invalid`.
    pub fn bulk_update_csv(
        &self,
        catalog: &Catalog,
        raw: &str,
        actor: &User,
        now: DateTime<Utc>,
    ) -> CatalogResult<BulkUpdateOutcome> {
        self.require(actor, Permission::EditPrice)?;

        let report = CsvBulkParser::parse_report(raw);
        let mut outcome = self.apply_bulk(catalog, &report.rows, actor, now);
        outcome.invalid += report.skipped.len();
        Ok(outcome)
    }

    /// Remove a product. No log entry is written; the product and its trail
    /// leave the catalog together.
    pub fn delete(&self, catalog: &Catalog, id: ProductId, actor: &User) -> CatalogResult<Catalog> {
        self.require(actor, Permission::DeleteProduct)?;

        let idx = catalog.position(id).ok_or(CatalogError::NotFound(id))?;
        tracing::info!(product_id = %id, actor = %actor.name, "product deleted");
        Ok(catalog.with_removed(idx))
    }

    /// Attach an uploaded file to a product (appended in upload order).
    pub fn link_asset(
        &self,
        catalog: &Catalog,
        id: ProductId,
        upload: AssetUpload,
        actor: &User,
        now: DateTime<Utc>,
    ) -> CatalogResult<Committed> {
        self.require(actor, Permission::UploadAssets)?;

        let idx = catalog.position(id).ok_or(CatalogError::NotFound(id))?;
        let name = upload.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("asset name cannot be empty").into());
        }

        let asset = Asset {
            id: self.ids.next_id(),
            asset_type: upload.asset_type,
            url: upload.url,
            name: name.to_string(),
            created_at: now.date_naive(),
        };

        let audit = AuditTrailBuilder::new(&self.ids);
        let mut product = catalog.products()[idx].clone();
        product.push_log(audit.asset_link(&asset, actor, now));
        tracing::info!(
            product_id = %id,
            asset_id = %asset.id,
            asset_type = %asset.asset_type,
            "asset linked"
        );
        product.push_asset(asset);

        Ok(Committed {
            catalog: catalog.with_replaced(idx, product.clone()),
            product,
        })
    }

    /// A product's activity log, newest first. Requires `VIEW_AUDIT_LOGS`.
    pub fn audit_trail<'c>(
        &self,
        catalog: &'c Catalog,
        id: ProductId,
        actor: &User,
    ) -> CatalogResult<&'c [ActivityLog]> {
        self.require(actor, Permission::ViewAuditLogs)?;

        catalog
            .find(id)
            .map(Product::activity_logs)
            .ok_or(CatalogError::NotFound(id))
    }

    fn apply_bulk(
        &self,
        catalog: &Catalog,
        rows: &[BulkPriceRow],
        actor: &User,
        now: DateTime<Utc>,
    ) -> BulkUpdateOutcome {
        let audit = AuditTrailBuilder::new(&self.ids);
        let mut next = catalog.clone();
        let (mut updated_count, mut unchanged, mut unmatched, mut invalid) = (0, 0, 0, 0);

        for row in rows {
            if !row.is_valid() {
                invalid += 1;
                continue;
            }

            let Some(idx) = next.position_by_sku(&row.sku) else {
                tracing::debug!(sku = %row.sku, "bulk row matched no product");
                unmatched += 1;
                continue;
            };

            let product = &mut next.products_mut()[idx];
            let old_price = product.current_price();
            if old_price == row.price {
                unchanged += 1;
                continue;
            }

            let reason = row.effective_reason();
            product.set_price(price_record(row.price, reason, actor, now));
            product.push_log(audit.bulk_price_change(old_price, row.price, reason, actor, now));
            updated_count += 1;
        }

        tracing::info!(
            updated_count,
            unchanged,
            unmatched,
            invalid,
            actor = %actor.name,
            "bulk price update applied"
        );

        BulkUpdateOutcome {
            catalog: next,
            updated_count,
            unchanged,
            unmatched,
            invalid,
        }
    }

    fn require(&self, actor: &User, permission: Permission) -> CatalogResult<()> {
        assetpro_auth::authorize(actor, permission).map_err(|err| {
            tracing::warn!(
                actor = %actor.name,
                role = %actor.role,
                %permission,
                "operation denied"
            );
            CatalogError::from(err)
        })
    }
}

fn normalize_draft(mut draft: ProductDraft) -> DomainResult<ProductDraft> {
    draft.sku = draft.sku.trim().to_string();
    draft.name = draft.name.trim().to_string();

    if draft.sku.is_empty() {
        return Err(DomainError::validation("SKU cannot be empty"));
    }
    if draft.name.is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if !(draft.current_price.is_finite() && draft.current_price >= 0.0) {
        return Err(DomainError::validation("price must be a finite, non-negative number"));
    }

    Ok(draft)
}
