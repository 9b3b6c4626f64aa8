//! The product collection as an explicit state value.
//!
//! The caller owns exactly one `Catalog`. Mutations receive it by reference and
//! hand back a new one; the caller swaps its reference.

use serde::{Deserialize, Serialize};

use assetpro_core::{ProductId, find_entity};
use assetpro_plans::{PlanLimitPolicy, PlanUsage};

use crate::product::Product;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Newest creation first.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.position(id).map(|idx| &self.products[idx])
    }

    pub fn find_by_sku(&self, sku: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.sku_matches(sku))
    }

    pub(crate) fn position(&self, id: ProductId) -> Option<usize> {
        find_entity(&self.products, &id).map(|(idx, _)| idx)
    }

    pub(crate) fn position_by_sku(&self, sku: &str) -> Option<usize> {
        self.products.iter().position(|p| p.sku_matches(sku))
    }

    /// Products whose name or SKU contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name().to_lowercase().contains(&needle)
                    || p.sku().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn summary(&self, plan: &PlanLimitPolicy) -> CatalogSummary {
        let total_value: f64 = self.products.iter().map(Product::current_price).sum();
        CatalogSummary {
            product_count: self.products.len(),
            asset_count: self.products.iter().map(|p| p.assets().len()).sum(),
            total_value,
            average_price: total_value / self.products.len().max(1) as f64,
            usage: plan.usage(self.products.len()),
        }
    }

    pub(crate) fn with_inserted_front(&self, product: Product) -> Catalog {
        let mut products = Vec::with_capacity(self.products.len() + 1);
        products.push(product);
        products.extend(self.products.iter().cloned());
        Catalog { products }
    }

    pub(crate) fn with_replaced(&self, idx: usize, product: Product) -> Catalog {
        let mut products = self.products.clone();
        products[idx] = product;
        Catalog { products }
    }

    pub(crate) fn with_removed(&self, idx: usize) -> Catalog {
        let mut products = self.products.clone();
        products.remove(idx);
        Catalog { products }
    }

    pub(crate) fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub product_count: usize,
    pub asset_count: usize,
    /// Sum of current prices (currency-less).
    pub total_value: f64,
    /// Zero for an empty catalog.
    pub average_price: f64,
    pub usage: PlanUsage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetpro_core::{IdGenerator, SequentialIdGenerator};
    use assetpro_plans::SubscriptionPlan;
    use chrono::NaiveDate;

    use crate::product::ProductDraft;

    fn catalog() -> Catalog {
        let ids = SequentialIdGenerator::new();
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let restore = |sku: &str, name: &str, price: f64| {
            let draft = ProductDraft::new(sku, name, "Hardware", price);
            Product::restore(ids.next_id(), draft, date, Vec::new(), Vec::new())
        };
        Catalog::new(vec![
            restore("IFS-1000-B", "Industrial Fiber Switch", 899.99),
            restore("ECOS-2024-ENT", "Eco Suite Enterprise", 2300.0),
        ])
    }

    #[test]
    fn search_matches_name_or_sku_ignoring_case() {
        let catalog = catalog();
        assert_eq!(catalog.search("fiber").len(), 1);
        assert_eq!(catalog.search("ecos").len(), 1);
        assert_eq!(catalog.search("  ").len(), 2);
        assert!(catalog.search("laptop").is_empty());
    }

    #[test]
    fn find_by_sku_ignores_case() {
        let catalog = catalog();
        let found = catalog.find_by_sku("ifs-1000-b").unwrap();
        assert_eq!(catalog.find(found.id_typed()), Some(found));
    }

    #[test]
    fn summary_totals_prices_and_usage() {
        let summary = catalog().summary(&PlanLimitPolicy::for_plan(SubscriptionPlan::Starter));
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.asset_count, 0);
        assert!((summary.total_value - 3199.99).abs() < 1e-9);
        assert!((summary.average_price - 1599.995).abs() < 1e-9);
        assert_eq!(summary.usage.used, 2);
        assert_eq!(summary.usage.limit, 10);
    }

    #[test]
    fn empty_catalog_summary_has_zero_average() {
        let summary = Catalog::default().summary(&PlanLimitPolicy::default());
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.average_price, 0.0);
    }

    #[test]
    fn replace_helpers_leave_the_source_untouched() {
        let before = catalog();
        let after = before.with_removed(0);
        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 1);
        assert_eq!(after.products()[0].sku(), "ECOS-2024-ENT");
    }
}
