//! Demo catalog the binary operates on.

use chrono::NaiveDate;

use assetpro_catalog::{
    ActivityAction, ActivityLog, Asset, AssetType, Catalog, PriceRecord, Product, ProductDraft,
};
use assetpro_core::IdGenerator;

pub fn demo_catalog<G: IdGenerator>(ids: &G) -> Catalog {
    let mut draft = ProductDraft::new(
        "IFS-1000-B",
        "Industrial Fiber Switch PRO 1000",
        "Hardware",
        899.99,
    )
    .with_attribute("Port Count", 8.0)
    .with_attribute("IP Rating", "IP67");
    draft.barcode = "4012345678901".to_string();
    draft.description = "The IFS-1000-B is an industry-grade fiber switch designed for extreme \
                         environments."
        .to_string();
    draft.variant_codes = vec!["IFS-1000-B-SILVER".to_string(), "IFS-1000-B-BLACK".to_string()];
    draft.active_features.insert("variants".to_string());
    draft.assets = vec![Asset {
        id: ids.next_id(),
        asset_type: AssetType::Manual,
        url: "#".to_string(),
        name: "User_Manual_v2.pdf".to_string(),
        created_at: date(2024, 1, 1),
    }];

    let price_history = vec![
        PriceRecord {
            date: "Jan 10".to_string(),
            price: 950.0,
            reason: "Initial Cataloging".to_string(),
            user: "System Admin".to_string(),
        },
        PriceRecord {
            date: "Mar 05".to_string(),
            price: 899.0,
            reason: "Supplier Cost Adjustment".to_string(),
            user: "Jane Doe".to_string(),
        },
    ];

    let activity_logs = vec![ActivityLog {
        id: ids.next_id(),
        timestamp: "2024-03-05 14:22".to_string(),
        user: "Jane Doe".to_string(),
        action: ActivityAction::PriceChange,
        details: "Lowered price due to new supplier contract".to_string(),
    }];

    Catalog::new(vec![Product::restore(
        ids.next_id(),
        draft,
        date(2024, 1, 10),
        price_history,
        activity_logs,
    )])
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetpro_core::SequentialIdGenerator;

    #[test]
    fn demo_product_matches_sample_template_sku() {
        let catalog = demo_catalog(&SequentialIdGenerator::new());
        let product = catalog.find_by_sku("IFS-1000-B").unwrap();
        assert_eq!(product.current_price(), 899.99);
        assert_eq!(product.price_history().len(), 2);
        assert_eq!(product.assets().len(), 1);
        assert!(product.has_feature("variants"));
    }
}
