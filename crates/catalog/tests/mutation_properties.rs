use assetpro_auth::{Permission, User, UserRole};
use assetpro_catalog::{
    ActivityAction, BulkPriceRow, Catalog, CatalogError, CsvBulkParser, Product, ProductDraft,
    ProductMutationService,
};
use assetpro_core::{IdGenerator, SequentialIdGenerator, UserId};
use assetpro_plans::PlanLimitPolicy;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn actor(role: UserRole) -> User {
    User::new(UserId::from_uuid(Default::default()), "Jane Doe", role)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap()
}

fn service() -> ProductMutationService<SequentialIdGenerator> {
    // Seeded products take the low ids.
    ProductMutationService::new(
        SequentialIdGenerator::starting_after(1_000),
        PlanLimitPolicy::default(),
    )
}

/// A catalog of `count` products priced 100, the first with SKU `IFS-1000-B`.
fn catalog_of(count: usize, first_price: f64) -> Catalog {
    let ids = SequentialIdGenerator::new();
    let entry = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let products = (0..count)
        .map(|i| {
            let (sku, price) = if i == 0 {
                ("IFS-1000-B".to_string(), first_price)
            } else {
                (format!("SKU-{i:03}"), 100.0)
            };
            Product::restore(
                ids.next_id(),
                ProductDraft::new(sku, format!("Product {i}"), "Hardware", price),
                entry,
                Vec::new(),
                Vec::new(),
            )
        })
        .collect();
    Catalog::new(products)
}

fn any_role() -> impl Strategy<Value = UserRole> {
    prop_oneof![Just(UserRole::Admin), Just(UserRole::Manager), Just(UserRole::Viewer)]
}

#[test]
fn seasonal_bulk_row_updates_matching_product() {
    let svc = service();
    let catalog = catalog_of(3, 899.99);

    let rows = [BulkPriceRow {
        sku: "IFS-1000-B".to_string(),
        price: 950.00,
        reason: "Seasonal".to_string(),
    }];
    let outcome = svc
        .bulk_update(&catalog, &rows, &actor(UserRole::Manager), now())
        .unwrap();

    assert_eq!(outcome.updated_count, 1);
    let product = outcome.catalog.find_by_sku("IFS-1000-B").unwrap();
    let record = product.price_history().last().unwrap();
    assert_eq!(record.price, 950.00);
    assert_eq!(record.reason, "Seasonal");
    assert_eq!(record.user, "Jane Doe");

    let log = &product.activity_logs()[0];
    assert_eq!(log.action, ActivityAction::PriceChange);
    assert!(log.details.contains("899.99"), "{}", log.details);
    assert!(log.details.contains("950"), "{}", log.details);
    assert_eq!(log.timestamp, "2024-05-20 09:30");

    // Untouched rows are identical to the input.
    assert_eq!(outcome.catalog.products()[1..], catalog.products()[1..]);
}

#[test]
fn csv_payload_drives_bulk_update() {
    let svc = service();
    let catalog = catalog_of(3, 899.99);

    let outcome = svc
        .bulk_update_csv(
            &catalog,
            "sku,price,reason\n\
             ifs-1000-b,950.00,Seasonal\n\
             SKU-002,100,\n\
             GHOST-1,5,x\n\
             SKU-001,abc,x\n",
            &actor(UserRole::Admin),
            now(),
        )
        .unwrap();

    assert_eq!(outcome.updated_count, 1);
    assert_eq!(outcome.unchanged, 1);
    assert_eq!(outcome.unmatched, 1);
    assert_eq!(outcome.invalid, 2);
}

#[test]
fn price_edit_flow_requires_reason_then_records_change() {
    let svc = service();
    let catalog = catalog_of(1, 100.0);
    let product = &catalog.products()[0];
    let mut draft = product.to_draft();
    draft.current_price = 120.0;

    let err = svc
        .update(&catalog, product.id_typed(), draft.clone(), None, &actor(UserRole::Manager), now())
        .unwrap_err();
    assert_eq!(err, CatalogError::MissingPriceReason);

    let committed = svc
        .update(
            &catalog,
            product.id_typed(),
            draft,
            Some("cost increase"),
            &actor(UserRole::Manager),
            now(),
        )
        .unwrap();
    assert_eq!(committed.product.price_history().len(), product.price_history().len() + 1);
    assert_eq!(committed.product.price_history().last().unwrap().price, 120.0);
    assert_eq!(committed.product.activity_logs().len(), product.activity_logs().len() + 1);
    assert_eq!(committed.product.activity_logs()[0].action, ActivityAction::PriceChange);
}

#[test]
fn parser_drops_malformed_middle_line() {
    let rows = CsvBulkParser::parse("SKU1,10.50,restock\n,abc,bad\nSKU2,20,\n");
    assert_eq!(rows.len(), 2);
    assert_eq!(
        (rows[0].sku.as_str(), rows[0].price, rows[0].reason.as_str()),
        ("SKU1", 10.50, "restock")
    );
    assert_eq!(
        (rows[1].sku.as_str(), rows[1].price, rows[1].reason.as_str()),
        ("SKU2", 20.0, "")
    );
}

#[test]
fn full_lifecycle_leaves_expected_trail() {
    let svc = service();
    let admin = actor(UserRole::Admin);

    let created = svc
        .create(
            &Catalog::default(),
            ProductDraft::new("IFS-1000-B", "Industrial Fiber Switch PRO 1000", "Hardware", 899.99)
                .with_attribute("Port Count", 8.0)
                .with_attribute("PoE", true),
            &admin,
            now(),
        )
        .unwrap();
    let id = created.product.id_typed();

    let bulk = svc
        .bulk_update_csv(&created.catalog, "IFS-1000-B,950.00,Seasonal\n", &admin, now())
        .unwrap();
    let trail = svc.audit_trail(&bulk.catalog, id, &admin).unwrap();
    let actions: Vec<_> = trail.iter().map(|log| log.action).collect();
    assert_eq!(actions, vec![ActivityAction::PriceChange, ActivityAction::Create]);

    let deleted = svc.delete(&bulk.catalog, id, &admin).unwrap();
    assert!(deleted.find(id).is_none());
}

proptest! {
    /// Property: roles without EDIT_PRODUCT never change the catalog.
    #[test]
    fn non_editors_cannot_update(
        role in any_role(),
        price in 0.0f64..10_000.0,
        reason in "[a-z ]{0,12}",
    ) {
        prop_assume!(!Permission::EditProduct.allowed_roles().contains(&role));

        let svc = service();
        let catalog = catalog_of(2, 100.0);
        let before = catalog.clone();
        let product = &catalog.products()[0];
        let mut draft = product.to_draft();
        draft.current_price = price;

        let err = svc
            .update(&catalog, product.id_typed(), draft, Some(reason.as_str()), &actor(role), now())
            .unwrap_err();
        prop_assert!(matches!(err, CatalogError::PermissionDenied(_)));
        prop_assert_eq!(catalog, before);
    }

    /// Property: a full Starter catalog refuses creation for every role.
    #[test]
    fn full_catalog_refuses_creation(role in any_role(), count in 10usize..25) {
        let svc = service();
        let catalog = catalog_of(count, 100.0);

        let err = svc
            .create(
                &catalog,
                ProductDraft::new("NEW-1", "New", "Hardware", 1.0),
                &actor(role),
                now(),
            )
            .unwrap_err();
        let is_plan_limit = matches!(err, CatalogError::PlanLimitReached { .. });
        prop_assert!(is_plan_limit);
        prop_assert_eq!(catalog.len(), count);
    }

    /// Property: the product limit only gates creation; a catalog at or past
    /// the limit stays editable.
    #[test]
    fn over_limit_catalog_stays_editable(count in 10usize..25, price in 200.0f64..5_000.0) {
        let svc = service();
        let catalog = catalog_of(count, 100.0);
        let manager = actor(UserRole::Manager);
        prop_assert!(!svc.can_create(&catalog).allowed);

        let product = &catalog.products()[1];
        let mut metadata = product.to_draft();
        metadata.stock = 7;
        let edited = svc
            .update(&catalog, product.id_typed(), metadata, None, &manager, now())
            .unwrap();
        prop_assert_eq!(edited.catalog.len(), count);
        prop_assert_eq!(edited.product.stock(), 7);

        let mut repriced = product.to_draft();
        repriced.current_price = price + 0.5;
        let repriced = svc
            .update(&catalog, product.id_typed(), repriced, Some("contract"), &manager, now())
            .unwrap();
        prop_assert_eq!(repriced.product.current_price(), price + 0.5);

        let rows = [BulkPriceRow {
            sku: "IFS-1000-B".to_string(),
            price: price + 0.5,
            reason: String::new(),
        }];
        let outcome = svc.bulk_update(&catalog, &rows, &manager, now()).unwrap();
        prop_assert_eq!(outcome.updated_count, 1);
        prop_assert_eq!(outcome.catalog.len(), count);
    }

    /// Property: replaying a bulk payload is a no-op.
    #[test]
    fn bulk_update_is_idempotent(prices in proptest::collection::vec(0.0f64..5_000.0, 1..6)) {
        let svc = service();
        let catalog = catalog_of(prices.len(), 100.0);
        let rows: Vec<BulkPriceRow> = catalog
            .products()
            .iter()
            .zip(&prices)
            .map(|(p, price)| BulkPriceRow {
                sku: p.sku().to_string(),
                price: *price,
                reason: String::new(),
            })
            .collect();
        let admin = actor(UserRole::Admin);

        let first = svc.bulk_update(&catalog, &rows, &admin, now()).unwrap();
        let second = svc.bulk_update(&first.catalog, &rows, &admin, now()).unwrap();

        prop_assert_eq!(second.updated_count, 0);
        prop_assert_eq!(second.unchanged, rows.len());
        prop_assert_eq!(second.catalog, first.catalog);
    }

    /// Property: a successful create adds exactly one price record and one CREATE log.
    #[test]
    fn create_writes_exactly_one_of_each(price in 0.0f64..10_000.0, existing in 0usize..9) {
        let svc = service();
        let catalog = catalog_of(existing, 100.0);

        let created = svc
            .create(
                &catalog,
                ProductDraft::new("NEW-1", "New", "Hardware", price),
                &actor(UserRole::Manager),
                now(),
            )
            .unwrap();
        prop_assert_eq!(created.catalog.len(), existing + 1);
        prop_assert_eq!(created.product.price_history().len(), 1);
        prop_assert_eq!(created.product.activity_logs().len(), 1);
        prop_assert_eq!(created.product.activity_logs()[0].action, ActivityAction::Create);
    }
}
