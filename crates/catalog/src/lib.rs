//! Product catalog domain.
//!
//! Products with typed attributes, price history and an activity log, plus the
//! mutation service that gates every change behind role permissions and the
//! subscription's product limit. Pure domain logic: no IO, no storage, and the
//! clock and id source are supplied by the caller.

pub mod audit;
pub mod bulk;
pub mod catalog;
pub mod error;
pub mod product;
pub mod service;

pub use audit::{
    AuditTrailBuilder, INITIAL_PRICE_REASON, LOG_TIMESTAMP_FORMAT, PRICE_DATE_FORMAT, price_record,
};
pub use bulk::{
    BulkParseReport, BulkPriceRow, CsvBulkParser, DEFAULT_BULK_REASON, SAMPLE_TEMPLATE, SkipReason,
    SkippedLine,
};
pub use catalog::{Catalog, CatalogSummary};
pub use error::{CatalogError, CatalogResult};
pub use product::{
    ActivityAction, ActivityLog, Asset, AssetType, AssetUpload, AttributeValue, PriceRecord,
    Product, ProductDraft,
};
pub use service::{BulkUpdateOutcome, Committed, ProductMutationService};
