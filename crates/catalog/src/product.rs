//! Product record, its media assets, and its two append-only trails
//! (price history and activity log).

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use assetpro_core::{ActivityLogId, AssetId, Entity, ProductId};

/// Scalar value of a free-form product attribute ("Port Count" → 8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Image,
    Video,
    Pdf,
    Doc,
    Certificate,
    Manual,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Image => "IMAGE",
            AssetType::Video => "VIDEO",
            AssetType::Pdf => "PDF",
            AssetType::Doc => "DOC",
            AssetType::Certificate => "CERTIFICATE",
            AssetType::Manual => "MANUAL",
        }
    }
}

impl core::fmt::Display for AssetType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media or document linked to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub url: String,
    pub name: String,
    pub created_at: NaiveDate,
}

/// An uploaded file about to be linked (id and date are assigned on link).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    pub asset_type: AssetType,
    pub url: String,
    pub name: String,
}

/// One entry of a product's price history. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Short month/day label, e.g. `Mar 05`.
    pub date: String,
    pub price: f64,
    pub reason: String,
    pub user: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    PriceChange,
    AssetLink,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "CREATE",
            ActivityAction::Update => "UPDATE",
            ActivityAction::Delete => "DELETE",
            ActivityAction::PriceChange => "PRICE_CHANGE",
            ActivityAction::AssetLink => "ASSET_LINK",
        }
    }
}

impl core::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit-trail entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    /// `YYYY-MM-DD HH:MM`, sortable as text.
    pub timestamp: String,
    pub user: String,
    pub action: ActivityAction,
    pub details: String,
}

/// Form-shaped record used to create or edit a product.
///
/// Carries every editable field. Price history and activity logs are not
/// part of a draft: the mutation service owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub sku: String,
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub current_price: f64,
    pub currency: String,
    pub stock: i64,
    /// Defaults to the creation date when absent.
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub variant_codes: Vec<String>,
    #[serde(default)]
    pub dynamic_attributes: BTreeMap<String, AttributeValue>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub active_features: BTreeSet<String>,
}

impl ProductDraft {
    /// A blank form with the default feature panels switched on.
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        current_price: f64,
    ) -> Self {
        Self {
            sku: sku.into(),
            barcode: String::new(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            current_price,
            currency: "USD".to_string(),
            stock: 0,
            entry_date: None,
            variant_codes: Vec::new(),
            dynamic_attributes: BTreeMap::new(),
            assets: Vec::new(),
            active_features: ["manuals", "certificates", "price_history"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.dynamic_attributes.insert(key.into(), value.into());
        self
    }
}

/// A catalogued product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    sku: String,
    barcode: String,
    name: String,
    description: String,
    category: String,
    current_price: f64,
    currency: String,
    stock: i64,
    entry_date: NaiveDate,
    variant_codes: Vec<String>,
    dynamic_attributes: BTreeMap<String, AttributeValue>,
    assets: Vec<Asset>,
    price_history: Vec<PriceRecord>,
    activity_logs: Vec<ActivityLog>,
    active_features: BTreeSet<String>,
}

impl Product {
    /// Rehydrate a product with existing trails (seed data, snapshots).
    pub fn restore(
        id: ProductId,
        draft: ProductDraft,
        entry_date: NaiveDate,
        price_history: Vec<PriceRecord>,
        activity_logs: Vec<ActivityLog>,
    ) -> Self {
        let mut product = Self::from_draft(id, draft, entry_date);
        product.price_history = price_history;
        product.activity_logs = activity_logs;
        product
    }

    pub(crate) fn from_draft(id: ProductId, draft: ProductDraft, entry_date: NaiveDate) -> Self {
        Self {
            id,
            sku: draft.sku,
            barcode: draft.barcode,
            name: draft.name,
            description: draft.description,
            category: draft.category,
            current_price: draft.current_price,
            currency: draft.currency,
            stock: draft.stock,
            entry_date: draft.entry_date.unwrap_or(entry_date),
            variant_codes: draft.variant_codes,
            dynamic_attributes: draft.dynamic_attributes,
            assets: draft.assets,
            price_history: Vec::new(),
            activity_logs: Vec::new(),
            active_features: draft.active_features,
        }
    }

    /// Replace every editable field with the draft's values (last write wins).
    /// Identity and both trails are kept.
    pub(crate) fn overwrite(&self, draft: ProductDraft) -> Self {
        let mut next = Self::from_draft(self.id, draft, self.entry_date);
        next.price_history = self.price_history.clone();
        next.activity_logs = self.activity_logs.clone();
        next
    }

    pub(crate) fn set_price(&mut self, record: PriceRecord) {
        self.current_price = record.price;
        self.price_history.push(record);
    }

    pub(crate) fn push_log(&mut self, log: ActivityLog) {
        self.activity_logs.insert(0, log);
    }

    pub(crate) fn push_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    pub fn variant_codes(&self) -> &[String] {
        &self.variant_codes
    }

    pub fn dynamic_attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.dynamic_attributes
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Chronological (oldest first).
    pub fn price_history(&self) -> &[PriceRecord] {
        &self.price_history
    }

    /// Newest first.
    pub fn activity_logs(&self) -> &[ActivityLog] {
        &self.activity_logs
    }

    pub fn active_features(&self) -> &BTreeSet<String> {
        &self.active_features
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.active_features.contains(feature)
    }

    /// Case-insensitive SKU comparison (the bulk-update join key).
    pub fn sku_matches(&self, sku: &str) -> bool {
        self.sku.to_lowercase() == sku.to_lowercase()
    }

    /// The form record an editor starts from.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            sku: self.sku.clone(),
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            current_price: self.current_price,
            currency: self.currency.clone(),
            stock: self.stock,
            entry_date: Some(self.entry_date),
            variant_codes: self.variant_codes.clone(),
            dynamic_attributes: self.dynamic_attributes.clone(),
            assets: self.assets.clone(),
            active_features: self.active_features.clone(),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}
