//! The persisted dataset: entities, settings, and the document layout.
//!
//! Field spelling in serde matches the original document (camelCase keys,
//! `stockLogs`/`orders` collection names), so blobs written by any earlier
//! version load directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{EntityId, RawQuantity};

/// Company identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub EntityId);

impl CompanyId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product identifier. Unique across the whole dataset, not merely within a
/// company: stock and order logs reference products globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Stock-log record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLogId(pub EntityId);

impl StockLogId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for StockLogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order-log record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderLogId(pub EntityId);

impl OrderLogId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrderLogId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Company status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Inactive,
}

impl CompanyStatus {
    /// The other status; `toggle_company_status` flips through this.
    pub fn toggled(self) -> Self {
        match self {
            CompanyStatus::Active => CompanyStatus::Inactive,
            CompanyStatus::Inactive => CompanyStatus::Active,
        }
    }
}

/// A business that owns products. Never hard-deleted; deactivation is a
/// status toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub status: CompanyStatus,
}

/// A stocked item owned by one company.
///
/// `sku` and `fsn` are two independent human-readable identifiers; every
/// product carries both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub company_id: CompanyId,
    pub sku: String,
    pub fsn: String,
    /// Baseline quantity at creation, before logged additions and dispatches.
    pub opening_stock: i64,
}

/// Append-only record of a manual stock addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLog {
    pub id: StockLogId,
    pub product_id: ProductId,
    /// Positive by convention, not enforced.
    pub amount: i64,
    /// Creation time.
    pub date: DateTime<Utc>,
}

/// Append-only record of one day's order activity for one product.
///
/// The counts stay in whatever loose form they arrived in; stats coerce them
/// while folding. `product_id` is optional because rows from the oldest
/// datasets can remain unassigned even after orphan repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLog {
    pub id: OrderLogId,
    pub company_id: CompanyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Caller-supplied business date, stored verbatim. Distinct from
    /// `timestamp`.
    pub date: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "RawQuantity::is_missing")]
    pub received_orders: RawQuantity,
    #[serde(default, skip_serializing_if = "RawQuantity::is_missing")]
    pub dispatched_orders: RawQuantity,
}

/// Singleton settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Flat earnings multiplier applied per received order.
    pub rate_per_order: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self { rate_per_order: 2.0 }
    }
}

/// The whole persisted document: every collection plus settings.
///
/// Serialized as one JSON document under a single blob key. Collections grow
/// append-only; derived figures are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub companies: Vec<Company>,
    pub products: Vec<Product>,
    pub stock_logs: Vec<StockLog>,
    pub orders: Vec<OrderLog>,
    pub settings: Settings,
}
