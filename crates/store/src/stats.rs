//! Derived figures, recomputed from history on every read.
//!
//! None of these are ever stored; the zero-valued defaults double as the
//! unknown-id sentinels.

use serde::Serialize;

use crate::dataset::{Company, Product};

/// Per-product fold over stock and order history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_received: i64,
    pub total_dispatched: i64,
    /// Opening stock plus added stock minus dispatched orders. May go
    /// negative; overselling is not forbidden.
    pub current_stock: i64,
    pub earnings: f64,
    pub total_added_stock: i64,
}

/// Sum of [`ProductStats`] over one company's products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub total_received: i64,
    pub total_dispatched: i64,
    pub current_stock: i64,
    pub earnings: f64,
}

/// Totals across the whole dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: i64,
    pub total_dispatched: i64,
    pub total_earnings: f64,
    /// Count of ALL stored companies, inactive ones included.
    pub active_companies: usize,
}

/// A product with its stats attached, the way consumers render it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    #[serde(flatten)]
    pub stats: ProductStats,
}

/// A company with enriched products and company totals attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    #[serde(flatten)]
    pub company: Company,
    pub products: Vec<ProductView>,
    pub stats: CompanyStats,
}
