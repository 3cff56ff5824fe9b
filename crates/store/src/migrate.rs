//! Load-time repair of datasets written by older schema versions.
//!
//! The blob is parsed into a lenient raw schema first (absent collections,
//! missing statuses, legacy inline product fields, loosely-typed counts) and
//! normalized here. The pass is idempotent: feeding its own output back in
//! reports no change, so it is safe to run on every load.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use stockbook_core::{EntityId, RawQuantity};

use crate::dataset::{
    Company, CompanyId, CompanyStatus, Dataset, OrderLog, Product, ProductId, Settings, StockLog,
    StockLogId,
};

/// A dataset as it may rest in storage, up to one schema generation behind.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDataset {
    #[serde(default)]
    companies: Vec<RawCompany>,
    /// Absent in datasets that predate standalone products.
    products: Option<Vec<RawProduct>>,
    /// Absent in datasets that predate stock logging.
    stock_logs: Option<Vec<RawStockLog>>,
    #[serde(default)]
    orders: Vec<OrderLog>,
    settings: Option<Settings>,
}

/// A company row, possibly still carrying the pre-normalization inline
/// product fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompany {
    id: CompanyId,
    name: String,
    status: Option<CompanyStatus>,
    sku: Option<String>,
    fsn: Option<String>,
    opening_stock: Option<RawQuantity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: ProductId,
    company_id: CompanyId,
    #[serde(default)]
    sku: String,
    #[serde(default)]
    fsn: String,
    #[serde(default)]
    opening_stock: RawQuantity,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStockLog {
    id: StockLogId,
    product_id: ProductId,
    #[serde(default)]
    amount: RawQuantity,
    date: DateTime<Utc>,
}

/// Result of the repair pass.
pub(crate) struct Migration {
    pub data: Dataset,
    /// Whether any repair altered the dataset; drives the persist-once at
    /// the end of `Store::open`.
    pub changed: bool,
}

/// Normalize a raw dataset, repairing what older writers left behind.
pub(crate) fn run(raw: RawDataset) -> Migration {
    let mut changed = false;

    // Collections older schema versions lacked come back as empty defaults.
    let settings = match raw.settings {
        Some(settings) => settings,
        None => {
            changed = true;
            Settings::default()
        }
    };
    let raw_products = match raw.products {
        Some(products) => products,
        None => {
            changed = true;
            Vec::new()
        }
    };
    let raw_stock_logs = match raw.stock_logs {
        Some(logs) => logs,
        None => {
            changed = true;
            Vec::new()
        }
    };

    // Fields that are coerced at write time may still rest loosely in old
    // documents; apply the same policy here.
    let mut products: Vec<Product> = raw_products
        .into_iter()
        .map(|p| Product {
            id: p.id,
            company_id: p.company_id,
            sku: p.sku,
            fsn: p.fsn,
            opening_stock: p.opening_stock.coerce(),
        })
        .collect();
    let mut stock_logs: Vec<StockLog> = raw_stock_logs
        .into_iter()
        .map(|l| StockLog {
            id: l.id,
            product_id: l.product_id,
            amount: l.amount.coerce(),
            date: l.date,
        })
        .collect();
    let mut orders = raw.orders;

    // Product ids must be unique across the whole dataset. The later
    // occurrence is renamed, and every log that referenced the shared id
    // follows it to the fresh one.
    let mut seen: HashSet<ProductId> = HashSet::new();
    let mut renamed = 0usize;
    for index in 0..products.len() {
        let id = products[index].id.clone();
        if seen.insert(id.clone()) {
            continue;
        }

        let fresh = ProductId::new(EntityId::new());
        products[index].id = fresh.clone();
        for order in orders.iter_mut() {
            if order.product_id.as_ref() == Some(&id) {
                order.product_id = Some(fresh.clone());
            }
        }
        for log in stock_logs.iter_mut() {
            if log.product_id == id {
                log.product_id = fresh.clone();
            }
        }
        seen.insert(fresh);
        renamed += 1;
        changed = true;
    }

    let mut companies: Vec<Company> = Vec::with_capacity(raw.companies.len());
    let mut hoisted = 0usize;
    for raw_company in raw.companies {
        let RawCompany {
            id,
            name,
            status,
            sku,
            fsn,
            opening_stock,
        } = raw_company;

        // Companies stored before status tracking were all active.
        let status = match status {
            Some(status) => status,
            None => {
                changed = true;
                CompanyStatus::Active
            }
        };

        // The pre-normalization schema kept one product inline on the
        // company. Hoist it into the products collection unless an earlier
        // load already did, then strip the legacy fields.
        let legacy = match (sku, fsn) {
            (Some(sku), Some(fsn)) if !sku.is_empty() && !fsn.is_empty() => Some((sku, fsn)),
            _ => None,
        };
        if let Some((sku, fsn)) = legacy {
            let exists = products.iter().any(|p| p.company_id == id && p.sku == sku);
            if !exists {
                products.push(Product {
                    id: ProductId::new(EntityId::new()),
                    company_id: id.clone(),
                    sku,
                    fsn,
                    opening_stock: opening_stock.unwrap_or_default().coerce(),
                });
                hoisted += 1;
            }
            changed = true;
        }

        companies.push(Company { id, name, status });
    }

    // Best-effort orphan repair: point product-less orders at the first
    // product of their company. Orders of a productless company stay
    // unassigned.
    let mut adopted = 0usize;
    let mut unassigned = 0usize;
    for order in orders.iter_mut() {
        if order.product_id.is_some() {
            continue;
        }
        match products.iter().find(|p| p.company_id == order.company_id) {
            Some(product) => {
                order.product_id = Some(product.id.clone());
                adopted += 1;
                changed = true;
            }
            None => unassigned += 1,
        }
    }
    if unassigned > 0 {
        warn!(unassigned, "order logs left without a product reference");
    }

    if changed {
        info!(renamed, hoisted, adopted, "dataset repaired during load");
    }

    Migration {
        data: Dataset {
            companies,
            products,
            stock_logs,
            orders,
            settings,
        },
        changed,
    }
}
