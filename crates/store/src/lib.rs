//! `stockbook-store` — the dataset engine.
//!
//! Companies, products, stock logs and order logs live in one append-only
//! dataset document. Every derived figure (current stock, earnings, dashboard
//! totals) is folded fresh from history on each read, so aggregates can never
//! drift from the logs. A repair pass normalizes documents written by older
//! schema versions at load time.

pub mod dataset;
pub mod error;
pub mod input;
mod migrate;
pub mod stats;
pub mod store;

pub use dataset::{
    Company, CompanyId, CompanyStatus, Dataset, OrderLog, OrderLogId, Product, ProductId,
    Settings, StockLog, StockLogId,
};
pub use error::StoreError;
pub use input::{DailyLogInput, InitialProductInput, NewCompanyInput, NewProductInput};
pub use stats::{CompanyStats, CompanyView, DashboardStats, ProductStats, ProductView};
pub use store::{DEFAULT_DATASET_KEY, Store};
