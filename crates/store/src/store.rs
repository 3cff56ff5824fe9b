//! The store: owns the dataset, persists after every mutation, folds history
//! on every read.

use chrono::Utc;
use tracing::{debug, info};

use stockbook_core::{EntityId, RawQuantity};
use stockbook_infra::BlobStore;

use crate::dataset::{
    Company, CompanyId, CompanyStatus, Dataset, OrderLog, OrderLogId, Product, ProductId,
    Settings, StockLog, StockLogId,
};
use crate::error::StoreError;
use crate::input::{DailyLogInput, NewCompanyInput, NewProductInput};
use crate::migrate;
use crate::stats::{CompanyStats, CompanyView, DashboardStats, ProductStats, ProductView};

/// Default blob key for the dataset document.
pub const DEFAULT_DATASET_KEY: &str = "stockbook_data";

/// Owner of the dataset and the single writer to it.
///
/// Mutations append to history and persist the whole document once per call;
/// reads fold over history fresh every time, so derived figures can never
/// drift from the logs. `&mut self` on mutations keeps the single-writer
/// discipline in the type system.
#[derive(Debug)]
pub struct Store<B: BlobStore> {
    blob: B,
    key: String,
    data: Dataset,
}

impl<B: BlobStore> Store<B> {
    /// Load (or default), repair, and persist repairs under the default key.
    pub fn open(blob: B) -> Result<Self, StoreError> {
        Self::open_with_key(blob, DEFAULT_DATASET_KEY)
    }

    /// Load (or default), repair, and persist repairs under `key`.
    ///
    /// An absent blob starts from `Dataset::default()` without writing
    /// anything. A blob that is present but unparsable is fatal
    /// ([`StoreError::Corrupt`]): adopting defaults over it would drop the
    /// document on the next save.
    pub fn open_with_key(blob: B, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let (data, repaired) = match blob.load(&key)? {
            Some(bytes) => {
                let raw: migrate::RawDataset = serde_json::from_slice(&bytes)?;
                let migration = migrate::run(raw);
                (migration.data, migration.changed)
            }
            None => {
                info!(key, "no dataset blob found, starting from defaults");
                (Dataset::default(), false)
            }
        };

        let store = Self { blob, key, data };
        if repaired {
            store.persist()?;
        }
        Ok(store)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&self.data).map_err(StoreError::Encode)?;
        self.blob.save(&self.key, &bytes)?;
        debug!(key = %self.key, bytes = bytes.len(), "dataset persisted");
        Ok(())
    }

    // ---- mutations ----

    /// Create a company (status starts active) plus any complete entries of
    /// `initial_products`. Incomplete entries are skipped, not rejected.
    /// Persists once for the whole call.
    pub fn create_company(&mut self, input: NewCompanyInput) -> Result<Company, StoreError> {
        let company = Company {
            id: CompanyId::new(EntityId::new()),
            name: input.name,
            status: CompanyStatus::Active,
        };
        self.data.companies.push(company.clone());

        for entry in input.initial_products {
            if !entry.is_complete() {
                continue;
            }
            self.data.products.push(Product {
                id: ProductId::new(EntityId::new()),
                company_id: company.id.clone(),
                sku: entry.sku.unwrap_or_default(),
                fsn: entry.fsn.unwrap_or_default(),
                opening_stock: entry.opening_stock.coerce(),
            });
        }

        self.persist()?;
        debug!(company_id = %company.id, "company created");
        Ok(company)
    }

    /// Flip a company between active and inactive. Unknown ids are a no-op
    /// returning `None`, with nothing persisted.
    pub fn toggle_company_status(
        &mut self,
        id: &CompanyId,
    ) -> Result<Option<Company>, StoreError> {
        let Some(company) = self.data.companies.iter_mut().find(|c| &c.id == id) else {
            return Ok(None);
        };
        company.status = company.status.toggled();
        let updated = company.clone();
        self.persist()?;
        Ok(Some(updated))
    }

    /// Create a product. `company_id` is not validated (lenient foreign
    /// keys); `opening_stock` is coerced here, at write time.
    pub fn create_product(&mut self, input: NewProductInput) -> Result<Product, StoreError> {
        let product = Product {
            id: ProductId::new(EntityId::new()),
            company_id: input.company_id,
            sku: input.sku,
            fsn: input.fsn,
            opening_stock: input.opening_stock.coerce(),
        };
        self.data.products.push(product.clone());
        self.persist()?;
        Ok(product)
    }

    /// Record a manual stock addition. `amount` is coerced at write time;
    /// `date` is the creation time.
    pub fn add_stock_log(
        &mut self,
        product_id: ProductId,
        amount: RawQuantity,
    ) -> Result<StockLog, StoreError> {
        let log = StockLog {
            id: StockLogId::new(EntityId::new()),
            product_id,
            amount: amount.coerce(),
            date: Utc::now(),
        };
        self.data.stock_logs.push(log.clone());
        self.persist()?;
        Ok(log)
    }

    /// Append one day's order activity. Counts are stored verbatim; they are
    /// coerced when stats fold over them.
    pub fn add_daily_log(&mut self, entry: DailyLogInput) -> Result<OrderLog, StoreError> {
        let log = order_log_from(entry);
        self.data.orders.push(log.clone());
        self.persist()?;
        Ok(log)
    }

    /// Append a batch of daily logs, persisting exactly once for the whole
    /// batch.
    pub fn add_bulk_daily_logs(
        &mut self,
        entries: Vec<DailyLogInput>,
    ) -> Result<Vec<OrderLog>, StoreError> {
        let logs: Vec<OrderLog> = entries.into_iter().map(order_log_from).collect();
        self.data.orders.extend(logs.iter().cloned());
        self.persist()?;
        Ok(logs)
    }

    /// Discard everything and persist a fresh default dataset.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.data = Dataset::default();
        self.persist()?;
        info!("dataset reset to defaults");
        Ok(())
    }

    // ---- reads ----

    /// Fold stock and order history for one product. Unknown ids return the
    /// zero-valued stats object.
    pub fn product_stats(&self, product_id: &ProductId) -> ProductStats {
        let Some(product) = self.data.products.iter().find(|p| &p.id == product_id) else {
            return ProductStats::default();
        };

        let mut total_received = 0;
        let mut total_dispatched = 0;
        for log in &self.data.orders {
            if log.product_id.as_ref() == Some(product_id) {
                total_received += log.received_orders.coerce();
                total_dispatched += log.dispatched_orders.coerce();
            }
        }

        let total_added_stock: i64 = self
            .data
            .stock_logs
            .iter()
            .filter(|l| &l.product_id == product_id)
            .map(|l| l.amount)
            .sum();

        ProductStats {
            total_received,
            total_dispatched,
            current_stock: product.opening_stock + total_added_stock - total_dispatched,
            earnings: total_received as f64 * self.data.settings.rate_per_order,
            total_added_stock,
        }
    }

    /// Sum product stats over a company's products. Unknown company ids sum
    /// an empty list, so the result is all zeros.
    pub fn company_stats(&self, company_id: &CompanyId) -> CompanyStats {
        let mut stats = CompanyStats::default();
        for product in self.data.products.iter().filter(|p| &p.company_id == company_id) {
            let product_stats = self.product_stats(&product.id);
            stats.total_received += product_stats.total_received;
            stats.total_dispatched += product_stats.total_dispatched;
            stats.current_stock += product_stats.current_stock;
            stats.earnings += product_stats.earnings;
        }
        stats
    }

    /// A company with its products (stats attached) and totals. `None` for
    /// unknown ids.
    pub fn company(&self, id: &CompanyId) -> Option<CompanyView> {
        let company = self.data.companies.iter().find(|c| &c.id == id)?;
        Some(self.view_of(company))
    }

    /// Every stored company as a view, in insertion order.
    pub fn companies(&self) -> Vec<CompanyView> {
        self.data.companies.iter().map(|c| self.view_of(c)).collect()
    }

    fn view_of(&self, company: &Company) -> CompanyView {
        let products = self
            .data
            .products
            .iter()
            .filter(|p| p.company_id == company.id)
            .map(|p| ProductView {
                product: p.clone(),
                stats: self.product_stats(&p.id),
            })
            .collect();
        CompanyView {
            company: company.clone(),
            products,
            stats: self.company_stats(&company.id),
        }
    }

    /// Raw product lookup, no enrichment.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.data.products.iter().find(|p| &p.id == id)
    }

    /// Full order history in insertion order.
    pub fn logs(&self) -> &[OrderLog] {
        &self.data.orders
    }

    /// Order history for one company, in insertion order.
    pub fn logs_for_company(&self, company_id: &CompanyId) -> Vec<&OrderLog> {
        self.data
            .orders
            .iter()
            .filter(|l| &l.company_id == company_id)
            .collect()
    }

    /// The newest `limit` order logs, most recent first.
    pub fn recent_logs(&self, limit: usize) -> Vec<&OrderLog> {
        self.data.orders.iter().rev().take(limit).collect()
    }

    /// Full stock-addition history in insertion order.
    pub fn stock_logs(&self) -> &[StockLog] {
        &self.data.stock_logs
    }

    /// Totals across all companies. `active_companies` counts every stored
    /// company, inactive ones included.
    pub fn dashboard_stats(&self) -> DashboardStats {
        let mut stats = DashboardStats::default();
        for company in &self.data.companies {
            let company_stats = self.company_stats(&company.id);
            stats.total_orders += company_stats.total_received;
            stats.total_dispatched += company_stats.total_dispatched;
            stats.total_earnings += company_stats.earnings;
        }
        stats.active_companies = self.data.companies.len();
        stats
    }

    /// The settings record.
    pub fn settings(&self) -> &Settings {
        &self.data.settings
    }
}

fn order_log_from(entry: DailyLogInput) -> OrderLog {
    OrderLog {
        id: OrderLogId::new(EntityId::new()),
        company_id: entry.company_id,
        product_id: Some(entry.product_id),
        date: entry.date,
        timestamp: Utc::now(),
        received_orders: entry.received_orders,
        dispatched_orders: entry.dispatched_orders,
    }
}
