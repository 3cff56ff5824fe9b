//! Mutation inputs.
//!
//! Callers hand the store loosely-typed records; these structs give every
//! operation an explicit parameter type while keeping the loose count fields
//! as [`RawQuantity`], so the store owns all coercion and defaulting.

use serde::{Deserialize, Serialize};

use stockbook_core::RawQuantity;

use crate::dataset::{CompanyId, ProductId};

/// Input for `create_company`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompanyInput {
    pub name: String,
    /// Products to create alongside the company. Incomplete entries are
    /// skipped without error; see [`InitialProductInput::is_complete`].
    #[serde(default)]
    pub initial_products: Vec<InitialProductInput>,
}

/// One product bundled with company creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialProductInput {
    pub sku: Option<String>,
    pub fsn: Option<String>,
    #[serde(default)]
    pub opening_stock: RawQuantity,
}

impl InitialProductInput {
    /// Whether this entry will produce a product: both identifiers must be
    /// present and non-empty. Anything less is skipped silently
    /// (lenient-validation policy, not an error path).
    pub fn is_complete(&self) -> bool {
        fn filled(field: &Option<String>) -> bool {
            field.as_deref().is_some_and(|s| !s.is_empty())
        }
        filled(&self.sku) && filled(&self.fsn)
    }
}

/// Input for `create_product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductInput {
    /// Not checked against stored companies; a dangling reference simply
    /// reads as zero stats (lenient foreign keys).
    pub company_id: CompanyId,
    pub sku: String,
    pub fsn: String,
    #[serde(default)]
    pub opening_stock: RawQuantity,
}

/// Input for `add_daily_log` / `add_bulk_daily_logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogInput {
    pub company_id: CompanyId,
    pub product_id: ProductId,
    /// Business date as the caller spells it; the store stamps the creation
    /// `timestamp` separately.
    pub date: String,
    #[serde(default)]
    pub received_orders: RawQuantity,
    #[serde(default)]
    pub dispatched_orders: RawQuantity,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(sku: Option<&str>, fsn: Option<&str>) -> InitialProductInput {
        InitialProductInput {
            sku: sku.map(str::to_owned),
            fsn: fsn.map(str::to_owned),
            opening_stock: RawQuantity::Missing,
        }
    }

    #[test]
    fn complete_requires_both_identifiers() {
        assert!(entry(Some("SKU-1"), Some("FSN-1")).is_complete());
        assert!(!entry(Some("SKU-1"), None).is_complete());
        assert!(!entry(None, Some("FSN-1")).is_complete());
        assert!(!entry(None, None).is_complete());
    }

    #[test]
    fn empty_strings_count_as_missing() {
        assert!(!entry(Some(""), Some("FSN-1")).is_complete());
        assert!(!entry(Some("SKU-1"), Some("")).is_complete());
        // Whitespace is not trimmed; a space is a populated field.
        assert!(entry(Some(" "), Some("FSN-1")).is_complete());
    }

    #[test]
    fn company_input_parses_from_a_sparse_record() {
        let input: NewCompanyInput = serde_json::from_value(json!({
            "name": "Alpha Traders",
        }))
        .unwrap();
        assert_eq!(input.name, "Alpha Traders");
        assert!(input.initial_products.is_empty());
    }

    #[test]
    fn daily_log_input_accepts_loose_counts() {
        let input: DailyLogInput = serde_json::from_value(json!({
            "companyId": "c-1",
            "productId": "p-1",
            "date": "2024-05-06",
            "receivedOrders": "10",
        }))
        .unwrap();
        assert_eq!(input.received_orders.coerce(), 10);
        assert_eq!(input.dispatched_orders.coerce(), 0);
    }
}
