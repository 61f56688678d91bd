use kd_common::Rupees;
use serde::{Deserialize, Serialize};

/// One order line after catalog resolution: the product it matched and the price in force when the order was
/// taken. Produced by intake validation, consumed by the atomic commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    pub product_id: i64,
    pub name: String,
    pub district: String,
    pub quantity: i64,
    pub unit_price: Rupees,
}

impl ResolvedLine {
    pub fn line_total(&self) -> Rupees {
        self.unit_price * self.quantity
    }
}

/// The dashboard counters, read as one snapshot so the four figures are mutually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_products: i64,
    /// Orders whose payment status is `Pending`.
    pub pending_orders: i64,
    /// Products with quantity strictly below the low-stock threshold (zero stock counts as low).
    pub low_stock_items: i64,
    /// Sum of totals over `Confirmed` orders only.
    pub total_revenue: Rupees,
}
