//! # Reports API
//!
//! Read-only reporting surfaces: the sales report over a date range, the
//! customer report, and the order-items drill-down.
//!
//! All aggregation happens backend-side; these types mirror the response
//! shapes row for row. CSV export of the rows is the shell's concern.

use chrono::NaiveDate;
use serde::Deserialize;

use theeni_core::{Money, Quantity};

use crate::error::ClientResult;
use crate::http::ApiClient;

// =============================================================================
// Wire Types
// =============================================================================

/// Headline figures for `GET /api/v1/reports/sales`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesSummary {
    pub total_revenue: Money,
    pub total_orders: i64,
    pub total_discount_given: Money,
}

/// Per-item breakdown row of the sales report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSalesRow {
    pub id: i64,
    pub name: String,
    pub total_quantity_sold: Quantity,
    pub total_revenue_from_item: Money,
}

/// The full sales report response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesReport {
    pub summary: SalesSummary,
    pub sales_by_item: Vec<ItemSalesRow>,
}

/// One row of `GET /api/v1/reports/customers`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomerReportRow {
    pub id: i64,
    pub name: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub total_orders: i64,
    pub total_spent: Money,
}

/// One row of `GET /api/v1/orders/{id}/items`, the deepest drill-down.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItemRow {
    pub id: i64,
    pub item_name: String,
    pub quantity: Quantity,
    pub price_per_unit: Money,
    pub subtotal: Money,
}

// =============================================================================
// Reports Api
// =============================================================================

/// Typed access to the reporting endpoints (admin only; the backend
/// enforces the role).
#[derive(Clone)]
pub struct ReportsApi {
    api: ApiClient,
}

impl ReportsApi {
    pub fn new(api: ApiClient) -> Self {
        ReportsApi { api }
    }

    /// The sales report for an inclusive date range.
    pub async fn sales(&self, start_date: NaiveDate, end_date: NaiveDate) -> ClientResult<SalesReport> {
        self.api
            .get_json_query(
                "/api/v1/reports/sales",
                &[
                    ("start_date", start_date.format("%Y-%m-%d").to_string()),
                    ("end_date", end_date.format("%Y-%m-%d").to_string()),
                ],
            )
            .await
    }

    /// The customer report: one row per customer with lifetime figures.
    pub async fn customers(&self) -> ClientResult<Vec<CustomerReportRow>> {
        self.api.get_json("/api/v1/reports/customers").await
    }

    /// Line-level detail of a single order, for the drill-down from a
    /// customer's order history.
    pub async fn order_items(&self, order_id: i64) -> ClientResult<Vec<OrderItemRow>> {
        self.api
            .get_json(&format!("/api/v1/orders/{}/items", order_id))
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_report_from_backend_json() {
        let report: SalesReport = serde_json::from_value(serde_json::json!({
            "summary": {
                "total_revenue": 12450.50,
                "total_orders": 87,
                "total_discount_given": 310.25
            },
            "sales_by_item": [
                {
                    "id": 1,
                    "name": "Besan Barfi",
                    "total_quantity_sold": 42.75,
                    "total_revenue_from_item": 2565.0
                },
                {
                    "id": 3,
                    "name": "Kaju Katli",
                    "total_quantity_sold": 18.5,
                    "total_revenue_from_item": 1480.0
                }
            ]
        }))
        .unwrap();

        assert_eq!(report.summary.total_orders, 87);
        assert_eq!(
            report.summary.total_discount_given,
            Money::from_major_minor(310, 25)
        );
        assert_eq!(report.sales_by_item.len(), 2);
        assert_eq!(
            report.sales_by_item[0].total_quantity_sold,
            Quantity::new("42.75".parse().unwrap())
        );
    }

    #[test]
    fn test_customer_report_from_backend_json() {
        let rows: Vec<CustomerReportRow> = serde_json::from_value(serde_json::json!([
            {
                "id": 12,
                "name": "Asha Rao",
                "phone_number": "9876543210",
                "email": null,
                "total_orders": 9,
                "total_spent": 4120.0
            }
        ]))
        .unwrap();

        assert_eq!(rows[0].total_orders, 9);
        assert_eq!(rows[0].total_spent, Money::from_major_minor(4120, 0));
        assert!(rows[0].email.is_none());
    }

    #[test]
    fn test_order_items_from_backend_json() {
        let rows: Vec<OrderItemRow> = serde_json::from_value(serde_json::json!([
            {
                "id": 301,
                "item_name": "Besan Barfi",
                "quantity": 0.75,
                "price_per_unit": 60.0,
                "subtotal": 45.0
            }
        ]))
        .unwrap();

        assert_eq!(rows[0].quantity, Quantity::new("0.75".parse().unwrap()));
        assert_eq!(rows[0].subtotal, Money::from_major_minor(45, 0));
    }

    #[test]
    fn test_report_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2024-03-01");
    }
}
