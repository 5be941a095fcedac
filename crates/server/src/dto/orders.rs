//! # Order Data Transfer Objects
//!
//! Request and response types for the order workflow.

use chrono::NaiveDate;
use entity::{
    sea_orm_active_enums::PaymentMethod,
    types::{Address, Tracking},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One line of a cart being checked out
///
/// Deliberately closed to extra fields: a caller-supplied `price` is a hard
/// error, never silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OrderItemRequest {
    /// Product to order
    #[validate(length(min = 1, message = "Product ID is required"))]
    pub product:  String,
    /// Units to order
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Request to place an order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateOrderRequest {
    /// Cart lines; prices always come from the products, never the caller
    #[validate(
        length(min = 1, message = "Order must contain at least one item"),
        nested
    )]
    pub items:            Vec<OrderItemRequest>,
    /// Delivery address
    pub shipping_address: Option<Address>,
    /// Billing address
    pub billing_address:  Option<Address>,
    /// Payment method
    pub payment_method:   PaymentMethod,
    /// Free-form note to the seller
    pub notes:            Option<String>,
}

/// Request to transition an order's status
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct UpdateOrderStatusRequest {
    /// Target status
    #[validate(length(min = 1, message = "Status is required"))]
    pub status:   String,
    /// Optional shipment tracking payload
    pub tracking: Option<Tracking>,
}

/// Query parameters for the customer's own order history
#[derive(Debug, Clone, Deserialize)]
pub struct OrderListQuery {
    /// Status filter
    pub status: Option<String>,
}

/// Query parameters for the cross-tenant admin listing
#[derive(Debug, Clone, Deserialize)]
pub struct AdminOrderListQuery {
    /// Status filter
    pub status:    Option<String>,
    /// Company filter (ignored for moderators, who are scoped to their own)
    pub company:   Option<String>,
    /// Seller filter
    pub seller:    Option<String>,
    /// Inclusive lower creation-date bound
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper creation-date bound
    pub date_to:   Option<NaiveDate>,
}

/// Payment summary of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub method: String,
    pub status: String,
    pub amount: Decimal,
}

/// Commission recorded at delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommissionSummary {
    /// Platform's cut of the order total
    pub amount: Decimal,
    /// Rate in percent
    pub rate:   Decimal,
}

/// One fulfilled line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemDetail {
    pub product_id: String,
    pub quantity:   i32,
    /// Unit price snapshot taken at creation
    pub price:      Decimal,
    pub total:      Decimal,
}

/// Full order detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    /// Order's unique identifier
    pub id:               String,
    /// Human-facing order number
    pub order_number:     String,
    /// Ordering customer
    pub customer_id:      String,
    /// Fulfilling artisan
    pub seller_id:        String,
    /// Artisan's company
    pub company_id:       String,
    /// Line items
    pub items:            Vec<OrderItemDetail>,
    /// Delivery address
    pub shipping_address: Option<Address>,
    /// Billing address
    pub billing_address:  Option<Address>,
    /// Payment summary
    pub payment:          PaymentSummary,
    /// Fulfilment status
    pub status:           String,
    /// Shipment tracking
    pub tracking:         Option<Tracking>,
    /// Free-form note
    pub notes:            Option<String>,
    /// Order total
    pub total_amount:     Decimal,
    pub shipping_cost:    Decimal,
    pub tax:              Decimal,
    pub discount:         Decimal,
    /// Commission, present once delivered
    pub commission:       Option<CommissionSummary>,
    /// Creation timestamp
    pub created_at:       String,
    /// Last update timestamp
    pub updated_at:       String,
}

/// Response for a single order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The order
    pub order:   OrderDetail,
}

/// Response for order listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderListResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// Number of orders returned
    pub count:   usize,
    /// The orders, newest first
    pub orders:  Vec<OrderDetail>,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[test]
    fn test_create_order_requires_items() {
        let req = CreateOrderRequest {
            items:            vec![],
            shipping_address: None,
            billing_address:  None,
            payment_method:   PaymentMethod::CashOnDelivery,
            notes:            None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn test_create_order_rejects_zero_quantity() {
        let req = CreateOrderRequest {
            items:            vec![OrderItemRequest {
                product:  "prd_1".to_string(),
                quantity: 0,
            }],
            shipping_address: None,
            billing_address:  None,
            payment_method:   PaymentMethod::Stripe,
            notes:            None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_order_valid() {
        let req = CreateOrderRequest {
            items:            vec![OrderItemRequest {
                product:  "prd_1".to_string(),
                quantity: 2,
            }],
            shipping_address: None,
            billing_address:  None,
            payment_method:   PaymentMethod::Chapa,
            notes:            Some("Gift wrap please".to_string()),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_payment_method_wire_format() {
        let json = r#"{"items":[{"product":"prd_1","quantity":1}],"payment_method":"cash_on_delivery"}"#;
        let req: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.payment_method, PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_update_status_request() {
        let req = UpdateOrderStatusRequest {
            status:   String::new(),
            tracking: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_admin_query_dates_parse() {
        let query = r#"{"status":"pending","date_from":"2025-01-01","date_to":"2025-01-31"}"#;
        let parsed: AdminOrderListQuery = serde_json::from_str(query).unwrap();
        assert_eq!(
            parsed.date_from,
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
        assert_eq!(
            parsed.date_to,
            Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap())
        );
    }
}
