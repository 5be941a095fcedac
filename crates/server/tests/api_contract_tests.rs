//! # API Contract Tests
//!
//! Wire-level guarantees: request validation reports every violation at
//! once, caller-supplied prices are rejected, and response shapes carry the
//! fields the storefront depends on.

use rust_decimal::Decimal;
use server::dto::{
    orders::{CreateOrderRequest, OrderItemRequest},
    products::{CreateProductRequest, ProductListQuery},
};
use validator::Validate;

mod product_requests {
    use super::*;

    #[test]
    fn missing_required_fields_fail_before_any_write() {
        // A body without price never deserializes, so nothing downstream runs
        let body = r#"{"name": "Basket", "description": "Palm basket", "category": "home-decor"}"#;
        assert!(serde_json::from_str::<CreateProductRequest>(body).is_err());
    }

    #[test]
    fn all_violations_reported_in_one_pass() {
        let req = CreateProductRequest {
            name:          String::new(),
            description:   String::new(),
            price:         Decimal::new(-500, 2),
            category:      "vehicles".to_string(),
            stock:         Some(-3),
            tags:          None,
            materials:     None,
            dimensions:    None,
            accessibility: None,
            images:        None,
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("category"));
        assert!(fields.contains_key("stock"));
    }

    #[test]
    fn list_query_defaults_match_catalog_contract() {
        let query: ProductListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 12);
    }
}

mod order_requests {
    use super::*;

    #[test]
    fn caller_supplied_price_is_rejected() {
        // Line totals always come from the product's current price
        let body = r#"{"product": "prd_1", "quantity": 2, "price": 0.01}"#;
        assert!(serde_json::from_str::<OrderItemRequest>(body).is_err());
    }

    #[test]
    fn empty_cart_is_rejected() {
        let body = r#"{"items": [], "payment_method": "stripe"}"#;
        let req: CreateOrderRequest = serde_json::from_str(body).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn well_formed_cart_passes() {
        let body = r#"{
            "items": [{"product": "prd_1", "quantity": 2}],
            "payment_method": "cash_on_delivery",
            "shipping_address": {"city": "Marrakesh", "country": "Morocco"}
        }"#;
        let req: CreateOrderRequest = serde_json::from_str(body).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.items[0].quantity, 2);
    }
}

mod response_shapes {
    use server::dto::{
        orders::{OrderDetail, OrderItemDetail, OrderListResponse, PaymentSummary},
        products::{ProductListResponse, RatingSummary},
    };

    use super::*;

    #[test]
    fn product_list_response_fields() {
        let response = ProductListResponse {
            success:      true,
            count:        0,
            products:     vec![],
            total_pages:  3,
            current_page: 2,
            total:        30,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["total_pages"], 3);
        assert_eq!(json["current_page"], 2);
        assert_eq!(json["total"], 30);
        assert!(json["products"].is_array());
    }

    #[test]
    fn order_detail_totals_are_consistent() {
        let detail = OrderDetail {
            id:               "ord_1".to_string(),
            order_number:     "ORD-ABC".to_string(),
            customer_id:      "usr_c".to_string(),
            seller_id:        "usr_s".to_string(),
            company_id:       "com_1".to_string(),
            items:            vec![OrderItemDetail {
                product_id: "prd_1".to_string(),
                quantity:   2,
                price:      Decimal::new(4599, 2),
                total:      Decimal::new(9198, 2),
            }],
            shipping_address: None,
            billing_address:  None,
            payment:          PaymentSummary {
                method: "stripe".to_string(),
                status: "pending".to_string(),
                amount: Decimal::new(9198, 2),
            },
            status:           "pending".to_string(),
            tracking:         None,
            notes:            None,
            total_amount:     Decimal::new(9198, 2),
            shipping_cost:    Decimal::ZERO,
            tax:              Decimal::ZERO,
            discount:         Decimal::ZERO,
            commission:       None,
            created_at:       "2025-03-01T00:00:00+00:00".to_string(),
            updated_at:       "2025-03-01T00:00:00+00:00".to_string(),
        };

        // total == sum of line totals == price * quantity
        let line_sum: Decimal = detail.items.iter().map(|i| i.total).sum();
        assert_eq!(line_sum, detail.total_amount);
        assert_eq!(
            detail.items[0].price * Decimal::from(detail.items[0].quantity),
            detail.items[0].total
        );

        let response = OrderListResponse {
            success: true,
            count:   1,
            orders:  vec![detail],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["orders"][0]["payment"]["method"], "stripe");
        assert!(json["orders"][0]["commission"].is_null());
    }

    #[test]
    fn rating_summary_shape() {
        let rating = RatingSummary {
            average: Decimal::new(450, 2),
            count:   9,
        };
        let json = serde_json::to_value(&rating).unwrap();
        assert_eq!(json["count"], 9);
    }
}
