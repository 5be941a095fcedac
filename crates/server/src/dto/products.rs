//! # Product Data Transfer Objects
//!
//! Request and response types for the product catalog.

use std::str::FromStr;

use entity::{
    sea_orm_active_enums::ProductCategory,
    types::{Dimensions, ImageRef, ProductAccessibility},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_non_negative;

/// Query parameters for the catalog listing
#[derive(Debug, Clone, Deserialize)]
pub struct ProductListQuery {
    /// Category filter; `all` means no filter
    pub category:  Option<String>,
    /// Case-insensitive match on name, description and tags
    pub search:    Option<String>,
    /// Lower price bound
    pub min_price: Option<Decimal>,
    /// Upper price bound
    pub max_price: Option<Decimal>,
    /// Page number (1-based, default: 1)
    pub page:      Option<u64>,
    /// Items per page (default: 12, max: 100)
    pub limit:     Option<u64>,
    /// Sort key: newest | price_low | price_high | name
    pub sort:      Option<String>,
}

impl ProductListQuery {
    /// Get page number (1-based, default: 1)
    pub fn page(&self) -> u64 { self.page.unwrap_or(1).max(1) }

    /// Get items per page (default: 12, max: 100)
    pub fn limit(&self) -> u64 { self.limit.unwrap_or(12).clamp(1, 100) }
}

/// Catalog sort orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSort {
    Newest,
    PriceLow,
    PriceHigh,
    Name,
}

impl ProductSort {
    /// Parse a sort key, falling back to newest-first.
    #[must_use]
    pub fn parse(key: Option<&str>) -> Self {
        match key {
            Some("price_low") => ProductSort::PriceLow,
            Some("price_high") => ProductSort::PriceHigh,
            Some("name") => ProductSort::Name,
            _ => ProductSort::Newest,
        }
    }
}

/// Validate a product category string against the known set.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if ProductCategory::from_str(category).is_ok() {
        Ok(())
    }
    else {
        let mut err = ValidationError::new("unknown_category");
        err.message = Some("Category must be one of: clothing, jewelry, home-decor, art, food, other".into());
        Err(err)
    }
}

/// Request to create a product listing
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name
    #[validate(length(min = 1, max = 100, message = "Product name must be between 1 and 100 characters"))]
    pub name:          String,
    /// Product description
    #[validate(length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"))]
    pub description:   String,
    /// Unit price
    #[validate(custom(function = validate_non_negative))]
    pub price:         Decimal,
    /// Catalog category
    #[validate(custom(function = validate_category))]
    pub category:      String,
    /// Initial stock (default: 1)
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock:         Option<i32>,
    /// Free-form tags
    pub tags:          Option<Vec<String>>,
    /// Materials used
    pub materials:     Option<Vec<String>>,
    /// Physical dimensions
    pub dimensions:    Option<Dimensions>,
    /// Accessibility aids
    pub accessibility: Option<ProductAccessibility>,
    /// Uploaded image references
    pub images:        Option<Vec<ImageRef>>,
}

/// Request to update a product listing
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, Default)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name must be between 1 and 100 characters"))]
    pub name:          Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"))]
    pub description:   Option<String>,
    #[validate(custom(function = validate_non_negative))]
    pub price:         Option<Decimal>,
    #[validate(custom(function = validate_category))]
    pub category:      Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock:         Option<i32>,
    /// Soft-disable flag
    pub is_active:     Option<bool>,
    /// Moderation status: draft | pending | approved | rejected | suspended
    pub status:        Option<String>,
    pub tags:          Option<Vec<String>>,
    pub materials:     Option<Vec<String>>,
    pub dimensions:    Option<Dimensions>,
    pub accessibility: Option<ProductAccessibility>,
    pub images:        Option<Vec<ImageRef>>,
    pub featured:      Option<bool>,
}

/// Product rating summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSummary {
    pub average: Decimal,
    pub count:   i32,
}

/// Full product detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    /// Product's unique identifier
    pub id:            String,
    /// Product name
    pub name:          String,
    /// Product description
    pub description:   String,
    /// Unit price
    pub price:         Decimal,
    /// Catalog category
    pub category:      String,
    /// Image references
    pub images:        Vec<ImageRef>,
    /// Owning artisan
    pub artisan_id:    String,
    /// Owning company
    pub company_id:    String,
    /// Units in stock
    pub stock:         i32,
    /// Soft-disable flag
    pub is_active:     bool,
    /// Accessibility aids
    pub accessibility: Option<ProductAccessibility>,
    /// Free-form tags
    pub tags:          Vec<String>,
    /// Physical dimensions
    pub dimensions:    Option<Dimensions>,
    /// Materials used
    pub materials:     Vec<String>,
    /// Rating summary
    pub rating:        RatingSummary,
    /// Moderation status
    pub status:        String,
    /// Featured flag
    pub featured:      bool,
    /// Creation timestamp
    pub created_at:    String,
    /// Last update timestamp
    pub updated_at:    String,
}

/// Response for a single product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The product
    pub product: ProductDetail,
}

/// Response for the catalog listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListResponse {
    /// Whether the operation was successful
    pub success:      bool,
    /// Number of products on this page
    pub count:        usize,
    /// The products
    pub products:     Vec<ProductDetail>,
    /// Total number of pages
    pub total_pages:  u64,
    /// Current page (1-based)
    pub current_page: u64,
    /// Total matching products
    pub total:        u64,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn valid_request() -> CreateProductRequest {
        CreateProductRequest {
            name:          "Woven Basket".to_string(),
            description:   "Hand-woven palm basket".to_string(),
            price:         Decimal::new(4599, 2),
            category:      "home-decor".to_string(),
            stock:         Some(5),
            tags:          None,
            materials:     None,
            dimensions:    None,
            accessibility: None,
            images:        None,
        }
    }

    #[test]
    fn test_create_product_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_product_missing_required_fields() {
        let req = CreateProductRequest {
            name: String::new(),
            description: String::new(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        // Both misses are reported in one pass
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_create_product_negative_price() {
        let req = CreateProductRequest {
            price: Decimal::new(-100, 2),
            ..valid_request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_product_unknown_category() {
        let req = CreateProductRequest {
            category: "vehicles".to_string(),
            ..valid_request()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category"));
    }

    #[test]
    fn test_list_query_defaults() {
        let q = ProductListQuery {
            category:  None,
            search:    None,
            min_price: None,
            max_price: None,
            page:      None,
            limit:     None,
            sort:      None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 12);
    }

    #[test]
    fn test_list_query_clamps() {
        let q = ProductListQuery {
            category:  None,
            search:    None,
            min_price: None,
            max_price: None,
            page:      Some(0),
            limit:     Some(1000),
            sort:      None,
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 100);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(ProductSort::parse(Some("price_low")), ProductSort::PriceLow);
        assert_eq!(ProductSort::parse(Some("price_high")), ProductSort::PriceHigh);
        assert_eq!(ProductSort::parse(Some("name")), ProductSort::Name);
        assert_eq!(ProductSort::parse(Some("bogus")), ProductSort::Newest);
        assert_eq!(ProductSort::parse(None), ProductSort::Newest);
    }
}
