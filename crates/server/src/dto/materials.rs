//! # Material Supplier Data Transfer Objects
//!
//! Request and response types for the raw-material supplier workflow.

use std::str::FromStr;

use entity::{
    sea_orm_active_enums::{MaterialCategory, MaterialUnit},
    types::{Address, ImageRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validate_non_negative;

/// Query parameters for the supplier listing
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierListQuery {
    /// Status filter
    pub status:   Option<String>,
    /// Filter to suppliers offering this material category
    pub category: Option<String>,
    /// Case-insensitive match on supplier name/description and material names
    pub search:   Option<String>,
}

/// Query parameters for the per-category projection
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialsByCategoryQuery {
    /// Restrict to one supplier
    pub supplier: Option<String>,
}

/// Query parameters for the flattened material search
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialSearchQuery {
    /// Free-text match on material and supplier names
    pub q:         Option<String>,
    /// Category filter
    pub category:  Option<String>,
    /// Lower price bound
    pub min_price: Option<Decimal>,
    /// Upper price bound
    pub max_price: Option<Decimal>,
    /// Restrict to one supplier
    pub supplier:  Option<String>,
    /// Sort key: price_low | price_high (default: supplier rating)
    pub sort:      Option<String>,
}

/// Validate a material category string against the known set.
pub fn validate_material_category(value: &str) -> Result<(), ValidationError> {
    if MaterialCategory::from_str(value).is_ok() {
        Ok(())
    }
    else {
        let mut err = ValidationError::new("unknown_material_category");
        err.message =
            Some("Material category must be one of: fabric, yarn, beads, wood, metal, clay, paint, tools, other".into());
        Err(err)
    }
}

/// Validate a material unit string against the known set.
pub fn validate_material_unit(value: &str) -> Result<(), ValidationError> {
    if parse_unit(value).is_some() {
        Ok(())
    }
    else {
        let mut err = ValidationError::new("unknown_material_unit");
        err.message = Some("Unit must be one of: piece, meter, kilogram, liter, set, dozen".into());
        Err(err)
    }
}

/// Parse a unit string into the enum.
#[must_use]
pub fn parse_unit(value: &str) -> Option<MaterialUnit> {
    match value {
        "piece" => Some(MaterialUnit::Piece),
        "meter" => Some(MaterialUnit::Meter),
        "kilogram" => Some(MaterialUnit::Kilogram),
        "liter" => Some(MaterialUnit::Liter),
        "set" => Some(MaterialUnit::Set),
        "dozen" => Some(MaterialUnit::Dozen),
        _ => None,
    }
}

/// One material offered at registration time
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct MaterialRequest {
    /// Material name
    #[validate(length(min = 1, max = 100, message = "Material name must be between 1 and 100 characters"))]
    pub name:         String,
    /// Material description
    #[validate(length(max = 1000, message = "Material description must not exceed 1000 characters"))]
    pub description:  Option<String>,
    /// Category
    #[validate(custom(function = validate_material_category))]
    pub category:     String,
    /// Price per unit
    #[validate(custom(function = validate_non_negative))]
    pub price:        Decimal,
    /// Sale unit
    #[validate(custom(function = validate_material_unit))]
    pub unit:         String,
    /// Units in stock (default: 0)
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock:        Option<i32>,
    /// Image references
    pub images:       Option<Vec<ImageRef>>,
    /// Availability flag (default: true)
    pub is_available: Option<bool>,
}

/// Request to register a material supplier
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct RegisterSupplierRequest {
    /// Supplier name
    #[validate(length(min = 1, max = 100, message = "Supplier name must be between 1 and 100 characters"))]
    pub name:                    String,
    /// Supplier description
    #[validate(length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"))]
    pub description:             String,
    /// Contact email
    #[validate(email(message = "Please enter a valid email"))]
    pub email:                   String,
    /// Contact phone
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone:                   String,
    /// Postal address
    pub address:                 Option<Address>,
    /// Website
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website:                 Option<String>,
    /// Offered materials
    #[validate(nested)]
    pub materials:               Option<Vec<MaterialRequest>>,
    /// Whether delivery is offered (default: true)
    pub delivery_available:      Option<bool>,
    /// Delivery cost
    #[validate(custom(function = validate_non_negative))]
    pub delivery_cost:           Option<Decimal>,
    /// Estimated delivery days
    #[validate(range(min = 0, message = "Estimated delivery days cannot be negative"))]
    pub delivery_estimated_days: Option<i32>,
    /// Uploaded logo reference
    pub logo:                    Option<ImageRef>,
}

/// Request to update a supplier
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, Default)]
pub struct UpdateSupplierRequest {
    #[validate(length(min = 1, max = 100, message = "Supplier name must be between 1 and 100 characters"))]
    pub name:                    Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"))]
    pub description:             Option<String>,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone:                   Option<String>,
    pub address:                 Option<Address>,
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website:                 Option<String>,
    pub delivery_available:      Option<bool>,
    #[validate(custom(function = validate_non_negative))]
    pub delivery_cost:           Option<Decimal>,
    #[validate(range(min = 0, message = "Estimated delivery days cannot be negative"))]
    pub delivery_estimated_days: Option<i32>,
    pub logo:                    Option<ImageRef>,
}

/// Delivery terms of a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliverySummary {
    pub available:      bool,
    pub cost:           Decimal,
    pub estimated_days: i32,
}

/// Supplier rating summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierRating {
    pub average: Decimal,
    pub count:   i32,
}

/// One offered material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialDetail {
    pub id:           String,
    pub name:         String,
    pub description:  Option<String>,
    pub category:     String,
    pub price:        Decimal,
    pub unit:         String,
    pub stock:        i32,
    pub images:       Vec<ImageRef>,
    pub is_available: bool,
}

/// Full supplier detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierDetail {
    /// Supplier's unique identifier
    pub id:               String,
    /// Supplier name
    pub name:             String,
    /// Supplier description
    pub description:      String,
    /// Contact email
    pub email:            String,
    /// Contact phone
    pub phone:            String,
    /// Postal address
    pub address:          Option<Address>,
    /// Website
    pub website:          Option<String>,
    /// Approval status
    pub status:           String,
    /// Offered materials
    pub materials:        Vec<MaterialDetail>,
    /// Rating summary
    pub rating:           SupplierRating,
    /// Delivery terms
    pub delivery:         DeliverySummary,
    /// Logo reference
    pub logo:             Option<ImageRef>,
    /// Approving admin
    pub approved_by:      Option<String>,
    /// Approval timestamp
    pub approved_at:      Option<String>,
    /// Rejection reason, if rejected
    pub rejection_reason: Option<String>,
    /// Creation timestamp
    pub created_at:       String,
}

/// Response for a single supplier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierResponse {
    /// Whether the operation was successful
    pub success:  bool,
    /// The supplier
    pub supplier: SupplierDetail,
}

/// Response for supplier listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierListResponse {
    /// Whether the operation was successful
    pub success:   bool,
    /// Number of suppliers returned
    pub count:     usize,
    /// The suppliers, newest first
    pub suppliers: Vec<SupplierDetail>,
}

/// Supplier summary attached to a flattened material hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSupplierSummary {
    pub id:       String,
    pub name:     String,
    pub delivery: DeliverySummary,
    pub rating:   SupplierRating,
}

/// One hit of the flattened material search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialHit {
    #[serde(flatten)]
    pub material: MaterialDetail,
    pub supplier: MaterialSupplierSummary,
}

/// Response for the flattened material search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSearchResponse {
    /// Whether the operation was successful
    pub success:   bool,
    /// Number of materials returned
    pub count:     usize,
    /// The matching materials
    pub materials: Vec<MaterialHit>,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn valid_material() -> MaterialRequest {
        MaterialRequest {
            name:         "Merino Yarn".to_string(),
            description:  Some("Soft merino wool".to_string()),
            category:     "yarn".to_string(),
            price:        Decimal::new(1250, 2),
            unit:         "kilogram".to_string(),
            stock:        Some(40),
            images:       None,
            is_available: None,
        }
    }

    fn valid_supplier() -> RegisterSupplierRequest {
        RegisterSupplierRequest {
            name:                    "Fes Textiles".to_string(),
            description:             "Wholesale textile supplier".to_string(),
            email:                   "sales@festextiles.example".to_string(),
            phone:                   "+212-555-0202".to_string(),
            address:                 None,
            website:                 None,
            materials:               Some(vec![valid_material()]),
            delivery_available:      Some(true),
            delivery_cost:           Some(Decimal::new(500, 2)),
            delivery_estimated_days: Some(5),
            logo:                    None,
        }
    }

    #[test]
    fn test_register_supplier_valid() {
        assert!(valid_supplier().validate().is_ok());
    }

    #[test]
    fn test_material_unknown_category() {
        let material = MaterialRequest {
            category: "plastic".to_string(),
            ..valid_material()
        };
        assert!(material.validate().is_err());
    }

    #[test]
    fn test_material_unknown_unit() {
        let material = MaterialRequest {
            unit: "bucket".to_string(),
            ..valid_material()
        };
        assert!(material.validate().is_err());
    }

    #[test]
    fn test_nested_material_errors_bubble_up() {
        let supplier = RegisterSupplierRequest {
            materials: Some(vec![MaterialRequest {
                name: String::new(),
                price: Decimal::new(-100, 2),
                ..valid_material()
            }]),
            ..valid_supplier()
        };
        assert!(supplier.validate().is_err());
    }

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("dozen"), Some(MaterialUnit::Dozen));
        assert!(parse_unit("bucket").is_none());
    }
}
