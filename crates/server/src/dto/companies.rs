//! # Company Data Transfer Objects
//!
//! Request and response types for partner-organization registration and the
//! admin approval workflow.

use entity::{
    sea_orm_active_enums::{BusinessType, FocusArea},
    types::{Address, ImageRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{orders::OrderDetail, users::UserDetail};

/// Query parameters for the company listing
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyListQuery {
    /// Status filter
    pub status:        Option<String>,
    /// Business type filter
    pub business_type: Option<String>,
    /// Focus area filter
    pub focus_area:    Option<String>,
    /// Case-insensitive match on name and description
    pub search:        Option<String>,
}

/// Query parameters for a company's product listing
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyProductsQuery {
    pub status:   Option<String>,
    pub category: Option<String>,
    pub search:   Option<String>,
}

/// Validate a business type string against the known set.
pub fn validate_business_type(value: &str) -> Result<(), ValidationError> {
    if BusinessType::from_str_loose(value).is_some() {
        Ok(())
    }
    else {
        let mut err = ValidationError::new("unknown_business_type");
        err.message =
            Some("Business type must be one of: ngo, cooperative, private_company, government_organization, other".into());
        Err(err)
    }
}

/// Validate a focus area string against the known set.
pub fn validate_focus_area(value: &str) -> Result<(), ValidationError> {
    if FocusArea::from_str_loose(value).is_some() {
        Ok(())
    }
    else {
        let mut err = ValidationError::new("unknown_focus_area");
        err.message = Some(
            "Focus area must be one of: women_empowerment, disability_support, artisan_development, \
             rural_development, other"
                .into(),
        );
        Err(err)
    }
}

/// Loose parsing helpers so registration forms can send either wire values
/// or display variants.
pub trait FromStrLoose: Sized {
    fn from_str_loose(value: &str) -> Option<Self>;
}

impl FromStrLoose for BusinessType {
    fn from_str_loose(value: &str) -> Option<Self> {
        match value.to_lowercase().replace([' ', '-'], "_").as_str() {
            "ngo" => Some(BusinessType::Ngo),
            "cooperative" => Some(BusinessType::Cooperative),
            "private_company" => Some(BusinessType::PrivateCompany),
            "government_organization" => Some(BusinessType::GovernmentOrganization),
            "other" => Some(BusinessType::Other),
            _ => None,
        }
    }
}

impl FromStrLoose for FocusArea {
    fn from_str_loose(value: &str) -> Option<Self> {
        match value.to_lowercase().replace([' ', '-'], "_").as_str() {
            "women_empowerment" => Some(FocusArea::WomenEmpowerment),
            "disability_support" => Some(FocusArea::DisabilitySupport),
            "artisan_development" => Some(FocusArea::ArtisanDevelopment),
            "rural_development" => Some(FocusArea::RuralDevelopment),
            "other" => Some(FocusArea::Other),
            _ => None,
        }
    }
}

/// Request to register a partner organization
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RegisterCompanyRequest {
    /// Company name
    #[validate(length(min = 1, max = 100, message = "Company name must be between 1 and 100 characters"))]
    pub name:          String,
    /// Company description
    #[validate(length(min = 1, max = 1000, message = "Company description must be between 1 and 1000 characters"))]
    pub description:   String,
    /// Contact email
    #[validate(email(message = "Please enter a valid email"))]
    pub email:         String,
    /// Contact phone
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone:         String,
    /// Postal address
    pub address:       Option<Address>,
    /// Company website
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website:       Option<String>,
    /// Legal form
    #[validate(custom(function = validate_business_type))]
    pub business_type: String,
    /// Mission focus
    #[validate(custom(function = validate_focus_area))]
    pub focus_area:    String,
    /// Uploaded logo reference
    pub logo:          Option<ImageRef>,
}

/// Request to update a company
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, Default)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, max = 100, message = "Company name must be between 1 and 100 characters"))]
    pub name:        Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Company description must be between 1 and 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone:       Option<String>,
    pub address:     Option<Address>,
    #[validate(url(message = "Please enter a valid website URL"))]
    pub website:     Option<String>,
    pub logo:        Option<ImageRef>,
}

/// Request accompanying an approval: optional moderator hand-off details
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, Default)]
pub struct ApproveCompanyRequest {
    /// Moderator display name (default: "<company> Moderator")
    pub moderator_name:     Option<String>,
    /// Moderator email (default: the company's contact email)
    #[validate(email(message = "Please enter a valid moderator email"))]
    pub moderator_email:    Option<String>,
    /// Temporary password (default: generated)
    #[validate(length(min = 6, message = "Moderator password must be at least 6 characters"))]
    pub moderator_password: Option<String>,
}

/// Request to reject a company or supplier
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct RejectRequest {
    /// Reason, stored verbatim
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub reason: String,
}

/// Aggregated company statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyStats {
    pub total_artisans: i32,
    pub total_products: i32,
    pub total_sales:    Decimal,
    pub total_orders:   i32,
}

/// Full company detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    /// Company's unique identifier
    pub id:               String,
    /// Company name
    pub name:             String,
    /// Company description
    pub description:      String,
    /// Contact email
    pub email:            String,
    /// Contact phone
    pub phone:            String,
    /// Postal address
    pub address:          Option<Address>,
    /// Company website
    pub website:          Option<String>,
    /// Legal form
    pub business_type:    String,
    /// Mission focus
    pub focus_area:       String,
    /// Approval status
    pub status:           String,
    /// Provisioned moderator, if approved
    pub moderator_id:     Option<String>,
    /// Aggregated statistics
    pub stats:            CompanyStats,
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

/// Response for a single company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// The company
    pub company: CompanyDetail,
}

/// Response for the company listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyListResponse {
    /// Whether the operation was successful
    pub success:   bool,
    /// Number of companies returned
    pub count:     usize,
    /// The companies, newest first
    pub companies: Vec<CompanyDetail>,
}

/// One-time moderator hand-off returned from approval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeratorCredentials {
    /// Provisioned account ID
    pub id:            String,
    /// Login email
    pub email:         String,
    /// Plaintext temporary password; only the hash is stored
    pub temp_password: String,
}

/// Response for a company approval
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApproveCompanyResponse {
    /// Whether the operation was successful
    pub success:   bool,
    /// The approved company
    pub company:   CompanyDetail,
    /// Credentials for the provisioned moderator
    pub moderator: ModeratorCredentials,
}

/// Response for the stats endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyStatsResponse {
    /// Whether the operation was successful
    pub success:       bool,
    /// Recomputed statistics
    pub stats:         CompanyStats,
    /// Revenue over delivered orders
    pub total_revenue: Decimal,
    /// Five most recent orders
    pub recent_orders: Vec<OrderDetail>,
}

/// Response for a company's artisan listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyArtisansResponse {
    /// Whether the operation was successful
    pub success:  bool,
    /// Number of artisans
    pub count:    usize,
    /// The artisans
    pub artisans: Vec<UserDetail>,
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn valid_registration() -> RegisterCompanyRequest {
        RegisterCompanyRequest {
            name:          "Atlas Artisans Cooperative".to_string(),
            description:   "A cooperative of weavers".to_string(),
            email:         "contact@atlas.example".to_string(),
            phone:         "+212-555-0101".to_string(),
            address:       None,
            website:       Some("https://atlas.example".to_string()),
            business_type: "cooperative".to_string(),
            focus_area:    "women_empowerment".to_string(),
            logo:          None,
        }
    }

    #[test]
    fn test_registration_valid() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn test_registration_bad_website() {
        let req = RegisterCompanyRequest {
            website: Some("not-a-url".to_string()),
            ..valid_registration()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_registration_unknown_business_type() {
        let req = RegisterCompanyRequest {
            business_type: "franchise".to_string(),
            ..valid_registration()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("business_type"));
    }

    #[test]
    fn test_loose_parsing_accepts_display_variants() {
        assert_eq!(
            BusinessType::from_str_loose("Private Company"),
            Some(BusinessType::PrivateCompany)
        );
        assert_eq!(
            FocusArea::from_str_loose("Disability Support"),
            Some(FocusArea::DisabilitySupport)
        );
        assert!(BusinessType::from_str_loose("franchise").is_none());
    }

    #[test]
    fn test_reject_requires_reason() {
        let req = RejectRequest {
            reason: String::new(),
        };
        assert!(req.validate().is_err());

        let req = RejectRequest {
            reason: "Missing registration certificate".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_approve_request_defaults_are_valid() {
        assert!(ApproveCompanyRequest::default().validate().is_ok());
    }
}
