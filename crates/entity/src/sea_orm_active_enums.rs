//! Active enum definitions shared across entities.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role enumeration
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular customer account
    #[sea_orm(string_value = "user")]
    User,
    /// Artisan account allowed to list products
    #[sea_orm(string_value = "seller")]
    Seller,
    /// Provisioned at company approval, scoped to that company
    #[sea_orm(string_value = "company_moderator")]
    CompanyModerator,
    /// Platform administrator
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "user"),
            UserRole::Seller => write!(f, "seller"),
            UserRole::CompanyModerator => write!(f, "company_moderator"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "seller" => Ok(UserRole::Seller),
            "company_moderator" => Ok(UserRole::CompanyModerator),
            "admin" => Ok(UserRole::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Approval lifecycle shared by users, companies and material suppliers
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting admin review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved and operational
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected with a stored reason
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Declared but not reachable through any reviewed operation
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
            ApprovalStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            "suspended" => Ok(ApprovalStatus::Suspended),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Product moderation status
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_status")]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductStatus::Draft => write!(f, "draft"),
            ProductStatus::Pending => write!(f, "pending"),
            ProductStatus::Approved => write!(f, "approved"),
            ProductStatus::Rejected => write!(f, "rejected"),
            ProductStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProductStatus::Draft),
            "pending" => Ok(ProductStatus::Pending),
            "approved" => Ok(ProductStatus::Approved),
            "rejected" => Ok(ProductStatus::Rejected),
            "suspended" => Ok(ProductStatus::Suspended),
            other => Err(format!("unknown product status '{}'", other)),
        }
    }
}

/// Product catalog category
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_category")]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    #[sea_orm(string_value = "clothing")]
    Clothing,
    #[sea_orm(string_value = "jewelry")]
    Jewelry,
    #[sea_orm(string_value = "home-decor")]
    HomeDecor,
    #[sea_orm(string_value = "art")]
    Art,
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "other")]
    Other,
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Clothing => write!(f, "clothing"),
            ProductCategory::Jewelry => write!(f, "jewelry"),
            ProductCategory::HomeDecor => write!(f, "home-decor"),
            ProductCategory::Art => write!(f, "art"),
            ProductCategory::Food => write!(f, "food"),
            ProductCategory::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothing" => Ok(ProductCategory::Clothing),
            "jewelry" => Ok(ProductCategory::Jewelry),
            "home-decor" => Ok(ProductCategory::HomeDecor),
            "art" => Ok(ProductCategory::Art),
            "food" => Ok(ProductCategory::Food),
            "other" => Ok(ProductCategory::Other),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

/// Order fulfilment status
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "returned")]
    Returned,
}

impl OrderStatus {
    /// Whether a transition from `self` to `next` is legal.
    ///
    /// A same-state transition is always allowed and handled as a no-op by
    /// callers, so re-delivering a delivered order never re-applies
    /// commission.
    #[must_use]
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        use OrderStatus::{Cancelled, Confirmed, Delivered, Pending, Processing, Returned, Shipped};

        if self == next {
            return true;
        }

        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Processing)
                | (Confirmed, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
                | (Delivered, Returned)
        )
    }

    /// Whether no further transition can leave this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool { matches!(self, OrderStatus::Cancelled | OrderStatus::Returned) }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Returned => write!(f, "returned"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "returned" => Ok(OrderStatus::Returned),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

/// Supported payment methods
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "stripe")]
    Stripe,
    #[sea_orm(string_value = "chapa")]
    Chapa,
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    #[sea_orm(string_value = "cash_on_delivery")]
    CashOnDelivery,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Stripe => write!(f, "stripe"),
            PaymentMethod::Chapa => write!(f, "chapa"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::CashOnDelivery => write!(f, "cash_on_delivery"),
        }
    }
}

/// Payment settlement status
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

/// Partner organization legal form
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "business_type")]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    #[sea_orm(string_value = "ngo")]
    Ngo,
    #[sea_orm(string_value = "cooperative")]
    Cooperative,
    #[sea_orm(string_value = "private_company")]
    PrivateCompany,
    #[sea_orm(string_value = "government_organization")]
    GovernmentOrganization,
    #[sea_orm(string_value = "other")]
    Other,
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusinessType::Ngo => write!(f, "ngo"),
            BusinessType::Cooperative => write!(f, "cooperative"),
            BusinessType::PrivateCompany => write!(f, "private_company"),
            BusinessType::GovernmentOrganization => write!(f, "government_organization"),
            BusinessType::Other => write!(f, "other"),
        }
    }
}

/// Partner organization focus area
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "focus_area")]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    #[sea_orm(string_value = "women_empowerment")]
    WomenEmpowerment,
    #[sea_orm(string_value = "disability_support")]
    DisabilitySupport,
    #[sea_orm(string_value = "artisan_development")]
    ArtisanDevelopment,
    #[sea_orm(string_value = "rural_development")]
    RuralDevelopment,
    #[sea_orm(string_value = "other")]
    Other,
}

impl std::fmt::Display for FocusArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusArea::WomenEmpowerment => write!(f, "women_empowerment"),
            FocusArea::DisabilitySupport => write!(f, "disability_support"),
            FocusArea::ArtisanDevelopment => write!(f, "artisan_development"),
            FocusArea::RuralDevelopment => write!(f, "rural_development"),
            FocusArea::Other => write!(f, "other"),
        }
    }
}

/// Raw material category
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "material_category")]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    #[sea_orm(string_value = "fabric")]
    Fabric,
    #[sea_orm(string_value = "yarn")]
    Yarn,
    #[sea_orm(string_value = "beads")]
    Beads,
    #[sea_orm(string_value = "wood")]
    Wood,
    #[sea_orm(string_value = "metal")]
    Metal,
    #[sea_orm(string_value = "clay")]
    Clay,
    #[sea_orm(string_value = "paint")]
    Paint,
    #[sea_orm(string_value = "tools")]
    Tools,
    #[sea_orm(string_value = "other")]
    Other,
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialCategory::Fabric => write!(f, "fabric"),
            MaterialCategory::Yarn => write!(f, "yarn"),
            MaterialCategory::Beads => write!(f, "beads"),
            MaterialCategory::Wood => write!(f, "wood"),
            MaterialCategory::Metal => write!(f, "metal"),
            MaterialCategory::Clay => write!(f, "clay"),
            MaterialCategory::Paint => write!(f, "paint"),
            MaterialCategory::Tools => write!(f, "tools"),
            MaterialCategory::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for MaterialCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fabric" => Ok(MaterialCategory::Fabric),
            "yarn" => Ok(MaterialCategory::Yarn),
            "beads" => Ok(MaterialCategory::Beads),
            "wood" => Ok(MaterialCategory::Wood),
            "metal" => Ok(MaterialCategory::Metal),
            "clay" => Ok(MaterialCategory::Clay),
            "paint" => Ok(MaterialCategory::Paint),
            "tools" => Ok(MaterialCategory::Tools),
            "other" => Ok(MaterialCategory::Other),
            other => Err(format!("unknown material category '{}'", other)),
        }
    }
}

/// Raw material sale unit
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "material_unit")]
#[serde(rename_all = "snake_case")]
pub enum MaterialUnit {
    #[sea_orm(string_value = "piece")]
    Piece,
    #[sea_orm(string_value = "meter")]
    Meter,
    #[sea_orm(string_value = "kilogram")]
    Kilogram,
    #[sea_orm(string_value = "liter")]
    Liter,
    #[sea_orm(string_value = "set")]
    Set,
    #[sea_orm(string_value = "dozen")]
    Dozen,
}

impl std::fmt::Display for MaterialUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialUnit::Piece => write!(f, "piece"),
            MaterialUnit::Meter => write!(f, "meter"),
            MaterialUnit::Kilogram => write!(f, "kilogram"),
            MaterialUnit::Liter => write!(f, "liter"),
            MaterialUnit::Set => write!(f, "set"),
            MaterialUnit::Dozen => write!(f, "dozen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_order_status_forward_edges() {
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Confirmed));
        assert!(OrderStatus::Confirmed.can_transition_to(&OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(&OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(&OrderStatus::Delivered));
        assert!(OrderStatus::Delivered.can_transition_to(&OrderStatus::Returned));
    }

    #[test]
    fn test_order_status_cancellation_edges() {
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Cancelled));
        assert!(OrderStatus::Confirmed.can_transition_to(&OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_transition_to(&OrderStatus::Cancelled));
        // Too late to cancel once shipped
        assert!(!OrderStatus::Shipped.can_transition_to(&OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(&OrderStatus::Cancelled));
    }

    #[test]
    fn test_order_status_illegal_edges() {
        assert!(!OrderStatus::Pending.can_transition_to(&OrderStatus::Delivered));
        assert!(!OrderStatus::Pending.can_transition_to(&OrderStatus::Shipped));
        assert!(!OrderStatus::Delivered.can_transition_to(&OrderStatus::Pending));
        assert!(!OrderStatus::Cancelled.can_transition_to(&OrderStatus::Confirmed));
        assert!(!OrderStatus::Returned.can_transition_to(&OrderStatus::Delivered));
    }

    #[test]
    fn test_order_status_same_state_allowed() {
        assert!(OrderStatus::Delivered.can_transition_to(&OrderStatus::Delivered));
        assert!(OrderStatus::Pending.can_transition_to(&OrderStatus::Pending));
        assert!(OrderStatus::Cancelled.can_transition_to(&OrderStatus::Cancelled));
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Returned.is_terminal());
        assert!(!OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::User,
            UserRole::Seller,
            UserRole::CompanyModerator,
            UserRole::Admin,
        ] {
            assert_eq!(UserRole::from_str(&role.to_string()).unwrap(), role);
        }
        assert!(UserRole::from_str("superuser").is_err());
    }

    #[test]
    fn test_order_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ] {
            assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_category_hyphenated_value() {
        assert_eq!(
            ProductCategory::from_str("home-decor").unwrap(),
            ProductCategory::HomeDecor
        );
        assert_eq!(ProductCategory::HomeDecor.to_string(), "home-decor");
    }
}
