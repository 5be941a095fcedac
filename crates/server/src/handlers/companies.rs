//! # Company Handlers
//!
//! Partner-organization registration, admin approval with moderator
//! provisioning, and company-scoped reporting.

use std::str::FromStr;

use auth::{generate_temp_password, hash_password, secrecy::ExposeSecret, secrecy::SecretString};
use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    companies::{Column as CompanyColumn, Entity as CompaniesEntity},
    order_items::{Column as ItemColumn, Entity as OrderItemsEntity},
    orders::{Column as OrderColumn, Entity as OrdersEntity},
    products::{Column as ProductColumn, Entity as ProductsEntity},
    sea_orm_active_enums::{ApprovalStatus, OrderStatus, ProductCategory, ProductStatus, UserRole},
    users::{Column as UserColumn, Entity as UsersEntity},
};
use error::{AppError, Result};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, ExprTrait, Func},
    ActiveModelTrait,
    ColumnTrait,
    Condition,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        auth::SuccessResponse,
        companies::{
            ApproveCompanyRequest,
            ApproveCompanyResponse,
            CompanyArtisansResponse,
            CompanyDetail,
            CompanyListQuery,
            CompanyListResponse,
            CompanyProductsQuery,
            CompanyResponse,
            CompanyStats,
            CompanyStatsResponse,
            FromStrLoose,
            ModeratorCredentials,
            RegisterCompanyRequest,
            RejectRequest,
            UpdateCompanyRequest,
        },
        users::{user_model_to_detail, UserDetail},
    },
    handlers::{catalog::product_model_to_detail, orders::order_model_to_detail},
    middleware::{auth::AuthenticatedUser, roles},
    utils::like_pattern,
    AppState,
};

use entity::sea_orm_active_enums::{BusinessType, FocusArea};

/// List companies with filters (public)
pub async fn list_companies_handler(state: &AppState, query: CompanyListQuery) -> Result<Json<CompanyListResponse>> {
    let mut base_query = CompaniesEntity::find();

    if let Some(ref status) = query.status {
        let status = ApprovalStatus::from_str(status).map_err(|_| AppError::bad_request("Invalid status filter"))?;
        base_query = base_query.filter(CompanyColumn::Status.eq(status));
    }
    if let Some(ref business_type) = query.business_type {
        let business_type = BusinessType::from_str_loose(business_type)
            .ok_or_else(|| AppError::bad_request("Invalid business type filter"))?;
        base_query = base_query.filter(CompanyColumn::BusinessType.eq(business_type));
    }
    if let Some(ref focus_area) = query.focus_area {
        let focus_area = FocusArea::from_str_loose(focus_area)
            .ok_or_else(|| AppError::bad_request("Invalid focus area filter"))?;
        base_query = base_query.filter(CompanyColumn::FocusArea.eq(focus_area));
    }
    if let Some(ref search) = query.search {
        let pattern = like_pattern(search);
        base_query = base_query.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        CompaniesEntity,
                        CompanyColumn::Name,
                    ))))
                    .like(&pattern),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        CompaniesEntity,
                        CompanyColumn::Description,
                    ))))
                    .like(&pattern),
                ),
        );
    }

    let companies = base_query
        .order_by_desc(CompanyColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details: Vec<CompanyDetail> = companies.iter().map(company_model_to_detail).collect();

    Ok(Json(CompanyListResponse {
        success:   true,
        count:     details.len(),
        companies: details,
    }))
}

/// Get a single company (public)
pub async fn get_company_handler(state: &AppState, company_id: &str) -> Result<Json<CompanyResponse>> {
    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    Ok(Json(CompanyResponse {
        success: true,
        company: company_model_to_detail(&company),
    }))
}

/// Register a partner organization (public)
///
/// Registration lands in `pending` and waits for admin review.
pub async fn register_company_handler(
    state: &AppState,
    req: RegisterCompanyRequest,
) -> Result<(StatusCode, Json<CompanyResponse>)> {
    req.validate()?;

    let email = req.email.to_lowercase();
    let existing = CompaniesEntity::find()
        .filter(CompanyColumn::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("A company with this email already exists"));
    }

    // validate() vouched for both enum strings
    let business_type = BusinessType::from_str_loose(&req.business_type)
        .ok_or_else(|| AppError::bad_request("Invalid business type"))?;
    let focus_area =
        FocusArea::from_str_loose(&req.focus_area).ok_or_else(|| AppError::bad_request("Invalid focus area"))?;

    let now = Utc::now();
    let company = entity::companies::ActiveModel {
        id: Set(entity::new_id("com")),
        name: Set(req.name),
        description: Set(req.description),
        email: Set(email),
        phone: Set(req.phone),
        address: Set(req.address),
        website: Set(req.website),
        business_type: Set(business_type),
        focus_area: Set(focus_area),
        status: Set(ApprovalStatus::Pending),
        moderator_id: Set(None),
        stats_total_artisans: Set(0),
        stats_total_products: Set(0),
        stats_total_sales: Set(Decimal::ZERO),
        stats_total_orders: Set(0),
        logo: Set(req.logo),
        approved_by: Set(None),
        approved_at: Set(None),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = company
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to register company: {}", e)))?;

    info!(company_id = %created.id, "Company registered, awaiting review");

    Ok((
        StatusCode::CREATED,
        Json(CompanyResponse {
            success: true,
            company: company_model_to_detail(&created),
        }),
    ))
}

/// Update a company (admin or the company's own moderator)
pub async fn update_company_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
    req: UpdateCompanyRequest,
) -> Result<Json<CompanyResponse>> {
    req.validate()?;

    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    roles::require_company_scope(&user, &company.id, "update details")?;

    let mut active_model: entity::companies::ActiveModel = company.into();

    if let Some(name) = req.name {
        active_model.name = Set(name);
    }
    if let Some(description) = req.description {
        active_model.description = Set(description);
    }
    if let Some(phone) = req.phone {
        active_model.phone = Set(phone);
    }
    if let Some(address) = req.address {
        active_model.address = Set(Some(address));
    }
    if let Some(website) = req.website {
        active_model.website = Set(Some(website));
    }
    if let Some(logo) = req.logo {
        active_model.logo = Set(Some(logo));
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update company: {}", e)))?;

    info!(company_id = %company_id, user_id = %user.id, "Company updated");

    Ok(Json(CompanyResponse {
        success: true,
        company: company_model_to_detail(&updated),
    }))
}

/// Delete a company (admin only)
pub async fn delete_company_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
) -> Result<Json<SuccessResponse>> {
    roles::require_any(&user, &[UserRole::Admin])?;

    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    CompaniesEntity::delete_by_id(&company.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete company: {}", e)))?;

    info!(company_id = %company_id, user_id = %user.id, "Company deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "Company deleted successfully".to_string(),
    }))
}

/// Approve a company and provision its moderator account (admin only)
///
/// The moderator's temporary password is returned exactly once in this
/// response; only the Argon2 hash is stored.
pub async fn approve_company_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
    req: ApproveCompanyRequest,
) -> Result<Json<ApproveCompanyResponse>> {
    roles::require_any(&user, &[UserRole::Admin])?;
    req.validate()?;

    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    let moderator_name = req
        .moderator_name
        .unwrap_or_else(|| format!("{} Moderator", company.name));
    let moderator_email = req
        .moderator_email
        .unwrap_or_else(|| company.email.clone())
        .to_lowercase();

    let existing = UsersEntity::find()
        .filter(UserColumn::Email.eq(&moderator_email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict(
            "An account with the moderator email already exists",
        ));
    }

    let temp_password = match req.moderator_password {
        Some(password) => SecretString::from(password),
        None => generate_temp_password(),
    };
    let password_hash = hash_password(&temp_password, None)
        .map_err(|e| AppError::internal(format!("Failed to hash moderator password: {}", e)))?;

    let txn = state.db.begin().await?;
    let now = Utc::now();

    let moderator = entity::users::ActiveModel {
        id: Set(entity::new_id("usr")),
        name: Set(moderator_name),
        email: Set(moderator_email.clone()),
        password_hash: Set(password_hash.expose_secret().to_string()),
        role: Set(UserRole::CompanyModerator),
        status: Set(ApprovalStatus::Approved),
        profile: Set(None),
        company_id: Set(Some(company.id.clone())),
        is_company_moderator: Set(true),
        earnings_total: Set(Decimal::ZERO),
        earnings_pending: Set(Decimal::ZERO),
        earnings_paid: Set(Decimal::ZERO),
        stats_total_products: Set(0),
        stats_total_sales: Set(Decimal::ZERO),
        stats_total_orders: Set(0),
        stats_average_rating: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created_moderator = moderator
        .insert(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to provision moderator: {}", e)))?;

    let mut active_model: entity::companies::ActiveModel = company.into();
    active_model.status = Set(ApprovalStatus::Approved);
    active_model.moderator_id = Set(Some(created_moderator.id.clone()));
    active_model.approved_by = Set(Some(user.id.clone()));
    active_model.approved_at = Set(Some(now));
    active_model.rejection_reason = Set(None);
    active_model.updated_at = Set(now);

    let approved = active_model
        .update(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to approve company: {}", e)))?;

    txn.commit().await?;

    info!(
        company_id = %company_id,
        moderator_id = %created_moderator.id,
        admin_id = %user.id,
        "Company approved, moderator provisioned"
    );

    Ok(Json(ApproveCompanyResponse {
        success:   true,
        company:   company_model_to_detail(&approved),
        moderator: ModeratorCredentials {
            id:            created_moderator.id,
            email:         moderator_email,
            temp_password: temp_password.expose_secret().to_string(),
        },
    }))
}

/// Reject a company (admin only); the reason is stored verbatim
pub async fn reject_company_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
    req: RejectRequest,
) -> Result<Json<CompanyResponse>> {
    roles::require_any(&user, &[UserRole::Admin])?;
    req.validate()?;

    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    let mut active_model: entity::companies::ActiveModel = company.into();
    active_model.status = Set(ApprovalStatus::Rejected);
    active_model.rejection_reason = Set(Some(req.reason));
    active_model.updated_at = Set(Utc::now());

    let rejected = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to reject company: {}", e)))?;

    info!(company_id = %company_id, admin_id = %user.id, "Company rejected");

    Ok(Json(CompanyResponse {
        success: true,
        company: company_model_to_detail(&rejected),
    }))
}

/// Company statistics (admin or the company's own moderator)
///
/// Recomputes the artisan and product counters on demand, persists them,
/// and reports delivered revenue plus the five most recent orders.
pub async fn company_stats_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
) -> Result<Json<CompanyStatsResponse>> {
    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    roles::require_company_scope(&user, &company.id, "view stats")?;

    let total_artisans = UsersEntity::find()
        .filter(UserColumn::CompanyId.eq(company.id.clone()))
        .filter(UserColumn::Role.eq(UserRole::Seller))
        .count(&state.db)
        .await? as i32;

    let total_products = ProductsEntity::find()
        .filter(ProductColumn::CompanyId.eq(company.id.clone()))
        .filter(ProductColumn::IsActive.eq(true))
        .count(&state.db)
        .await? as i32;

    let total_orders = OrdersEntity::find()
        .filter(OrderColumn::CompanyId.eq(company.id.clone()))
        .count(&state.db)
        .await? as i32;

    let total_revenue: Option<Decimal> = OrdersEntity::find()
        .select_only()
        .column_as(OrderColumn::TotalAmount.sum(), "revenue")
        .filter(OrderColumn::CompanyId.eq(company.id.clone()))
        .filter(OrderColumn::Status.eq(OrderStatus::Delivered))
        .into_tuple()
        .one(&state.db)
        .await?
        .flatten();

    let recent = OrdersEntity::find()
        .filter(OrderColumn::CompanyId.eq(company.id.clone()))
        .order_by_desc(OrderColumn::CreatedAt)
        .limit(5)
        .all(&state.db)
        .await?;

    let order_ids: Vec<String> = recent.iter().map(|o| o.id.clone()).collect();
    let items = if order_ids.is_empty() {
        Vec::new()
    }
    else {
        OrderItemsEntity::find()
            .filter(ItemColumn::OrderId.is_in(order_ids))
            .all(&state.db)
            .await?
    };
    let recent_orders = recent
        .iter()
        .map(|order| {
            let order_items: Vec<entity::order_items::Model> = items
                .iter()
                .filter(|item| item.order_id == order.id)
                .cloned()
                .collect();
            order_model_to_detail(order, &order_items)
        })
        .collect();

    // Persist the recomputed counters; sales/orders stay incrementally
    // maintained by the order workflow
    let stats_total_sales = company.stats_total_sales;
    let mut active_model: entity::companies::ActiveModel = company.into();
    active_model.stats_total_artisans = Set(total_artisans);
    active_model.stats_total_products = Set(total_products);
    active_model.stats_total_orders = Set(total_orders);
    active_model.updated_at = Set(Utc::now());
    active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to persist company stats: {}", e)))?;

    Ok(Json(CompanyStatsResponse {
        success:       true,
        stats:         CompanyStats {
            total_artisans,
            total_products,
            total_sales: stats_total_sales,
            total_orders,
        },
        total_revenue: total_revenue.unwrap_or(Decimal::ZERO),
        recent_orders,
    }))
}

/// List a company's artisans (admin or the company's own moderator)
pub async fn company_artisans_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
) -> Result<Json<CompanyArtisansResponse>> {
    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    roles::require_company_scope(&user, &company.id, "view artisans")?;

    let artisans = UsersEntity::find()
        .filter(UserColumn::CompanyId.eq(company.id.clone()))
        .filter(UserColumn::Role.eq(UserRole::Seller))
        .order_by_asc(UserColumn::Name)
        .all(&state.db)
        .await?;

    let details: Vec<UserDetail> = artisans.iter().map(user_model_to_detail).collect();

    Ok(Json(CompanyArtisansResponse {
        success:  true,
        count:    details.len(),
        artisans: details,
    }))
}

/// List a company's products (admin or the company's own moderator)
pub async fn company_products_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
    query: CompanyProductsQuery,
) -> Result<Json<crate::dto::products::ProductListResponse>> {
    let company = CompaniesEntity::find_by_id(company_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Company not found"))?;

    roles::require_company_scope(&user, &company.id, "view products")?;

    let mut base_query = ProductsEntity::find().filter(ProductColumn::CompanyId.eq(company.id.clone()));

    if let Some(ref status) = query.status {
        let status = ProductStatus::from_str(status).map_err(|_| AppError::bad_request("Invalid status filter"))?;
        base_query = base_query.filter(ProductColumn::Status.eq(status));
    }
    if let Some(ref category) = query.category {
        let category =
            ProductCategory::from_str(category).map_err(|_| AppError::bad_request("Invalid category filter"))?;
        base_query = base_query.filter(ProductColumn::Category.eq(category));
    }
    if let Some(ref search) = query.search {
        let pattern = like_pattern(search);
        base_query = base_query.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        ProductsEntity,
                        ProductColumn::Name,
                    ))))
                    .like(&pattern),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        ProductsEntity,
                        ProductColumn::Description,
                    ))))
                    .like(&pattern),
                ),
        );
    }

    let products = base_query
        .order_by_desc(ProductColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details: Vec<crate::dto::products::ProductDetail> = products.iter().map(product_model_to_detail).collect();
    let count = details.len() as u64;

    Ok(Json(crate::dto::products::ProductListResponse {
        success:      true,
        count:        details.len(),
        products:     details,
        total_pages:  if count == 0 { 0 } else { 1 },
        current_page: 1,
        total:        count,
    }))
}

/// Convert a company entity model to the response shape.
pub fn company_model_to_detail(company: &entity::companies::Model) -> CompanyDetail {
    CompanyDetail {
        id:               company.id.clone(),
        name:             company.name.clone(),
        description:      company.description.clone(),
        email:            company.email.clone(),
        phone:            company.phone.clone(),
        address:          company.address.clone(),
        website:          company.website.clone(),
        business_type:    company.business_type.to_string(),
        focus_area:       company.focus_area.to_string(),
        status:           company.status.to_string(),
        moderator_id:     company.moderator_id.clone(),
        stats:            CompanyStats {
            total_artisans: company.stats_total_artisans,
            total_products: company.stats_total_products,
            total_sales:    company.stats_total_sales,
            total_orders:   company.stats_total_orders,
        },
        logo:             company.logo.clone(),
        approved_by:      company.approved_by.clone(),
        approved_at:      company.approved_at.map(|at| at.to_rfc3339()),
        rejection_reason: company.rejection_reason.clone(),
        created_at:       company.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_model_to_detail() {
        let company = entity::companies::Model {
            id:                   "com_1".to_string(),
            name:                 "Atlas Artisans".to_string(),
            description:          "Cooperative of weavers".to_string(),
            email:                "contact@atlas.example".to_string(),
            phone:                "+212-555-0101".to_string(),
            address:              None,
            website:              None,
            business_type:        BusinessType::Cooperative,
            focus_area:           FocusArea::WomenEmpowerment,
            status:               ApprovalStatus::Pending,
            moderator_id:         None,
            stats_total_artisans: 3,
            stats_total_products: 12,
            stats_total_sales:    Decimal::new(150000, 2),
            stats_total_orders:   40,
            logo:                 None,
            approved_by:          None,
            approved_at:          None,
            rejection_reason:     None,
            created_at:           Utc::now(),
            updated_at:           Utc::now(),
        };

        let detail = company_model_to_detail(&company);
        assert_eq!(detail.business_type, "cooperative");
        assert_eq!(detail.focus_area, "women_empowerment");
        assert_eq!(detail.status, "pending");
        assert_eq!(detail.stats.total_products, 12);
        assert!(detail.approved_at.is_none());
    }
}
