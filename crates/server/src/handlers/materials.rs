//! # Material Supplier Handlers
//!
//! Raw-material supplier registration, the admin approve/reject pair (no
//! moderator provisioning here), and material projections for artisans
//! shopping for supplies.

use std::{collections::HashMap, str::FromStr};

use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    material_suppliers::{Column as SupplierColumn, Entity as MaterialSuppliersEntity},
    materials::{Column as MaterialColumn, Entity as MaterialsEntity},
    sea_orm_active_enums::{ApprovalStatus, MaterialCategory, UserRole},
    types::ImageList,
};
use error::{AppError, Result};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        auth::SuccessResponse,
        companies::RejectRequest,
        materials::{
            parse_unit,
            DeliverySummary,
            MaterialDetail,
            MaterialHit,
            MaterialSearchQuery,
            MaterialSearchResponse,
            MaterialSupplierSummary,
            MaterialsByCategoryQuery,
            RegisterSupplierRequest,
            SupplierDetail,
            SupplierListQuery,
            SupplierListResponse,
            SupplierRating,
            SupplierResponse,
            UpdateSupplierRequest,
        },
    },
    middleware::{auth::AuthenticatedUser, roles},
    AppState,
};

/// List material suppliers with filters (public)
pub async fn list_suppliers_handler(state: &AppState, query: SupplierListQuery) -> Result<Json<SupplierListResponse>> {
    let mut base_query = MaterialSuppliersEntity::find();

    if let Some(ref status) = query.status {
        let status = ApprovalStatus::from_str(status).map_err(|_| AppError::bad_request("Invalid status filter"))?;
        base_query = base_query.filter(SupplierColumn::Status.eq(status));
    }

    // Category and material-name filters resolve against the child table
    // first, then narrow the supplier query
    if let Some(ref category) = query.category {
        let category =
            MaterialCategory::from_str(category).map_err(|_| AppError::bad_request("Invalid category filter"))?;
        let supplier_ids = supplier_ids_with_material(state, Some(category), None).await?;
        base_query = base_query.filter(SupplierColumn::Id.is_in(supplier_ids));
    }

    if let Some(ref search) = query.search {
        let needle = search.to_lowercase();
        let supplier_ids = supplier_ids_with_material(state, None, Some(&needle)).await?;
        let pattern = crate::utils::like_pattern(search);

        use sea_orm::sea_query::{Expr, ExprTrait, Func};
        base_query = base_query.filter(
            sea_orm::Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        MaterialSuppliersEntity,
                        SupplierColumn::Name,
                    ))))
                    .like(&pattern),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        MaterialSuppliersEntity,
                        SupplierColumn::Description,
                    ))))
                    .like(&pattern),
                )
                .add(SupplierColumn::Id.is_in(supplier_ids)),
        );
    }

    let suppliers = base_query
        .order_by_desc(SupplierColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details = load_supplier_details(state, suppliers).await?;

    Ok(Json(SupplierListResponse {
        success:   true,
        count:     details.len(),
        suppliers: details,
    }))
}

/// Get a single supplier with its materials (public)
pub async fn get_supplier_handler(state: &AppState, supplier_id: &str) -> Result<Json<SupplierResponse>> {
    let supplier = MaterialSuppliersEntity::find_by_id(supplier_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Material supplier not found"))?;

    let materials = MaterialsEntity::find()
        .filter(MaterialColumn::SupplierId.eq(supplier_id))
        .all(&state.db)
        .await?;

    Ok(Json(SupplierResponse {
        success:  true,
        supplier: supplier_model_to_detail(&supplier, &materials),
    }))
}

/// Register a material supplier with its offered materials (public)
pub async fn register_supplier_handler(
    state: &AppState,
    req: RegisterSupplierRequest,
) -> Result<(StatusCode, Json<SupplierResponse>)> {
    req.validate()?;

    let email = req.email.to_lowercase();
    let existing = MaterialSuppliersEntity::find()
        .filter(SupplierColumn::Email.eq(&email))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("A supplier with this email already exists"));
    }

    let txn = state.db.begin().await?;
    let now = Utc::now();
    let supplier_id = entity::new_id("sup");

    let supplier = entity::material_suppliers::ActiveModel {
        id: Set(supplier_id.clone()),
        name: Set(req.name),
        description: Set(req.description),
        email: Set(email),
        phone: Set(req.phone),
        address: Set(req.address),
        website: Set(req.website),
        status: Set(ApprovalStatus::Pending),
        rating_average: Set(Decimal::ZERO),
        rating_count: Set(0),
        delivery_available: Set(req.delivery_available.unwrap_or(true)),
        delivery_cost: Set(req.delivery_cost.unwrap_or(Decimal::ZERO)),
        delivery_estimated_days: Set(req.delivery_estimated_days.unwrap_or(7)),
        logo: Set(req.logo),
        approved_by: Set(None),
        approved_at: Set(None),
        rejection_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = supplier
        .insert(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to register supplier: {}", e)))?;

    let mut created_materials = Vec::new();
    for material in req.materials.unwrap_or_default() {
        // validate() vouched for both enum strings
        let category = MaterialCategory::from_str(&material.category)
            .map_err(|_| AppError::bad_request("Invalid material category"))?;
        let unit = parse_unit(&material.unit).ok_or_else(|| AppError::bad_request("Invalid material unit"))?;

        let row = entity::materials::ActiveModel {
            id:           Set(entity::new_id("mat")),
            supplier_id:  Set(supplier_id.clone()),
            name:         Set(material.name),
            description:  Set(material.description),
            category:     Set(category),
            price:        Set(material.price),
            unit:         Set(unit),
            stock:        Set(material.stock.unwrap_or(0)),
            images:       Set(material.images.map(ImageList)),
            is_available: Set(material.is_available.unwrap_or(true)),
        };
        let inserted = row
            .insert(&txn)
            .await
            .map_err(|e| AppError::database(format!("Failed to create material: {}", e)))?;
        created_materials.push(inserted);
    }

    txn.commit().await?;

    info!(supplier_id = %created.id, materials = created_materials.len(), "Material supplier registered");

    Ok((
        StatusCode::CREATED,
        Json(SupplierResponse {
            success:  true,
            supplier: supplier_model_to_detail(&created, &created_materials),
        }),
    ))
}

/// Update a supplier (admin/moderator)
pub async fn update_supplier_handler(
    state: &AppState,
    user: AuthenticatedUser,
    supplier_id: &str,
    req: UpdateSupplierRequest,
) -> Result<Json<SupplierResponse>> {
    roles::require_any(&user, &[UserRole::Admin, UserRole::CompanyModerator])?;
    req.validate()?;

    let supplier = MaterialSuppliersEntity::find_by_id(supplier_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Material supplier not found"))?;

    let mut active_model: entity::material_suppliers::ActiveModel = supplier.into();

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
    if let Some(delivery_available) = req.delivery_available {
        active_model.delivery_available = Set(delivery_available);
    }
    if let Some(delivery_cost) = req.delivery_cost {
        active_model.delivery_cost = Set(delivery_cost);
    }
    if let Some(delivery_estimated_days) = req.delivery_estimated_days {
        active_model.delivery_estimated_days = Set(delivery_estimated_days);
    }
    if let Some(logo) = req.logo {
        active_model.logo = Set(Some(logo));
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update supplier: {}", e)))?;

    let materials = MaterialsEntity::find()
        .filter(MaterialColumn::SupplierId.eq(supplier_id))
        .all(&state.db)
        .await?;

    info!(supplier_id = %supplier_id, user_id = %user.id, "Material supplier updated");

    Ok(Json(SupplierResponse {
        success:  true,
        supplier: supplier_model_to_detail(&updated, &materials),
    }))
}

/// Delete a supplier (admin only)
pub async fn delete_supplier_handler(
    state: &AppState,
    user: AuthenticatedUser,
    supplier_id: &str,
) -> Result<Json<SuccessResponse>> {
    roles::require_any(&user, &[UserRole::Admin])?;

    let supplier = MaterialSuppliersEntity::find_by_id(supplier_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Material supplier not found"))?;

    MaterialSuppliersEntity::delete_by_id(&supplier.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete supplier: {}", e)))?;

    info!(supplier_id = %supplier_id, user_id = %user.id, "Material supplier deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "Material supplier deleted successfully".to_string(),
    }))
}

/// Approve a supplier (admin only); unlike companies, no account is
/// provisioned
pub async fn approve_supplier_handler(
    state: &AppState,
    user: AuthenticatedUser,
    supplier_id: &str,
) -> Result<Json<SupplierResponse>> {
    roles::require_any(&user, &[UserRole::Admin])?;

    let supplier = MaterialSuppliersEntity::find_by_id(supplier_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Material supplier not found"))?;

    let now = Utc::now();
    let mut active_model: entity::material_suppliers::ActiveModel = supplier.into();
    active_model.status = Set(ApprovalStatus::Approved);
    active_model.approved_by = Set(Some(user.id.clone()));
    active_model.approved_at = Set(Some(now));
    active_model.rejection_reason = Set(None);
    active_model.updated_at = Set(now);

    let approved = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to approve supplier: {}", e)))?;

    let materials = MaterialsEntity::find()
        .filter(MaterialColumn::SupplierId.eq(supplier_id))
        .all(&state.db)
        .await?;

    info!(supplier_id = %supplier_id, admin_id = %user.id, "Material supplier approved");

    Ok(Json(SupplierResponse {
        success:  true,
        supplier: supplier_model_to_detail(&approved, &materials),
    }))
}

/// Reject a supplier (admin only); the reason is stored verbatim
pub async fn reject_supplier_handler(
    state: &AppState,
    user: AuthenticatedUser,
    supplier_id: &str,
    req: RejectRequest,
) -> Result<Json<SupplierResponse>> {
    roles::require_any(&user, &[UserRole::Admin])?;
    req.validate()?;

    let supplier = MaterialSuppliersEntity::find_by_id(supplier_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Material supplier not found"))?;

    let mut active_model: entity::material_suppliers::ActiveModel = supplier.into();
    active_model.status = Set(ApprovalStatus::Rejected);
    active_model.rejection_reason = Set(Some(req.reason));
    active_model.updated_at = Set(Utc::now());

    let rejected = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to reject supplier: {}", e)))?;

    let materials = MaterialsEntity::find()
        .filter(MaterialColumn::SupplierId.eq(supplier_id))
        .all(&state.db)
        .await?;

    info!(supplier_id = %supplier_id, admin_id = %user.id, "Material supplier rejected");

    Ok(Json(SupplierResponse {
        success:  true,
        supplier: supplier_model_to_detail(&rejected, &materials),
    }))
}

/// Approved suppliers' available materials in one category (public)
pub async fn materials_by_category_handler(
    state: &AppState,
    category: &str,
    query: MaterialsByCategoryQuery,
) -> Result<Json<SupplierListResponse>> {
    let category = MaterialCategory::from_str(category).map_err(|_| AppError::bad_request("Invalid category"))?;

    let mut supplier_query = MaterialSuppliersEntity::find().filter(SupplierColumn::Status.eq(ApprovalStatus::Approved));
    if let Some(ref supplier_id) = query.supplier {
        supplier_query = supplier_query.filter(SupplierColumn::Id.eq(supplier_id.clone()));
    }

    let suppliers = supplier_query
        .order_by_desc(SupplierColumn::RatingAverage)
        .all(&state.db)
        .await?;

    let supplier_ids: Vec<String> = suppliers.iter().map(|s| s.id.clone()).collect();
    let materials = if supplier_ids.is_empty() {
        Vec::new()
    }
    else {
        MaterialsEntity::find()
            .filter(MaterialColumn::SupplierId.is_in(supplier_ids))
            .filter(MaterialColumn::Category.eq(category))
            .filter(MaterialColumn::IsAvailable.eq(true))
            .all(&state.db)
            .await?
    };

    let mut by_supplier: HashMap<String, Vec<entity::materials::Model>> = HashMap::new();
    for material in materials {
        by_supplier
            .entry(material.supplier_id.clone())
            .or_default()
            .push(material);
    }

    // Suppliers with nothing in the category drop out of the projection
    let details: Vec<SupplierDetail> = suppliers
        .iter()
        .filter_map(|supplier| {
            by_supplier
                .get(&supplier.id)
                .map(|materials| supplier_model_to_detail(supplier, materials))
        })
        .collect();

    Ok(Json(SupplierListResponse {
        success:   true,
        count:     details.len(),
        suppliers: details,
    }))
}

/// Flattened material search across approved suppliers (public)
pub async fn search_materials_handler(
    state: &AppState,
    query: MaterialSearchQuery,
) -> Result<Json<MaterialSearchResponse>> {
    let mut supplier_query = MaterialSuppliersEntity::find().filter(SupplierColumn::Status.eq(ApprovalStatus::Approved));
    if let Some(ref supplier_id) = query.supplier {
        supplier_query = supplier_query.filter(SupplierColumn::Id.eq(supplier_id.clone()));
    }
    let suppliers = supplier_query.all(&state.db).await?;
    let suppliers_by_id: HashMap<String, &entity::material_suppliers::Model> =
        suppliers.iter().map(|s| (s.id.clone(), s)).collect();

    let supplier_ids: Vec<String> = suppliers.iter().map(|s| s.id.clone()).collect();
    if supplier_ids.is_empty() {
        return Ok(Json(MaterialSearchResponse {
            success:   true,
            count:     0,
            materials: Vec::new(),
        }));
    }

    let mut material_query = MaterialsEntity::find()
        .filter(MaterialColumn::SupplierId.is_in(supplier_ids))
        .filter(MaterialColumn::IsAvailable.eq(true));

    if let Some(ref category) = query.category {
        let category =
            MaterialCategory::from_str(category).map_err(|_| AppError::bad_request("Invalid category filter"))?;
        material_query = material_query.filter(MaterialColumn::Category.eq(category));
    }
    if let Some(min_price) = query.min_price {
        material_query = material_query.filter(MaterialColumn::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        material_query = material_query.filter(MaterialColumn::Price.lte(max_price));
    }

    let materials = material_query.all(&state.db).await?;

    let needle = query.q.as_ref().map(|q| q.to_lowercase());
    let mut hits: Vec<MaterialHit> = materials
        .into_iter()
        .filter(|material| {
            match (&needle, suppliers_by_id.get(&material.supplier_id)) {
                (None, Some(_)) => true,
                (Some(needle), Some(supplier)) => {
                    material.name.to_lowercase().contains(needle)
                        || material
                            .description
                            .as_ref()
                            .is_some_and(|d| d.to_lowercase().contains(needle))
                        || supplier.name.to_lowercase().contains(needle)
                },
                (_, None) => false,
            }
        })
        .filter_map(|material| {
            suppliers_by_id.get(&material.supplier_id).map(|supplier| {
                MaterialHit {
                    material: material_model_to_detail(&material),
                    supplier: MaterialSupplierSummary {
                        id:       supplier.id.clone(),
                        name:     supplier.name.clone(),
                        delivery: delivery_summary(supplier),
                        rating:   rating_summary(supplier),
                    },
                }
            })
        })
        .collect();

    match query.sort.as_deref() {
        Some("price_low") => hits.sort_by(|a, b| a.material.price.cmp(&b.material.price)),
        Some("price_high") => hits.sort_by(|a, b| b.material.price.cmp(&a.material.price)),
        _ => hits.sort_by(|a, b| b.supplier.rating.average.cmp(&a.supplier.rating.average)),
    }

    Ok(Json(MaterialSearchResponse {
        success:   true,
        count:     hits.len(),
        materials: hits,
    }))
}

/// Resolve supplier IDs offering a material matching the given filters.
async fn supplier_ids_with_material(
    state: &AppState,
    category: Option<MaterialCategory>,
    name_needle: Option<&str>,
) -> Result<Vec<String>> {
    let mut material_query = MaterialsEntity::find();
    if let Some(category) = category {
        material_query = material_query.filter(MaterialColumn::Category.eq(category));
    }

    let materials = material_query.all(&state.db).await?;

    let mut ids: Vec<String> = materials
        .into_iter()
        .filter(|material| {
            match name_needle {
                None => true,
                Some(needle) => material.name.to_lowercase().contains(needle),
            }
        })
        .map(|material| material.supplier_id)
        .collect();
    ids.sort();
    ids.dedup();
    Ok(ids)
}

/// Load materials for a batch of suppliers and build response shapes.
async fn load_supplier_details(
    state: &AppState,
    suppliers: Vec<entity::material_suppliers::Model>,
) -> Result<Vec<SupplierDetail>> {
    if suppliers.is_empty() {
        return Ok(Vec::new());
    }

    let supplier_ids: Vec<String> = suppliers.iter().map(|s| s.id.clone()).collect();
    let materials = MaterialsEntity::find()
        .filter(MaterialColumn::SupplierId.is_in(supplier_ids))
        .all(&state.db)
        .await?;

    let mut by_supplier: HashMap<String, Vec<entity::materials::Model>> = HashMap::new();
    for material in materials {
        by_supplier
            .entry(material.supplier_id.clone())
            .or_default()
            .push(material);
    }

    Ok(suppliers
        .iter()
        .map(|supplier| {
            let materials = by_supplier.get(&supplier.id).map(Vec::as_slice).unwrap_or(&[]);
            supplier_model_to_detail(supplier, materials)
        })
        .collect())
}

fn delivery_summary(supplier: &entity::material_suppliers::Model) -> DeliverySummary {
    DeliverySummary {
        available:      supplier.delivery_available,
        cost:           supplier.delivery_cost,
        estimated_days: supplier.delivery_estimated_days,
    }
}

fn rating_summary(supplier: &entity::material_suppliers::Model) -> SupplierRating {
    SupplierRating {
        average: supplier.rating_average,
        count:   supplier.rating_count,
    }
}

/// Convert a material entity model to the response shape.
pub fn material_model_to_detail(material: &entity::materials::Model) -> MaterialDetail {
    MaterialDetail {
        id:           material.id.clone(),
        name:         material.name.clone(),
        description:  material.description.clone(),
        category:     material.category.to_string(),
        price:        material.price,
        unit:         material.unit.to_string(),
        stock:        material.stock,
        images:       material.images.clone().map(|i| i.0).unwrap_or_default(),
        is_available: material.is_available,
    }
}

/// Convert a supplier entity model (plus materials) to the response shape.
pub fn supplier_model_to_detail(
    supplier: &entity::material_suppliers::Model,
    materials: &[entity::materials::Model],
) -> SupplierDetail {
    SupplierDetail {
        id:               supplier.id.clone(),
        name:             supplier.name.clone(),
        description:      supplier.description.clone(),
        email:            supplier.email.clone(),
        phone:            supplier.phone.clone(),
        address:          supplier.address.clone(),
        website:          supplier.website.clone(),
        status:           supplier.status.to_string(),
        materials:        materials.iter().map(material_model_to_detail).collect(),
        rating:           rating_summary(supplier),
        delivery:         delivery_summary(supplier),
        logo:             supplier.logo.clone(),
        approved_by:      supplier.approved_by.clone(),
        approved_at:      supplier.approved_at.map(|at| at.to_rfc3339()),
        rejection_reason: supplier.rejection_reason.clone(),
        created_at:       supplier.created_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::MaterialUnit;

    use super::*;

    fn supplier_fixture() -> entity::material_suppliers::Model {
        entity::material_suppliers::Model {
            id:                      "sup_1".to_string(),
            name:                    "Fes Textiles".to_string(),
            description:             "Wholesale textiles".to_string(),
            email:                   "sales@festextiles.example".to_string(),
            phone:                   "+212-555-0202".to_string(),
            address:                 None,
            website:                 None,
            status:                  ApprovalStatus::Approved,
            rating_average:          Decimal::new(420, 2),
            rating_count:            7,
            delivery_available:      true,
            delivery_cost:           Decimal::new(500, 2),
            delivery_estimated_days: 5,
            logo:                    None,
            approved_by:             Some("usr_admin".to_string()),
            approved_at:             Some(Utc::now()),
            rejection_reason:        None,
            created_at:              Utc::now(),
            updated_at:              Utc::now(),
        }
    }

    fn material_fixture() -> entity::materials::Model {
        entity::materials::Model {
            id:           "mat_1".to_string(),
            supplier_id:  "sup_1".to_string(),
            name:         "Merino Yarn".to_string(),
            description:  Some("Soft merino wool".to_string()),
            category:     MaterialCategory::Yarn,
            price:        Decimal::new(1250, 2),
            unit:         MaterialUnit::Kilogram,
            stock:        40,
            images:       None,
            is_available: true,
        }
    }

    #[test]
    fn test_supplier_model_to_detail() {
        let detail = supplier_model_to_detail(&supplier_fixture(), &[material_fixture()]);
        assert_eq!(detail.status, "approved");
        assert_eq!(detail.materials.len(), 1);
        assert_eq!(detail.materials[0].category, "yarn");
        assert_eq!(detail.materials[0].unit, "kilogram");
        assert_eq!(detail.delivery.estimated_days, 5);
        assert!(detail.approved_at.is_some());
    }

    #[test]
    fn test_material_model_to_detail() {
        let detail = material_model_to_detail(&material_fixture());
        assert_eq!(detail.price, Decimal::new(1250, 2));
        assert!(detail.images.is_empty());
        assert!(detail.is_available);
    }
}
