//! # Product Catalog Handlers
//!
//! Public catalog browsing plus artisan-owned CRUD.

use std::str::FromStr;

use axum::{http::StatusCode, Json};
use chrono::Utc;
use entity::{
    products::{Column as ProductColumn, Entity as ProductsEntity},
    sea_orm_active_enums::{ProductCategory, ProductStatus, UserRole},
    types::{ImageList, StringList},
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{
    sea_query::{Alias, Expr, ExprTrait, Func},
    ActiveModelTrait,
    ColumnTrait,
    Condition,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        auth::SuccessResponse,
        products::{
            CreateProductRequest,
            ProductDetail,
            ProductListQuery,
            ProductListResponse,
            ProductResponse,
            ProductSort,
            RatingSummary,
            UpdateProductRequest,
        },
    },
    middleware::{auth::AuthenticatedUser, roles},
    utils::like_pattern,
    AppState,
};

/// List products with filters, search, pagination and sorting
///
/// Only `is_active` rows are ever returned. Every call re-scans with the
/// given filter; there is no result-count caching.
pub async fn list_products_handler(state: &AppState, query: ProductListQuery) -> Result<Json<ProductListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = ProductsEntity::find().filter(ProductColumn::IsActive.eq(true));

    if let Some(ref category) = query.category {
        if category != "all" {
            let category = ProductCategory::from_str(category)
                .map_err(|_| AppError::bad_request("Unknown category"))?;
            base_query = base_query.filter(ProductColumn::Category.eq(category));
        }
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
                )
                .add(
                    Expr::expr(Func::lower(
                        Expr::col((ProductsEntity, ProductColumn::Tags)).cast_as(Alias::new("text")),
                    ))
                    .like(&pattern),
                ),
        );
    }

    if let Some(min_price) = query.min_price {
        base_query = base_query.filter(ProductColumn::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        base_query = base_query.filter(ProductColumn::Price.lte(max_price));
    }

    base_query = match ProductSort::parse(query.sort.as_deref()) {
        ProductSort::Newest => base_query.order_by_desc(ProductColumn::CreatedAt),
        ProductSort::PriceLow => base_query.order_by_asc(ProductColumn::Price),
        ProductSort::PriceHigh => base_query.order_by_desc(ProductColumn::Price),
        ProductSort::Name => base_query.order_by_asc(ProductColumn::Name),
    };

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count products: {}", e)))?;

    let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };

    let products = base_query
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch products: {}", e)))?;

    let details: Vec<ProductDetail> = products.iter().map(product_model_to_detail).collect();

    Ok(Json(ProductListResponse {
        success: true,
        count: details.len(),
        products: details,
        total_pages,
        current_page: page,
        total,
    }))
}

/// Get a single product by ID
pub async fn get_product_handler(state: &AppState, product_id: &str) -> Result<Json<ProductResponse>> {
    let product = ProductsEntity::find_by_id(product_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse {
        success: true,
        product: product_model_to_detail(&product),
    }))
}

/// Create a product listing
///
/// The acting artisan becomes the owner; the company comes from the
/// artisan's account.
pub async fn create_product_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateProductRequest,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    roles::require_any(&user, &[UserRole::Seller, UserRole::Admin])?;
    req.validate()?;

    let artisan = UsersEntity::find_by_id(&user.id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Artisan account not found"))?;

    let company_id = artisan
        .company_id
        .ok_or_else(|| AppError::bad_request("Artisan account is not linked to a company"))?;

    // validate() already vouched for the category string
    let category = ProductCategory::from_str(&req.category)
        .map_err(|_| AppError::bad_request("Unknown category"))?;

    let now = Utc::now();
    let product = entity::products::ActiveModel {
        id: Set(entity::new_id("prd")),
        name: Set(req.name.clone()),
        description: Set(req.description),
        price: Set(req.price),
        category: Set(category),
        images: Set(req.images.map(ImageList)),
        artisan_id: Set(user.id.clone()),
        company_id: Set(company_id),
        stock: Set(req.stock.unwrap_or(1)),
        is_active: Set(true),
        accessibility: Set(req.accessibility),
        tags: Set(req.tags.map(StringList)),
        dimensions: Set(req.dimensions),
        materials: Set(req.materials.map(StringList)),
        rating_average: Set(rust_decimal::Decimal::ZERO),
        rating_count: Set(0),
        status: Set(ProductStatus::Pending),
        featured: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = product
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create product: {}", e)))?;

    info!(product_id = %created.id, artisan_id = %user.id, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            product: product_model_to_detail(&created),
        }),
    ))
}

/// Update a product listing (owner or admin)
pub async fn update_product_handler(
    state: &AppState,
    user: AuthenticatedUser,
    product_id: &str,
    req: UpdateProductRequest,
) -> Result<Json<ProductResponse>> {
    req.validate()?;

    let product = ProductsEntity::find_by_id(product_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if product.artisan_id != user.id && !roles::is_admin(&user) {
        return Err(AppError::forbidden("Not authorized to update this product"));
    }

    let mut active_model: entity::products::ActiveModel = product.into();

    if let Some(name) = req.name {
        active_model.name = Set(name);
    }
    if let Some(description) = req.description {
        active_model.description = Set(description);
    }
    if let Some(price) = req.price {
        active_model.price = Set(price);
    }
    if let Some(ref category) = req.category {
        let category = ProductCategory::from_str(category)
            .map_err(|_| AppError::bad_request("Unknown category"))?;
        active_model.category = Set(category);
    }
    if let Some(stock) = req.stock {
        active_model.stock = Set(stock);
    }
    if let Some(is_active) = req.is_active {
        active_model.is_active = Set(is_active);
    }
    if let Some(ref status) = req.status {
        let status = ProductStatus::from_str(status).map_err(AppError::bad_request)?;
        active_model.status = Set(status);
    }
    if let Some(tags) = req.tags {
        active_model.tags = Set(Some(StringList(tags)));
    }
    if let Some(materials) = req.materials {
        active_model.materials = Set(Some(StringList(materials)));
    }
    if let Some(dimensions) = req.dimensions {
        active_model.dimensions = Set(Some(dimensions));
    }
    if let Some(accessibility) = req.accessibility {
        active_model.accessibility = Set(Some(accessibility));
    }
    if let Some(images) = req.images {
        active_model.images = Set(Some(ImageList(images)));
    }
    if let Some(featured) = req.featured {
        active_model.featured = Set(featured);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

    info!(product_id = %product_id, user_id = %user.id, "Product updated");

    Ok(Json(ProductResponse {
        success: true,
        product: product_model_to_detail(&updated),
    }))
}

/// Delete a product listing (owner or admin)
pub async fn delete_product_handler(
    state: &AppState,
    user: AuthenticatedUser,
    product_id: &str,
) -> Result<Json<SuccessResponse>> {
    let product = ProductsEntity::find_by_id(product_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if product.artisan_id != user.id && !roles::is_admin(&user) {
        return Err(AppError::forbidden("Not authorized to delete this product"));
    }

    ProductsEntity::delete_by_id(product_id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

    info!(product_id = %product_id, user_id = %user.id, "Product deleted");

    Ok(Json(SuccessResponse {
        success: true,
        message: "Product deleted successfully".to_string(),
    }))
}

/// Convert a product entity model to the response shape
pub fn product_model_to_detail(product: &entity::products::Model) -> ProductDetail {
    ProductDetail {
        id:            product.id.clone(),
        name:          product.name.clone(),
        description:   product.description.clone(),
        price:         product.price,
        category:      product.category.to_string(),
        images:        product.images.clone().map(|i| i.0).unwrap_or_default(),
        artisan_id:    product.artisan_id.clone(),
        company_id:    product.company_id.clone(),
        stock:         product.stock,
        is_active:     product.is_active,
        accessibility: product.accessibility.clone(),
        tags:          product.tags.clone().map(|t| t.0).unwrap_or_default(),
        dimensions:    product.dimensions.clone(),
        materials:     product.materials.clone().map(|m| m.0).unwrap_or_default(),
        rating:        RatingSummary {
            average: product.rating_average,
            count:   product.rating_count,
        },
        status:        product.status.to_string(),
        featured:      product.featured,
        created_at:    product.created_at.to_rfc3339(),
        updated_at:    product.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_model_to_detail() {
        let product = entity::products::Model {
            id:             "prd_1".to_string(),
            name:           "Silver Earrings".to_string(),
            description:    "Filigree earrings".to_string(),
            price:          Decimal::new(4599, 2),
            category:       ProductCategory::Jewelry,
            images:         None,
            artisan_id:     "usr_a".to_string(),
            company_id:     "com_c".to_string(),
            stock:          5,
            is_active:      true,
            accessibility:  None,
            tags:           Some(StringList(vec!["silver".to_string()])),
            dimensions:     None,
            materials:      None,
            rating_average: Decimal::new(480, 2),
            rating_count:   12,
            status:         ProductStatus::Approved,
            featured:       true,
            created_at:     Utc::now(),
            updated_at:     Utc::now(),
        };

        let detail = product_model_to_detail(&product);
        assert_eq!(detail.category, "jewelry");
        assert_eq!(detail.status, "approved");
        assert_eq!(detail.tags, vec!["silver"]);
        assert!(detail.images.is_empty());
        assert_eq!(detail.rating.count, 12);
    }
}
