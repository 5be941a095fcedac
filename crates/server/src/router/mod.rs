//! # API Router Configuration
//!
//! Configures API routes for the MamaSouk application. Wrapper functions
//! adapt axum extractors to the handler functions.

use axum::{
    extract::{Extension, Path, State as AxumState},
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Json,
    Router,
};
use error::Result;

use crate::{
    extract::{ApiJson, ApiQuery},
    dto::{
        auth::{AuthSuccessResponse, LoginRequest, RegisterRequest, SuccessResponse},
        companies::{
            ApproveCompanyRequest,
            ApproveCompanyResponse,
            CompanyArtisansResponse,
            CompanyListQuery,
            CompanyListResponse,
            CompanyProductsQuery,
            CompanyResponse,
            CompanyStatsResponse,
            RegisterCompanyRequest,
            RejectRequest,
            UpdateCompanyRequest,
        },
        materials::{
            MaterialSearchQuery,
            MaterialSearchResponse,
            MaterialsByCategoryQuery,
            RegisterSupplierRequest,
            SupplierListQuery,
            SupplierListResponse,
            SupplierResponse,
            UpdateSupplierRequest,
        },
        orders::{
            AdminOrderListQuery,
            CreateOrderRequest,
            OrderListQuery,
            OrderListResponse,
            OrderResponse,
            UpdateOrderStatusRequest,
        },
        products::{
            CreateProductRequest,
            ProductListQuery,
            ProductListResponse,
            ProductResponse,
            UpdateProductRequest,
        },
        users::ProfileResponse,
    },
    handlers,
    middleware::auth::AuthenticatedUser,
    AppState,
};

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/api/users/profile", get(profile_handler))
        .route("/api/products", post(create_product_handler))
        .route("/api/products/:id", put(update_product_handler))
        .route("/api/products/:id", delete(delete_product_handler))
        .route("/api/orders", get(my_orders_handler))
        .route("/api/orders", post(create_order_handler))
        .route("/api/orders/admin/all", get(all_orders_handler))
        .route("/api/orders/seller/:seller_id", get(seller_orders_handler))
        .route(
            "/api/orders/company/:company_id",
            get(company_orders_handler),
        )
        .route("/api/orders/:id", get(get_order_handler))
        .route("/api/orders/:id", delete(delete_order_handler))
        .route("/api/orders/:id/status", put(update_order_status_handler))
        .route("/api/companies/:id", put(update_company_handler))
        .route("/api/companies/:id", delete(delete_company_handler))
        .route("/api/companies/:id/approve", put(approve_company_handler))
        .route("/api/companies/:id/reject", put(reject_company_handler))
        .route("/api/companies/:id/stats", get(company_stats_handler))
        .route("/api/companies/:id/artisans", get(company_artisans_handler))
        .route("/api/companies/:id/products", get(company_products_handler))
        .route("/api/materials/:id", put(update_supplier_handler))
        .route("/api/materials/:id", delete(delete_supplier_handler))
        .route("/api/materials/:id/approve", put(approve_supplier_handler))
        .route("/api/materials/:id/reject", put(reject_supplier_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/products", get(list_products_handler))
        .route("/api/products/:id", get(get_product_handler))
        .route("/api/companies", get(list_companies_handler))
        .route("/api/companies", post(register_company_handler))
        .route("/api/companies/:id", get(get_company_handler))
        .route("/api/materials", get(list_suppliers_handler))
        .route("/api/materials", post(register_supplier_handler))
        .route("/api/materials/search", get(search_materials_handler))
        .route(
            "/api/materials/category/:category",
            get(materials_by_category_handler),
        )
        .route("/api/materials/:id", get(get_supplier_handler));

    public_routes.merge(protected_routes).with_state(state)
}

// ---- Account wrappers ----

async fn register_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthSuccessResponse>)> {
    handlers::accounts::register_handler(&state, req).await
}

async fn login_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthSuccessResponse>> {
    handlers::accounts::login_handler(&state, req).await
}

async fn profile_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>> {
    handlers::accounts::get_profile_handler(&state, user).await
}

// ---- Catalog wrappers ----

async fn list_products_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    handlers::catalog::list_products_handler(&state, query).await
}

async fn get_product_handler(
    AxumState(state): AxumState<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>> {
    handlers::catalog::get_product_handler(&state, &product_id).await
}

async fn create_product_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    handlers::catalog::create_product_handler(&state, user, req).await
}

async fn update_product_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
    ApiJson(req): ApiJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>> {
    handlers::catalog::update_product_handler(&state, user, &product_id, req).await
}

async fn delete_product_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    handlers::catalog::delete_product_handler(&state, user, &product_id).await
}

// ---- Order wrappers ----

async fn my_orders_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    handlers::orders::list_my_orders_handler(&state, user, query).await
}

async fn create_order_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    handlers::orders::create_order_handler(&state, user, req).await
}

async fn all_orders_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<AdminOrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    handlers::orders::list_all_orders_handler(&state, user, query).await
}

async fn seller_orders_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(seller_id): Path<String>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    handlers::orders::list_seller_orders_handler(&state, user, &seller_id, query).await
}

async fn company_orders_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    handlers::orders::list_company_orders_handler(&state, user, &company_id, query).await
}

async fn get_order_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>> {
    handlers::orders::get_order_handler(&state, user, &order_id).await
}

async fn update_order_status_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<String>,
    ApiJson(req): ApiJson<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>> {
    handlers::orders::update_order_status_handler(&state, user, &order_id, req).await
}

async fn delete_order_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(order_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    handlers::orders::delete_order_handler(&state, user, &order_id).await
}

// ---- Company wrappers ----

async fn list_companies_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<CompanyListQuery>,
) -> Result<Json<CompanyListResponse>> {
    handlers::companies::list_companies_handler(&state, query).await
}

async fn get_company_handler(
    AxumState(state): AxumState<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyResponse>> {
    handlers::companies::get_company_handler(&state, &company_id).await
}

async fn register_company_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<RegisterCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>)> {
    handlers::companies::register_company_handler(&state, req).await
}

async fn update_company_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
    ApiJson(req): ApiJson<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>> {
    handlers::companies::update_company_handler(&state, user, &company_id, req).await
}

async fn delete_company_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    handlers::companies::delete_company_handler(&state, user, &company_id).await
}

async fn approve_company_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
    ApiJson(req): ApiJson<ApproveCompanyRequest>,
) -> Result<Json<ApproveCompanyResponse>> {
    handlers::companies::approve_company_handler(&state, user, &company_id, req).await
}

async fn reject_company_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
    ApiJson(req): ApiJson<RejectRequest>,
) -> Result<Json<CompanyResponse>> {
    handlers::companies::reject_company_handler(&state, user, &company_id, req).await
}

async fn company_stats_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyStatsResponse>> {
    handlers::companies::company_stats_handler(&state, user, &company_id).await
}

async fn company_artisans_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
) -> Result<Json<CompanyArtisansResponse>> {
    handlers::companies::company_artisans_handler(&state, user, &company_id).await
}

async fn company_products_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(company_id): Path<String>,
    ApiQuery(query): ApiQuery<CompanyProductsQuery>,
) -> Result<Json<ProductListResponse>> {
    handlers::companies::company_products_handler(&state, user, &company_id, query).await
}

// ---- Material supplier wrappers ----

async fn list_suppliers_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<SupplierListQuery>,
) -> Result<Json<SupplierListResponse>> {
    handlers::materials::list_suppliers_handler(&state, query).await
}

async fn get_supplier_handler(
    AxumState(state): AxumState<AppState>,
    Path(supplier_id): Path<String>,
) -> Result<Json<SupplierResponse>> {
    handlers::materials::get_supplier_handler(&state, &supplier_id).await
}

async fn register_supplier_handler(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<RegisterSupplierRequest>,
) -> Result<(StatusCode, Json<SupplierResponse>)> {
    handlers::materials::register_supplier_handler(&state, req).await
}

async fn update_supplier_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(supplier_id): Path<String>,
    ApiJson(req): ApiJson<UpdateSupplierRequest>,
) -> Result<Json<SupplierResponse>> {
    handlers::materials::update_supplier_handler(&state, user, &supplier_id, req).await
}

async fn delete_supplier_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(supplier_id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    handlers::materials::delete_supplier_handler(&state, user, &supplier_id).await
}

async fn approve_supplier_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(supplier_id): Path<String>,
) -> Result<Json<SupplierResponse>> {
    handlers::materials::approve_supplier_handler(&state, user, &supplier_id).await
}

async fn reject_supplier_handler(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(supplier_id): Path<String>,
    ApiJson(req): ApiJson<RejectRequest>,
) -> Result<Json<SupplierResponse>> {
    handlers::materials::reject_supplier_handler(&state, user, &supplier_id, req).await
}

async fn materials_by_category_handler(
    AxumState(state): AxumState<AppState>,
    Path(category): Path<String>,
    ApiQuery(query): ApiQuery<MaterialsByCategoryQuery>,
) -> Result<Json<SupplierListResponse>> {
    handlers::materials::materials_by_category_handler(&state, &category, query).await
}

async fn search_materials_handler(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<MaterialSearchQuery>,
) -> Result<Json<MaterialSearchResponse>> {
    handlers::materials::search_materials_handler(&state, query).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
}
