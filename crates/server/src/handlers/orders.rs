//! # Order Workflow Handlers
//!
//! Order creation, status transitions, deletion and role-scoped listings.
//! Every multi-entity write runs inside one database transaction, so a
//! failure anywhere rolls the whole unit back.

use std::{collections::HashMap, str::FromStr};

use axum::{http::StatusCode, Json};
use chrono::{NaiveTime, Utc};
use entity::{
    companies::{Column as CompanyColumn, Entity as CompaniesEntity},
    order_items::{Column as ItemColumn, Entity as OrderItemsEntity},
    orders::{generate_order_number, Column as OrderColumn, Entity as OrdersEntity},
    products::{Column as ProductColumn, Entity as ProductsEntity},
    sea_orm_active_enums::{OrderStatus, PaymentStatus, UserRole},
    users::{Column as UserColumn, Entity as UsersEntity},
};
use error::{AppError, Result};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
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
        orders::{
            AdminOrderListQuery,
            CommissionSummary,
            CreateOrderRequest,
            OrderDetail,
            OrderItemDetail,
            OrderListQuery,
            OrderListResponse,
            OrderResponse,
            PaymentSummary,
            UpdateOrderStatusRequest,
        },
    },
    middleware::{auth::AuthenticatedUser, roles},
    AppState,
};

/// Platform commission, in percent of the order total
const COMMISSION_RATE_PERCENT: i64 = 10;

/// Compute the platform's cut of an order total.
fn commission_for(total: Decimal) -> Decimal {
    total * Decimal::new(COMMISSION_RATE_PERCENT, 0) / Decimal::new(100, 0)
}

/// Place an order
///
/// All validation (existence, availability, stock, single-seller cart)
/// completes before any write; the order insert, stock decrements and stat
/// updates then run in one transaction. Stock is decremented with a
/// conditional update, so two simultaneous orders can never both take the
/// last unit.
pub async fn create_order_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateOrderRequest,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    req.validate()?;

    let mut products = Vec::with_capacity(req.items.len());
    for item in &req.items {
        let product = ProductsEntity::find_by_id(&item.product)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::bad_request(format!("Product {} not found", item.product)))?;

        if !product.is_orderable() {
            return Err(AppError::bad_request(format!(
                "Product {} is not available",
                product.name
            )));
        }

        if product.stock < item.quantity {
            return Err(AppError::bad_request(format!(
                "Insufficient stock for {}",
                product.name
            )));
        }

        products.push(product);
    }

    // A single order cannot span sellers or companies; reject mixed carts
    // instead of silently mis-attributing them to the first item's seller.
    let seller_id = products[0].artisan_id.clone();
    let company_id = products[0].company_id.clone();
    for product in &products[1 ..] {
        if product.artisan_id != seller_id || product.company_id != company_id {
            return Err(AppError::validation(format!(
                "All items in an order must belong to the same seller; {} belongs to a different one",
                product.name
            )));
        }
    }

    // Line totals always use the product's current price
    let mut total_amount = Decimal::ZERO;
    let mut lines = Vec::with_capacity(req.items.len());
    for (product, item) in products.iter().zip(&req.items) {
        let line_total = product.price * Decimal::from(item.quantity);
        total_amount += line_total;
        lines.push((product.id.clone(), item.quantity, product.price, line_total));
    }

    let txn = state.db.begin().await?;

    let now = Utc::now();
    let order_id = entity::new_id("ord");
    let order = entity::orders::ActiveModel {
        id: Set(order_id.clone()),
        order_number: Set(generate_order_number()),
        customer_id: Set(user.id.clone()),
        seller_id: Set(seller_id.clone()),
        company_id: Set(company_id.clone()),
        shipping_address: Set(req.shipping_address),
        billing_address: Set(req.billing_address),
        payment_method: Set(req.payment_method),
        payment_status: Set(PaymentStatus::Pending),
        payment_amount: Set(total_amount),
        status: Set(OrderStatus::Pending),
        tracking: Set(None),
        notes: Set(req.notes),
        total_amount: Set(total_amount),
        shipping_cost: Set(Decimal::ZERO),
        tax: Set(Decimal::ZERO),
        discount: Set(Decimal::ZERO),
        commission_amount: Set(None),
        commission_rate: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = order
        .insert(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to create order: {}", e)))?;

    let mut item_models = Vec::with_capacity(lines.len());
    for (product_id, quantity, price, line_total) in &lines {
        let item = entity::order_items::ActiveModel {
            id:         Set(entity::new_id("itm")),
            order_id:   Set(order_id.clone()),
            product_id: Set(product_id.clone()),
            quantity:   Set(*quantity),
            price:      Set(*price),
            total:      Set(*line_total),
        };
        let inserted = item
            .insert(&txn)
            .await
            .map_err(|e| AppError::database(format!("Failed to create order item: {}", e)))?;
        item_models.push(inserted);
    }

    for (product_id, quantity, _, _) in &lines {
        let result = ProductsEntity::update_many()
            .col_expr(
                ProductColumn::Stock,
                Expr::col(ProductColumn::Stock).sub(*quantity),
            )
            .filter(ProductColumn::Id.eq(product_id.clone()))
            .filter(ProductColumn::Stock.gte(*quantity))
            .exec(&txn)
            .await?;

        // Another checkout won the race for this stock; rolling back
        if result.rows_affected == 0 {
            return Err(AppError::bad_request(format!(
                "Insufficient stock for product {}",
                product_id
            )));
        }
    }

    UsersEntity::update_many()
        .col_expr(
            UserColumn::StatsTotalOrders,
            Expr::col(UserColumn::StatsTotalOrders).add(1),
        )
        .col_expr(
            UserColumn::EarningsTotal,
            Expr::col(UserColumn::EarningsTotal).add(total_amount),
        )
        .col_expr(
            UserColumn::EarningsPending,
            Expr::col(UserColumn::EarningsPending).add(total_amount),
        )
        .filter(UserColumn::Id.eq(seller_id.clone()))
        .exec(&txn)
        .await?;

    CompaniesEntity::update_many()
        .col_expr(
            CompanyColumn::StatsTotalOrders,
            Expr::col(CompanyColumn::StatsTotalOrders).add(1),
        )
        .col_expr(
            CompanyColumn::StatsTotalSales,
            Expr::col(CompanyColumn::StatsTotalSales).add(total_amount),
        )
        .filter(CompanyColumn::Id.eq(company_id.clone()))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(
        order_id = %created.id,
        order_number = %created.order_number,
        customer_id = %user.id,
        total = %total_amount,
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            success: true,
            order:   order_model_to_detail(&created, &item_models),
        }),
    ))
}

/// Get a single order, scoped to the caller's role
pub async fn get_order_handler(state: &AppState, user: AuthenticatedUser, order_id: &str) -> Result<Json<OrderResponse>> {
    let order = OrdersEntity::find_by_id(order_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    authorize_order_access(&user, &order, "view")?;

    let items = OrderItemsEntity::find()
        .filter(ItemColumn::OrderId.eq(order_id))
        .all(&state.db)
        .await?;

    Ok(Json(OrderResponse {
        success: true,
        order:   order_model_to_detail(&order, &items),
    }))
}

/// Transition an order's status
///
/// Transitions follow the fulfilment state machine; a same-state request is
/// a no-op, so a second `delivered` can never re-apply commission. Entering
/// `delivered` computes the commission and settles seller earnings in the
/// same transaction as the status write.
pub async fn update_order_status_handler(
    state: &AppState,
    user: AuthenticatedUser,
    order_id: &str,
    req: UpdateOrderStatusRequest,
) -> Result<Json<OrderResponse>> {
    roles::require_any(
        &user,
        &[UserRole::Seller, UserRole::CompanyModerator, UserRole::Admin],
    )?;
    req.validate()?;

    let order = OrdersEntity::find_by_id(order_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    authorize_order_access(&user, &order, "update")?;

    let next = OrderStatus::from_str(&req.status).map_err(|_| {
        AppError::bad_request(
            "Invalid status. Must be one of: pending, confirmed, processing, shipped, delivered, cancelled, returned",
        )
    })?;

    let current = order.status.clone();
    if !current.can_transition_to(&next) {
        return Err(AppError::bad_request(format!(
            "Cannot transition order from {} to {}",
            current, next
        )));
    }

    let entering_delivered = next == OrderStatus::Delivered && current != OrderStatus::Delivered;
    let total_amount = order.total_amount;
    let seller_id = order.seller_id.clone();

    let txn = state.db.begin().await?;

    let mut active_model: entity::orders::ActiveModel = order.into();
    active_model.status = Set(next.clone());
    if let Some(tracking) = req.tracking {
        active_model.tracking = Set(Some(tracking));
    }

    if entering_delivered {
        let commission = commission_for(total_amount);
        let seller_earnings = total_amount - commission;

        active_model.commission_amount = Set(Some(commission));
        active_model.commission_rate = Set(Some(Decimal::new(COMMISSION_RATE_PERCENT, 0)));

        UsersEntity::update_many()
            .col_expr(
                UserColumn::EarningsPending,
                Expr::col(UserColumn::EarningsPending).sub(total_amount),
            )
            .col_expr(
                UserColumn::EarningsPaid,
                Expr::col(UserColumn::EarningsPaid).add(seller_earnings),
            )
            .filter(UserColumn::Id.eq(seller_id.clone()))
            .exec(&txn)
            .await?;

        info!(
            order_id = %order_id,
            seller_id = %seller_id,
            commission = %commission,
            "Order delivered, commission settled"
        );
    }

    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to update order: {}", e)))?;

    txn.commit().await?;

    let items = OrderItemsEntity::find()
        .filter(ItemColumn::OrderId.eq(order_id))
        .all(&state.db)
        .await?;

    info!(order_id = %order_id, status = %next, user_id = %user.id, "Order status updated");

    Ok(Json(OrderResponse {
        success: true,
        order:   order_model_to_detail(&updated, &items),
    }))
}

/// Delete an order
///
/// Permitted only while the order is still `pending`; restores the ordered
/// quantities to each product's stock in the same transaction.
pub async fn delete_order_handler(
    state: &AppState,
    user: AuthenticatedUser,
    order_id: &str,
) -> Result<Json<SuccessResponse>> {
    let order = OrdersEntity::find_by_id(order_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    if order.customer_id != user.id && !roles::is_admin(&user) {
        return Err(AppError::forbidden("Not authorized to delete this order"));
    }

    if order.status != OrderStatus::Pending {
        return Err(AppError::bad_request("Only pending orders can be deleted"));
    }

    let items = OrderItemsEntity::find()
        .filter(ItemColumn::OrderId.eq(order_id))
        .all(&state.db)
        .await?;

    let txn = state.db.begin().await?;

    for item in &items {
        ProductsEntity::update_many()
            .col_expr(
                ProductColumn::Stock,
                Expr::col(ProductColumn::Stock).add(item.quantity),
            )
            .filter(ProductColumn::Id.eq(item.product_id.clone()))
            .exec(&txn)
            .await?;
    }

    OrderItemsEntity::delete_many()
        .filter(ItemColumn::OrderId.eq(order_id))
        .exec(&txn)
        .await?;

    OrdersEntity::delete_by_id(order_id)
        .exec(&txn)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete order: {}", e)))?;

    txn.commit().await?;

    info!(order_id = %order_id, user_id = %user.id, "Order deleted, stock restored");

    Ok(Json(SuccessResponse {
        success: true,
        message: "Order deleted successfully".to_string(),
    }))
}

/// List the customer's own orders
pub async fn list_my_orders_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: OrderListQuery,
) -> Result<Json<OrderListResponse>> {
    let mut base_query = OrdersEntity::find().filter(OrderColumn::CustomerId.eq(user.id.clone()));

    if let Some(status) = parse_status_filter(query.status.as_deref())? {
        base_query = base_query.filter(OrderColumn::Status.eq(status));
    }

    let orders = base_query
        .order_by_desc(OrderColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details = attach_items(&state.db, orders).await?;

    Ok(Json(OrderListResponse {
        success: true,
        count:   details.len(),
        orders:  details,
    }))
}

/// Cross-tenant order listing (admin/moderator)
///
/// A company moderator is always scoped to their own company regardless of
/// the requested filter.
pub async fn list_all_orders_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: AdminOrderListQuery,
) -> Result<Json<OrderListResponse>> {
    roles::require_any(&user, &[UserRole::Admin, UserRole::CompanyModerator])?;

    let mut base_query = OrdersEntity::find();

    if let Some(status) = parse_status_filter(query.status.as_deref())? {
        base_query = base_query.filter(OrderColumn::Status.eq(status));
    }
    if let Some(ref seller) = query.seller {
        base_query = base_query.filter(OrderColumn::SellerId.eq(seller.clone()));
    }

    let company_filter = if user.role == UserRole::CompanyModerator {
        user.company_id.clone()
    }
    else {
        query.company.clone()
    };
    if let Some(company) = company_filter {
        base_query = base_query.filter(OrderColumn::CompanyId.eq(company));
    }

    if let Some(date_from) = query.date_from {
        let from = date_from.and_time(NaiveTime::MIN).and_utc();
        base_query = base_query.filter(OrderColumn::CreatedAt.gte(from));
    }
    if let Some(date_to) = query.date_to {
        let to = date_to
            .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
            .and_utc();
        base_query = base_query.filter(OrderColumn::CreatedAt.lte(to));
    }

    let orders = base_query
        .order_by_desc(OrderColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details = attach_items(&state.db, orders).await?;

    Ok(Json(OrderListResponse {
        success: true,
        count:   details.len(),
        orders:  details,
    }))
}

/// List a seller's orders (admin/moderator)
pub async fn list_seller_orders_handler(
    state: &AppState,
    user: AuthenticatedUser,
    seller_id: &str,
    query: OrderListQuery,
) -> Result<Json<OrderListResponse>> {
    roles::require_any(&user, &[UserRole::Admin, UserRole::CompanyModerator])?;

    let mut base_query = OrdersEntity::find().filter(OrderColumn::SellerId.eq(seller_id));

    // Moderators only see the slice of this seller inside their own company
    if user.role == UserRole::CompanyModerator {
        if let Some(ref company_id) = user.company_id {
            base_query = base_query.filter(OrderColumn::CompanyId.eq(company_id.clone()));
        }
    }

    if let Some(status) = parse_status_filter(query.status.as_deref())? {
        base_query = base_query.filter(OrderColumn::Status.eq(status));
    }

    let orders = base_query
        .order_by_desc(OrderColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details = attach_items(&state.db, orders).await?;

    Ok(Json(OrderListResponse {
        success: true,
        count:   details.len(),
        orders:  details,
    }))
}

/// List a company's orders (admin/moderator, moderator scoped to own)
pub async fn list_company_orders_handler(
    state: &AppState,
    user: AuthenticatedUser,
    company_id: &str,
    query: OrderListQuery,
) -> Result<Json<OrderListResponse>> {
    roles::require_any(&user, &[UserRole::Admin, UserRole::CompanyModerator])?;

    let effective_company = if user.role == UserRole::CompanyModerator {
        user.company_id
            .clone()
            .ok_or_else(|| AppError::forbidden("Moderator account is not linked to a company"))?
    }
    else {
        company_id.to_string()
    };

    let mut base_query = OrdersEntity::find().filter(OrderColumn::CompanyId.eq(effective_company));

    if let Some(status) = parse_status_filter(query.status.as_deref())? {
        base_query = base_query.filter(OrderColumn::Status.eq(status));
    }

    let orders = base_query
        .order_by_desc(OrderColumn::CreatedAt)
        .all(&state.db)
        .await?;

    let details = attach_items(&state.db, orders).await?;

    Ok(Json(OrderListResponse {
        success: true,
        count:   details.len(),
        orders:  details,
    }))
}

/// Check whether the acting user may see or mutate an order.
fn authorize_order_access(user: &AuthenticatedUser, order: &entity::orders::Model, action: &str) -> Result<()> {
    let allowed = match user.role {
        UserRole::Admin => true,
        UserRole::User => order.customer_id == user.id,
        UserRole::Seller => order.seller_id == user.id,
        UserRole::CompanyModerator => user.company_id.as_deref() == Some(order.company_id.as_str()),
    };

    if allowed {
        Ok(())
    }
    else {
        Err(AppError::forbidden(format!(
            "Not authorized to {} this order",
            action
        )))
    }
}

/// Parse an optional status filter from a query string.
fn parse_status_filter(status: Option<&str>) -> Result<Option<OrderStatus>> {
    match status {
        None => Ok(None),
        Some(value) => {
            OrderStatus::from_str(value)
                .map(Some)
                .map_err(|_| AppError::bad_request("Invalid status filter"))
        },
    }
}

/// Load line items for a batch of orders and build response shapes.
async fn attach_items<C: ConnectionTrait>(db: &C, orders: Vec<entity::orders::Model>) -> Result<Vec<OrderDetail>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
    let items = OrderItemsEntity::find()
        .filter(ItemColumn::OrderId.is_in(order_ids))
        .all(db)
        .await?;

    let mut by_order: HashMap<String, Vec<entity::order_items::Model>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id.clone()).or_default().push(item);
    }

    Ok(orders
        .iter()
        .map(|order| {
            let items = by_order.get(&order.id).map(Vec::as_slice).unwrap_or(&[]);
            order_model_to_detail(order, items)
        })
        .collect())
}

/// Convert an order entity model (plus its items) to the response shape.
pub fn order_model_to_detail(order: &entity::orders::Model, items: &[entity::order_items::Model]) -> OrderDetail {
    let commission = match (order.commission_amount, order.commission_rate) {
        (Some(amount), Some(rate)) => {
            Some(CommissionSummary {
                amount,
                rate,
            })
        },
        _ => None,
    };

    OrderDetail {
        id:               order.id.clone(),
        order_number:     order.order_number.clone(),
        customer_id:      order.customer_id.clone(),
        seller_id:        order.seller_id.clone(),
        company_id:       order.company_id.clone(),
        items:            items
            .iter()
            .map(|item| {
                OrderItemDetail {
                    product_id: item.product_id.clone(),
                    quantity:   item.quantity,
                    price:      item.price,
                    total:      item.total,
                }
            })
            .collect(),
        shipping_address: order.shipping_address.clone(),
        billing_address:  order.billing_address.clone(),
        payment:          PaymentSummary {
            method: order.payment_method.to_string(),
            status: order.payment_status.to_string(),
            amount: order.payment_amount,
        },
        status:           order.status.to_string(),
        tracking:         order.tracking.clone(),
        notes:            order.notes.clone(),
        total_amount:     order.total_amount,
        shipping_cost:    order.shipping_cost,
        tax:              order.tax,
        discount:         order.discount,
        commission,
        created_at:       order.created_at.to_rfc3339(),
        updated_at:       order.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::PaymentMethod;

    use super::*;

    #[test]
    fn test_commission_is_ten_percent() {
        let total = Decimal::new(9198, 2); // 91.98
        let commission = commission_for(total);
        assert_eq!(commission, Decimal::new(9198, 3)); // 9.198
        assert_eq!(total - commission, Decimal::new(82782, 3)); // 82.782
    }

    #[test]
    fn test_commission_zero_total() {
        assert_eq!(commission_for(Decimal::ZERO), Decimal::ZERO);
    }

    fn order_fixture(status: OrderStatus) -> entity::orders::Model {
        entity::orders::Model {
            id:                "ord_1".to_string(),
            order_number:      "ORD-TEST".to_string(),
            customer_id:       "usr_customer".to_string(),
            seller_id:         "usr_seller".to_string(),
            company_id:        "com_coop".to_string(),
            shipping_address:  None,
            billing_address:   None,
            payment_method:    PaymentMethod::CashOnDelivery,
            payment_status:    PaymentStatus::Pending,
            payment_amount:    Decimal::new(9198, 2),
            status,
            tracking:          None,
            notes:             None,
            total_amount:      Decimal::new(9198, 2),
            shipping_cost:     Decimal::ZERO,
            tax:               Decimal::ZERO,
            discount:          Decimal::ZERO,
            commission_amount: None,
            commission_rate:   None,
            created_at:        Utc::now(),
            updated_at:        Utc::now(),
        }
    }

    fn acting(role: UserRole, id: &str, company: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            id:         id.to_string(),
            email:      "t@example.com".to_string(),
            role,
            company_id: company.map(str::to_string),
        }
    }

    #[test]
    fn test_authorize_order_access_customer() {
        let order = order_fixture(OrderStatus::Pending);
        assert!(authorize_order_access(&acting(UserRole::User, "usr_customer", None), &order, "view").is_ok());
        assert!(authorize_order_access(&acting(UserRole::User, "usr_other", None), &order, "view").is_err());
    }

    #[test]
    fn test_authorize_order_access_seller() {
        let order = order_fixture(OrderStatus::Pending);
        assert!(authorize_order_access(&acting(UserRole::Seller, "usr_seller", None), &order, "update").is_ok());
        assert!(authorize_order_access(&acting(UserRole::Seller, "usr_other", None), &order, "update").is_err());
    }

    #[test]
    fn test_authorize_order_access_moderator_scoped_to_company() {
        let order = order_fixture(OrderStatus::Pending);
        assert!(authorize_order_access(
            &acting(UserRole::CompanyModerator, "usr_mod", Some("com_coop")),
            &order,
            "update"
        )
        .is_ok());
        assert!(authorize_order_access(
            &acting(UserRole::CompanyModerator, "usr_mod", Some("com_other")),
            &order,
            "update"
        )
        .is_err());
    }

    #[test]
    fn test_authorize_order_access_admin_unrestricted() {
        let order = order_fixture(OrderStatus::Delivered);
        assert!(authorize_order_access(&acting(UserRole::Admin, "usr_admin", None), &order, "update").is_ok());
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("shipped")).unwrap(),
            Some(OrderStatus::Shipped)
        );
        assert!(parse_status_filter(Some("en-route")).is_err());
    }

    #[test]
    fn test_order_model_to_detail_commission_pairing() {
        let mut order = order_fixture(OrderStatus::Delivered);
        order.commission_amount = Some(Decimal::new(9198, 3));
        order.commission_rate = Some(Decimal::new(10, 0));

        let detail = order_model_to_detail(&order, &[]);
        let commission = detail.commission.unwrap();
        assert_eq!(commission.amount, Decimal::new(9198, 3));
        assert_eq!(commission.rate, Decimal::new(10, 0));

        let bare = order_model_to_detail(&order_fixture(OrderStatus::Pending), &[]);
        assert!(bare.commission.is_none());
    }
}
