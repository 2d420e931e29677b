use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::BadgeResponse;
use crate::domain::actor::Actor;
use crate::domain::lifecycle::OrderAction;
use crate::domain::order::{NewOrder, Order};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub crop_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentProofRequest {
    /// Reference to the stored proof, e.g. the uploaded file's URL
    pub reference: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub customer_id: Uuid,
    pub farmer_id: Uuid,
    pub quantity: i32,
    pub status: OrderStatus,
    pub status_badge: BadgeResponse,
    pub payment_proof: Option<String>,
    /// Actions a client may offer for the current status
    pub available_actions: Vec<OrderAction>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            available_actions: order.available_actions(),
            id: order.id,
            crop_id: order.crop_id,
            customer_id: order.customer_id,
            farmer_id: order.farmer_id,
            quantity: order.quantity,
            status: order.status,
            status_badge: order.status.badge().into(),
            payment_proof: order.payment_proof,
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Places an order and reserves its quantity from the crop. The order starts
/// in `PENDING_PAYMENT`.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "CUSTOMER"),
    ),
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Crop not found"),
        (status = 409, description = "Not enough stock"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    actor: Actor,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let order = NewOrder {
        crop_id: body.crop_id,
        quantity: body.quantity,
    };

    let order = web::block(move || state.orders.create_order(&actor, order)).await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns the order with its status badge and the actions available for
/// its current status.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "Caller role"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let order = web::block(move || state.orders.get_order(&actor, id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// POST /orders/{id}/ready-for-delivery
///
/// `PAYMENT_RECEIVED` -> `READY_FOR_DELIVERY`. Reload the order afterwards.
#[utoipa::path(
    post,
    path = "/orders/{id}/ready-for-delivery",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "FARMER or ADMIN"),
    ),
    responses(
        (status = 204, description = "Order marked ready for delivery"),
        (status = 403, description = "Failed to update status"),
        (status = 404, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "orders"
)]
pub async fn mark_as_ready_for_delivery(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.orders.mark_as_ready_for_delivery(&actor, id))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /orders/{id}/cancel
///
/// Cancels any order that is not delivered or already cancelled, releases
/// its reserved quantity and cancels its open delivery request.
#[utoipa::path(
    post,
    path = "/orders/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "Caller role"),
    ),
    responses(
        (status = 204, description = "Order cancelled"),
        (status = 403, description = "Failed to update status"),
        (status = 404, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.orders.cancel_order(&actor, id))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /orders/{id}/payment-proof
#[utoipa::path(
    post,
    path = "/orders/{id}/payment-proof",
    request_body = PaymentProofRequest,
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "CUSTOMER"),
    ),
    responses(
        (status = 204, description = "Payment proof stored"),
        (status = 400, description = "Empty reference"),
        (status = 403, description = "Not the ordering customer"),
        (status = 409, description = "Order is no longer awaiting payment"),
    ),
    tag = "orders"
)]
pub async fn upload_payment_proof(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
    body: web::Json<PaymentProofRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let reference = body.into_inner().reference;

    web::block(move || state.orders.upload_payment_proof(&actor, id, &reference)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /orders/{id}/confirm-payment
///
/// `PENDING_PAYMENT` -> `PAYMENT_RECEIVED`, once a payment proof is on file.
#[utoipa::path(
    post,
    path = "/orders/{id}/confirm-payment",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "ADMIN"),
    ),
    responses(
        (status = 204, description = "Payment confirmed"),
        (status = 400, description = "Failed to update status"),
        (status = 403, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "orders"
)]
pub async fn confirm_payment(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.orders.confirm_payment(&actor, id))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}
