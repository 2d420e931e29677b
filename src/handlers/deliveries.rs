use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::BadgeResponse;
use crate::domain::actor::Actor;
use crate::domain::delivery::DeliveryRequest;
use crate::domain::status::DeliveryStatus;
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDeliveryRequest {
    pub order_id: Uuid,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeliverRequest {
    /// Optional reference to proof of payment collected on delivery
    #[serde(default)]
    pub payment_proof: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminCommissionRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryRequestResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub status: DeliveryStatus,
    pub status_badge: BadgeResponse,
    pub admin_commission: bool,
    pub payment_proof: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DeliveryRequest> for DeliveryRequestResponse {
    fn from(request: DeliveryRequest) -> Self {
        Self {
            id: request.id,
            order_id: request.order_id,
            driver_id: request.driver_id,
            status: request.status,
            status_badge: request.status.badge().into(),
            admin_commission: request.admin_commission,
            payment_proof: request.payment_proof,
            created_at: request.created_at.to_rfc3339(),
            updated_at: request.updated_at.to_rfc3339(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /delivery-requests
///
/// Opens a delivery request for an order in `READY_FOR_DELIVERY`.
#[utoipa::path(
    post,
    path = "/delivery-requests",
    request_body = CreateDeliveryRequest,
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "FARMER or ADMIN"),
    ),
    responses(
        (status = 201, description = "Delivery requested", body = DeliveryRequestResponse),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order not ready or already has an open request"),
    ),
    tag = "delivery-requests"
)]
pub async fn request_delivery(
    state: web::Data<AppState>,
    actor: Actor,
    body: web::Json<CreateDeliveryRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = body.into_inner().order_id;

    let request =
        web::block(move || state.deliveries.request_delivery(&actor, order_id)).await??;

    Ok(HttpResponse::Created().json(DeliveryRequestResponse::from(request)))
}

/// GET /delivery-requests/{id}
#[utoipa::path(
    get,
    path = "/delivery-requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Delivery request UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "Caller role"),
    ),
    responses(
        (status = 200, description = "Delivery request found", body = DeliveryRequestResponse),
        (status = 404, description = "Delivery request not found"),
    ),
    tag = "delivery-requests"
)]
pub async fn get_delivery_request(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let request = web::block(move || state.deliveries.get_delivery_request(&actor, id)).await??;

    Ok(HttpResponse::Ok().json(DeliveryRequestResponse::from(request)))
}

/// POST /delivery-requests/{id}/accept
#[utoipa::path(
    post,
    path = "/delivery-requests/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Delivery request UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "DRIVER"),
    ),
    responses(
        (status = 204, description = "Delivery request accepted"),
        (status = 403, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "delivery-requests"
)]
pub async fn accept(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.deliveries.accept(&actor, id))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /delivery-requests/{id}/pick-up
///
/// Moves the request to `PICKED_UP` and its order to `IN_TRANSIT`.
#[utoipa::path(
    post,
    path = "/delivery-requests/{id}/pick-up",
    params(
        ("id" = Uuid, Path, description = "Delivery request UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "DRIVER"),
    ),
    responses(
        (status = 204, description = "Picked up"),
        (status = 403, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "delivery-requests"
)]
pub async fn pick_up(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.deliveries.pick_up(&actor, id))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /delivery-requests/{id}/deliver
///
/// Moves the request and its order to `DELIVERED`.
#[utoipa::path(
    post,
    path = "/delivery-requests/{id}/deliver",
    request_body(content = DeliverRequest, description = "Optional payment proof"),
    params(
        ("id" = Uuid, Path, description = "Delivery request UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "DRIVER"),
    ),
    responses(
        (status = 204, description = "Delivered"),
        (status = 403, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "delivery-requests"
)]
pub async fn deliver(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
    body: Option<web::Json<DeliverRequest>>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payment_proof = body.map(|b| b.into_inner()).unwrap_or_default().payment_proof;

    web::block(move || state.deliveries.deliver(&actor, id, payment_proof))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /delivery-requests/{id}/cancel
///
/// Only `PENDING` and `ACCEPTED` requests can be cancelled.
#[utoipa::path(
    post,
    path = "/delivery-requests/{id}/cancel",
    params(
        ("id" = Uuid, Path, description = "Delivery request UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "ADMIN"),
    ),
    responses(
        (status = 204, description = "Delivery request cancelled"),
        (status = 403, description = "Failed to update status"),
        (status = 409, description = "Failed to update status"),
    ),
    tag = "delivery-requests"
)]
pub async fn cancel(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || state.deliveries.cancel(&actor, id))
        .await?
        .map_err(AppError::status_update)?;

    Ok(HttpResponse::NoContent().finish())
}

/// PUT /delivery-requests/{id}/admin-commission
#[utoipa::path(
    put,
    path = "/delivery-requests/{id}/admin-commission",
    request_body = AdminCommissionRequest,
    params(
        ("id" = Uuid, Path, description = "Delivery request UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "ADMIN"),
    ),
    responses(
        (status = 204, description = "Commission flag updated"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Delivery request not found"),
    ),
    tag = "delivery-requests"
)]
pub async fn set_admin_commission(
    state: web::Data<AppState>,
    actor: Actor,
    path: web::Path<Uuid>,
    body: web::Json<AdminCommissionRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let enabled = body.into_inner().enabled;

    web::block(move || state.deliveries.set_admin_commission(&actor, id, enabled)).await??;

    Ok(HttpResponse::NoContent().finish())
}
