use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::BadgeResponse;
use crate::domain::actor::Actor;
use crate::domain::crop::{Crop, CropFilter, CropInventory, NewCrop};
use crate::domain::stock::StockLevel;
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCropRequest {
    pub name: String,
    pub available_quantity: i32,
    /// Unit the quantity is counted in, e.g. "kg"
    pub unit: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price_per_unit: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CropResponse {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub name: String,
    pub available_quantity: i32,
    pub unit: String,
    pub price_per_unit: String,
    pub stock_level: StockLevel,
    pub stock_badge: BadgeResponse,
    pub created_at: String,
}

impl From<Crop> for CropResponse {
    fn from(crop: Crop) -> Self {
        let stock_level = crop.stock_level();
        Self {
            id: crop.id,
            farmer_id: crop.farmer_id,
            name: crop.name,
            available_quantity: crop.available_quantity,
            unit: crop.unit,
            price_per_unit: crop.price_per_unit.to_string(),
            stock_level,
            stock_badge: stock_level.badge().into(),
            created_at: crop.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CropInventoryResponse {
    pub count: usize,
    pub items: Vec<CropResponse>,
}

impl From<CropInventory> for CropInventoryResponse {
    fn from(inventory: CropInventory) -> Self {
        Self {
            count: inventory.count,
            items: inventory.items.into_iter().map(CropResponse::from).collect(),
        }
    }
}

/// Filter for the crop list. Accepts no criteria yet.
#[derive(Debug, Default, Deserialize)]
pub struct CropFilterParams {}

impl From<CropFilterParams> for CropFilter {
    fn from(_: CropFilterParams) -> Self {
        CropFilter::default()
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /crops
///
/// Lists a new crop for the calling farmer.
#[utoipa::path(
    post,
    path = "/crops",
    request_body = CreateCropRequest,
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "FARMER"),
    ),
    responses(
        (status = 201, description = "Crop listed", body = CropResponse),
        (status = 400, description = "Invalid crop"),
        (status = 403, description = "Caller is not a farmer"),
    ),
    tag = "crops"
)]
pub async fn create_crop(
    state: web::Data<AppState>,
    actor: Actor,
    body: web::Json<CreateCropRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let price_per_unit = BigDecimal::from_str(&body.price_per_unit).map_err(|e| {
        AppError::BadRequest(format!(
            "Invalid price_per_unit '{}': {}",
            body.price_per_unit, e
        ))
    })?;
    let crop = NewCrop {
        name: body.name,
        available_quantity: body.available_quantity,
        unit: body.unit,
        price_per_unit,
    };

    let crop = web::block(move || state.crops.create_crop(&actor, crop)).await??;

    Ok(HttpResponse::Created().json(CropResponse::from(crop)))
}

/// GET /crops
///
/// Returns every crop owned by the calling farmer with its stock badge.
/// The list is not paginated.
#[utoipa::path(
    get,
    path = "/crops",
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user"),
        ("X-User-Role" = String, Header, description = "FARMER"),
    ),
    responses(
        (status = 200, description = "The farmer's inventory", body = CropInventoryResponse),
        (status = 403, description = "Caller is not a farmer"),
    ),
    tag = "crops"
)]
pub async fn get_farmer_crops(
    state: web::Data<AppState>,
    actor: Actor,
    query: web::Query<CropFilterParams>,
) -> Result<HttpResponse, AppError> {
    let filter = CropFilter::from(query.into_inner());

    let inventory =
        web::block(move || state.crops.get_farmer_crops(&actor, &filter)).await??;

    Ok(HttpResponse::Ok().json(CropInventoryResponse::from(inventory)))
}

/// GET /crops/{id}
#[utoipa::path(
    get,
    path = "/crops/{id}",
    params(
        ("id" = Uuid, Path, description = "Crop UUID"),
    ),
    responses(
        (status = 200, description = "Crop found", body = CropResponse),
        (status = 404, description = "Crop not found"),
    ),
    tag = "crops"
)]
pub async fn get_crop(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let crop = web::block(move || state.crops.get_crop(id)).await??;

    Ok(HttpResponse::Ok().json(CropResponse::from(crop)))
}
