pub mod crops;
pub mod deliveries;
pub mod orders;

use actix_web::web;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::badge::Badge;

#[derive(Debug, Serialize, ToSchema)]
pub struct BadgeResponse {
    pub label: String,
    /// Style class for the badge, e.g. "bg-green-100 text-green-800"
    pub class: String,
}

impl From<Badge> for BadgeResponse {
    fn from(badge: Badge) -> Self {
        Self {
            label: badge.label.to_string(),
            class: badge.class.to_string(),
        }
    }
}

/// Registers every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/crops")
            .route("", web::post().to(crops::create_crop))
            .route("", web::get().to(crops::get_farmer_crops))
            .route("/{id}", web::get().to(crops::get_crop)),
    )
    .service(
        web::scope("/orders")
            .route("", web::post().to(orders::create_order))
            .route("/{id}", web::get().to(orders::get_order))
            .route(
                "/{id}/ready-for-delivery",
                web::post().to(orders::mark_as_ready_for_delivery),
            )
            .route("/{id}/cancel", web::post().to(orders::cancel_order))
            .route(
                "/{id}/payment-proof",
                web::post().to(orders::upload_payment_proof),
            )
            .route(
                "/{id}/confirm-payment",
                web::post().to(orders::confirm_payment),
            ),
    )
    .service(
        web::scope("/delivery-requests")
            .route("", web::post().to(deliveries::request_delivery))
            .route("/{id}", web::get().to(deliveries::get_delivery_request))
            .route("/{id}/accept", web::post().to(deliveries::accept))
            .route("/{id}/pick-up", web::post().to(deliveries::pick_up))
            .route("/{id}/deliver", web::post().to(deliveries::deliver))
            .route("/{id}/cancel", web::post().to(deliveries::cancel))
            .route(
                "/{id}/admin-commission",
                web::put().to(deliveries::set_admin_commission),
            ),
    );
}
