use utoipa::OpenApi;

use crate::domain::lifecycle::OrderAction;
use crate::domain::status::{DeliveryStatus, OrderStatus};
use crate::domain::stock::StockLevel;
use crate::handlers::{crops, deliveries, orders, BadgeResponse};

#[derive(OpenApi)]
#[openapi(
    info(title = "Farm Market API", description = "Crop listings, orders and deliveries"),
    paths(
        crops::create_crop,
        crops::get_farmer_crops,
        crops::get_crop,
        orders::create_order,
        orders::get_order,
        orders::mark_as_ready_for_delivery,
        orders::cancel_order,
        orders::upload_payment_proof,
        orders::confirm_payment,
        deliveries::request_delivery,
        deliveries::get_delivery_request,
        deliveries::accept,
        deliveries::pick_up,
        deliveries::deliver,
        deliveries::cancel,
        deliveries::set_admin_commission,
    ),
    components(schemas(
        BadgeResponse,
        StockLevel,
        OrderStatus,
        DeliveryStatus,
        OrderAction,
        crops::CreateCropRequest,
        crops::CropResponse,
        crops::CropInventoryResponse,
        orders::CreateOrderRequest,
        orders::PaymentProofRequest,
        orders::OrderResponse,
        deliveries::CreateDeliveryRequest,
        deliveries::DeliverRequest,
        deliveries::AdminCommissionRequest,
        deliveries::DeliveryRequestResponse,
    )),
    tags(
        (name = "crops", description = "Farmer crop inventory"),
        (name = "orders", description = "Order lifecycle"),
        (name = "delivery-requests", description = "Delivery workflow"),
    )
)]
pub struct ApiDoc;
