use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::status::{DeliveryStatus, OrderStatus};

#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    pub id: Uuid,
    pub order_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub status: DeliveryStatus,
    pub admin_commission: bool,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order status change applied atomically with a delivery transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkedOrderChange {
    pub order_id: Uuid,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// A conditional delivery status update: it applies only while the stored
/// status still equals `from`.
#[derive(Debug, Clone)]
pub struct DeliveryTransition {
    pub id: Uuid,
    pub from: DeliveryStatus,
    pub to: DeliveryStatus,
    /// Assigns the driver when set.
    pub driver_id: Option<Uuid>,
    /// Stores the payment proof when set.
    pub payment_proof: Option<String>,
    pub order: Option<LinkedOrderChange>,
}
