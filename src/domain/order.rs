use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::lifecycle::OrderAction;
use super::status::OrderStatus;

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub crop_id: Uuid,
    pub quantity: i32,
}

impl NewOrder {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity <= 0 {
            return Err(DomainError::InvalidInput(
                "quantity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub customer_id: Uuid,
    pub farmer_id: Uuid,
    pub quantity: i32,
    pub status: OrderStatus,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn available_actions(&self) -> Vec<OrderAction> {
        self.status.available_actions()
    }

    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.customer_id == user_id || self.farmer_id == user_id
    }
}
