//! Transition tables for orders and delivery requests.

use serde::Serialize;
use utoipa::ToSchema;

use super::errors::DomainError;
use super::status::{DeliveryStatus, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    MarkReadyForDelivery,
    Cancel,
    ConfirmPayment,
    Dispatch,
    Complete,
}

/// Actions a client may be offered for an order, in display order.
/// The remaining actions are driven by payment confirmation and the
/// delivery workflow.
pub const OFFERED_ORDER_ACTIONS: [OrderAction; 2] =
    [OrderAction::MarkReadyForDelivery, OrderAction::Cancel];

impl OrderAction {
    pub fn name(self) -> &'static str {
        match self {
            OrderAction::MarkReadyForDelivery => "mark ready for delivery",
            OrderAction::Cancel => "cancel",
            OrderAction::ConfirmPayment => "confirm payment",
            OrderAction::Dispatch => "dispatch",
            OrderAction::Complete => "complete",
        }
    }

    pub fn target(self) -> OrderStatus {
        match self {
            OrderAction::MarkReadyForDelivery => OrderStatus::ReadyForDelivery,
            OrderAction::Cancel => OrderStatus::Cancelled,
            OrderAction::ConfirmPayment => OrderStatus::PaymentReceived,
            OrderAction::Dispatch => OrderStatus::InTransit,
            OrderAction::Complete => OrderStatus::Delivered,
        }
    }

    pub fn is_permitted_from(self, from: OrderStatus) -> bool {
        match self {
            OrderAction::MarkReadyForDelivery => from == OrderStatus::PaymentReceived,
            OrderAction::Cancel => !from.is_terminal(),
            OrderAction::ConfirmPayment => from == OrderStatus::PendingPayment,
            OrderAction::Dispatch => from == OrderStatus::ReadyForDelivery,
            OrderAction::Complete => from == OrderStatus::InTransit,
        }
    }
}

impl OrderStatus {
    /// Actions to offer for an order currently in this status.
    pub fn available_actions(self) -> Vec<OrderAction> {
        OFFERED_ORDER_ACTIONS
            .into_iter()
            .filter(|action| action.is_permitted_from(self))
            .collect()
    }

    pub fn apply(self, action: OrderAction) -> Result<OrderStatus, DomainError> {
        if action.is_permitted_from(self) {
            Ok(action.target())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str(),
                action: action.name(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryAction {
    Accept,
    PickUp,
    Deliver,
    Cancel,
}

impl DeliveryAction {
    pub fn name(self) -> &'static str {
        match self {
            DeliveryAction::Accept => "accept",
            DeliveryAction::PickUp => "pick up",
            DeliveryAction::Deliver => "deliver",
            DeliveryAction::Cancel => "cancel",
        }
    }

    pub fn target(self) -> DeliveryStatus {
        match self {
            DeliveryAction::Accept => DeliveryStatus::Accepted,
            DeliveryAction::PickUp => DeliveryStatus::PickedUp,
            DeliveryAction::Deliver => DeliveryStatus::Delivered,
            DeliveryAction::Cancel => DeliveryStatus::Cancelled,
        }
    }

    pub fn is_permitted_from(self, from: DeliveryStatus) -> bool {
        match self {
            DeliveryAction::Accept => from == DeliveryStatus::Pending,
            DeliveryAction::PickUp => from == DeliveryStatus::Accepted,
            DeliveryAction::Deliver => from == DeliveryStatus::PickedUp,
            // Once picked up, the goods are stopped by cancelling the order.
            DeliveryAction::Cancel => {
                matches!(from, DeliveryStatus::Pending | DeliveryStatus::Accepted)
            }
        }
    }

    /// The order transition that must happen together with this one, if any.
    pub fn order_action(self) -> Option<OrderAction> {
        match self {
            DeliveryAction::PickUp => Some(OrderAction::Dispatch),
            DeliveryAction::Deliver => Some(OrderAction::Complete),
            DeliveryAction::Accept | DeliveryAction::Cancel => None,
        }
    }
}

impl DeliveryStatus {
    pub fn apply(self, action: DeliveryAction) -> Result<DeliveryStatus, DomainError> {
        if action.is_permitted_from(self) {
            Ok(action.target())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str(),
                action: action.name(),
            })
        }
    }
}
