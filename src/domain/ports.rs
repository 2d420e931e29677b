use std::sync::Arc;

use uuid::Uuid;

use super::crop::{Crop, CropFilter, NewCrop};
use super::delivery::{DeliveryRequest, DeliveryTransition};
use super::errors::DomainError;
use super::order::{NewOrder, Order};
use super::status::OrderStatus;

pub trait CropRepository: Send + Sync + 'static {
    fn create(&self, farmer_id: Uuid, crop: NewCrop) -> Result<Crop, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, DomainError>;
    /// Every crop owned by `farmer_id` matching `filter`, newest first.
    fn list_by_farmer(&self, farmer_id: Uuid, filter: &CropFilter)
        -> Result<Vec<Crop>, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Creates the order in `PENDING_PAYMENT` and reserves its quantity from
    /// the crop. Fails with `NotFound` for an unknown crop and `Conflict`
    /// when the crop has less stock than ordered.
    fn create(&self, customer_id: Uuid, order: NewOrder) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    /// Stores the payment proof if the order is still in `expected`.
    /// Returns `false` when no row matched.
    fn set_payment_proof(
        &self,
        id: Uuid,
        expected: OrderStatus,
        reference: &str,
    ) -> Result<bool, DomainError>;
    /// Moves the order from `from` to `to` if it is still in `from`.
    /// Returns `false` when no row matched. Moving to `CANCELLED` releases
    /// the reserved quantity back to the crop and cancels the order's open
    /// delivery request in the same transaction.
    fn transition(&self, id: Uuid, from: OrderStatus, to: OrderStatus)
        -> Result<bool, DomainError>;
}

pub trait DeliveryRequestRepository: Send + Sync + 'static {
    /// Opens a `PENDING` request. Fails with `Conflict` when the order
    /// already has an open request.
    fn create(&self, order_id: Uuid) -> Result<DeliveryRequest, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<DeliveryRequest>, DomainError>;
    /// The non-terminal request for `order_id`, if any.
    fn find_open_for_order(&self, order_id: Uuid) -> Result<Option<DeliveryRequest>, DomainError>;
    /// Applies the delivery change and its linked order change in one
    /// transaction. Returns `false`, changing nothing, when either row is no
    /// longer in its expected status.
    fn transition(&self, change: DeliveryTransition) -> Result<bool, DomainError>;
    /// Applies to requests in any status. Returns `false` when the request
    /// does not exist.
    fn set_admin_commission(&self, id: Uuid, enabled: bool) -> Result<bool, DomainError>;
}

impl<T: CropRepository + ?Sized> CropRepository for Arc<T> {
    fn create(&self, farmer_id: Uuid, crop: NewCrop) -> Result<Crop, DomainError> {
        (**self).create(farmer_id, crop)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, DomainError> {
        (**self).find_by_id(id)
    }

    fn list_by_farmer(
        &self,
        farmer_id: Uuid,
        filter: &CropFilter,
    ) -> Result<Vec<Crop>, DomainError> {
        (**self).list_by_farmer(farmer_id, filter)
    }
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn create(&self, customer_id: Uuid, order: NewOrder) -> Result<Order, DomainError> {
        (**self).create(customer_id, order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }

    fn set_payment_proof(
        &self,
        id: Uuid,
        expected: OrderStatus,
        reference: &str,
    ) -> Result<bool, DomainError> {
        (**self).set_payment_proof(id, expected, reference)
    }

    fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, DomainError> {
        (**self).transition(id, from, to)
    }
}

impl<T: DeliveryRequestRepository + ?Sized> DeliveryRequestRepository for Arc<T> {
    fn create(&self, order_id: Uuid) -> Result<DeliveryRequest, DomainError> {
        (**self).create(order_id)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<DeliveryRequest>, DomainError> {
        (**self).find_by_id(id)
    }

    fn find_open_for_order(&self, order_id: Uuid) -> Result<Option<DeliveryRequest>, DomainError> {
        (**self).find_open_for_order(order_id)
    }

    fn transition(&self, change: DeliveryTransition) -> Result<bool, DomainError> {
        (**self).transition(change)
    }

    fn set_admin_commission(&self, id: Uuid, enabled: bool) -> Result<bool, DomainError> {
        (**self).set_admin_commission(id, enabled)
    }
}
