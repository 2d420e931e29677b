//! Mutex-guarded in-memory repositories for service and handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::crop::{Crop, CropFilter, NewCrop};
use crate::domain::delivery::{DeliveryRequest, DeliveryTransition};
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::{CropRepository, DeliveryRequestRepository, OrderRepository};
use crate::domain::status::{DeliveryStatus, OrderStatus};

#[derive(Default)]
struct State {
    crops: HashMap<Uuid, Crop>,
    orders: HashMap<Uuid, Order>,
    deliveries: HashMap<Uuid, DeliveryRequest>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("store lock poisoned")
    }

    /// Overwrites an order's status, bypassing the transition rules.
    pub fn force_order_status(&self, id: Uuid, status: OrderStatus) {
        if let Some(order) = self.lock().orders.get_mut(&id) {
            order.status = status;
        }
    }

    pub fn crop_quantity(&self, id: Uuid) -> Option<i32> {
        self.lock().crops.get(&id).map(|c| c.available_quantity)
    }
}

impl CropRepository for InMemoryStore {
    fn create(&self, farmer_id: Uuid, crop: NewCrop) -> Result<Crop, DomainError> {
        let now = Utc::now();
        let crop = Crop {
            id: Uuid::new_v4(),
            farmer_id,
            name: crop.name,
            available_quantity: crop.available_quantity,
            unit: crop.unit,
            price_per_unit: crop.price_per_unit,
            created_at: now,
            updated_at: now,
        };
        self.lock().crops.insert(crop.id, crop.clone());
        Ok(crop)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, DomainError> {
        Ok(self.lock().crops.get(&id).cloned())
    }

    fn list_by_farmer(
        &self,
        farmer_id: Uuid,
        _filter: &CropFilter,
    ) -> Result<Vec<Crop>, DomainError> {
        let mut crops: Vec<Crop> = self
            .lock()
            .crops
            .values()
            .filter(|c| c.farmer_id == farmer_id)
            .cloned()
            .collect();
        crops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(crops)
    }
}

impl OrderRepository for InMemoryStore {
    fn create(&self, customer_id: Uuid, order: NewOrder) -> Result<Order, DomainError> {
        let mut state = self.lock();
        let crop = state
            .crops
            .get_mut(&order.crop_id)
            .ok_or(DomainError::NotFound("Crop"))?;
        if crop.available_quantity < order.quantity {
            return Err(DomainError::Conflict("insufficient stock".to_string()));
        }
        crop.available_quantity -= order.quantity;
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            crop_id: crop.id,
            customer_id,
            farmer_id: crop.farmer_id,
            quantity: order.quantity,
            status: OrderStatus::PendingPayment,
            payment_proof: None,
            created_at: now,
            updated_at: now,
        };
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.lock().orders.get(&id).cloned())
    }

    fn set_payment_proof(
        &self,
        id: Uuid,
        expected: OrderStatus,
        reference: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.lock();
        match state.orders.get_mut(&id) {
            Some(order) if order.status == expected => {
                order.payment_proof = Some(reference.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let State {
            crops,
            orders,
            deliveries,
        } = &mut *state;
        let Some(order) = orders.get_mut(&id).filter(|o| o.status == from) else {
            return Ok(false);
        };
        order.status = to;
        if to == OrderStatus::Cancelled {
            if let Some(crop) = crops.get_mut(&order.crop_id) {
                crop.available_quantity += order.quantity;
            }
            deliveries
                .values_mut()
                .filter(|d| d.order_id == id && !d.status.is_terminal())
                .for_each(|d| d.status = DeliveryStatus::Cancelled);
        }
        Ok(true)
    }
}

impl DeliveryRequestRepository for InMemoryStore {
    fn create(&self, order_id: Uuid) -> Result<DeliveryRequest, DomainError> {
        let mut state = self.lock();
        if state
            .deliveries
            .values()
            .any(|d| d.order_id == order_id && !d.status.is_terminal())
        {
            return Err(DomainError::Conflict(format!(
                "order {order_id} already has an open delivery request"
            )));
        }
        let now = Utc::now();
        let request = DeliveryRequest {
            id: Uuid::new_v4(),
            order_id,
            driver_id: None,
            status: DeliveryStatus::Pending,
            admin_commission: false,
            payment_proof: None,
            created_at: now,
            updated_at: now,
        };
        state.deliveries.insert(request.id, request.clone());
        Ok(request)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<DeliveryRequest>, DomainError> {
        Ok(self.lock().deliveries.get(&id).cloned())
    }

    fn find_open_for_order(&self, order_id: Uuid) -> Result<Option<DeliveryRequest>, DomainError> {
        Ok(self
            .lock()
            .deliveries
            .values()
            .find(|d| d.order_id == order_id && !d.status.is_terminal())
            .cloned())
    }

    fn transition(&self, change: DeliveryTransition) -> Result<bool, DomainError> {
        let mut state = self.lock();
        let State {
            orders, deliveries, ..
        } = &mut *state;

        let delivery_matches = deliveries
            .get(&change.id)
            .is_some_and(|d| d.status == change.from);
        let order_matches = change.order.map_or(true, |linked| {
            orders
                .get(&linked.order_id)
                .is_some_and(|o| o.status == linked.from)
        });
        if !delivery_matches || !order_matches {
            return Ok(false);
        }

        if let Some(request) = deliveries.get_mut(&change.id) {
            request.status = change.to;
            if change.driver_id.is_some() {
                request.driver_id = change.driver_id;
            }
            if change.payment_proof.is_some() {
                request.payment_proof = change.payment_proof;
            }
        }
        if let Some(linked) = change.order {
            if let Some(order) = orders.get_mut(&linked.order_id) {
                order.status = linked.to;
            }
        }
        Ok(true)
    }

    fn set_admin_commission(&self, id: Uuid, enabled: bool) -> Result<bool, DomainError> {
        match self.lock().deliveries.get_mut(&id) {
            Some(request) => {
                request.admin_commission = enabled;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
