use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::domain::delivery::{DeliveryRequest, DeliveryTransition, LinkedOrderChange};
use crate::domain::errors::DomainError;
use crate::domain::lifecycle::DeliveryAction;
use crate::domain::ports::{DeliveryRequestRepository, OrderRepository};
use crate::domain::status::OrderStatus;

pub struct DeliveryService<D, O> {
    deliveries: D,
    orders: O,
}

impl<D: DeliveryRequestRepository, O: OrderRepository> DeliveryService<D, O> {
    pub fn new(deliveries: D, orders: O) -> Self {
        Self { deliveries, orders }
    }

    /// Opens a delivery request for an order that is ready for delivery.
    /// An order has at most one open request.
    pub fn request_delivery(
        &self,
        actor: &Actor,
        order_id: Uuid,
    ) -> Result<DeliveryRequest, DomainError> {
        let order = self
            .orders
            .find_by_id(order_id)?
            .ok_or(DomainError::NotFound("Order"))?;
        actor.require_owner_or_admin(order.farmer_id)?;
        if order.status != OrderStatus::ReadyForDelivery {
            return Err(DomainError::InvalidTransition {
                from: order.status.as_str(),
                action: "request delivery",
            });
        }
        if let Some(open) = self.deliveries.find_open_for_order(order_id)? {
            return Err(DomainError::Conflict(format!(
                "order {} already has delivery request {}",
                order_id, open.id
            )));
        }
        let request = self.deliveries.create(order_id)?;
        log::info!("Delivery request {} opened for order {}", request.id, order_id);
        Ok(request)
    }

    pub fn get_delivery_request(&self, actor: &Actor, id: Uuid) -> Result<DeliveryRequest, DomainError> {
        let request = self.load(id)?;
        match actor.role {
            Role::Admin | Role::Driver => Ok(request),
            Role::Farmer | Role::Customer => {
                let visible = self
                    .orders
                    .find_by_id(request.order_id)?
                    .is_some_and(|order| order.is_party(actor.id));
                if visible {
                    Ok(request)
                } else {
                    Err(DomainError::NotFound("Delivery request"))
                }
            }
        }
    }

    pub fn accept(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        actor.require_role(Role::Driver)?;
        let request = self.load(id)?;
        self.apply(&request, DeliveryAction::Accept, Some(actor.id), None)
    }

    pub fn pick_up(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        let request = self.load(id)?;
        Self::require_assigned_driver(actor, &request)?;
        self.apply(&request, DeliveryAction::PickUp, None, None)
    }

    pub fn deliver(
        &self,
        actor: &Actor,
        id: Uuid,
        payment_proof: Option<String>,
    ) -> Result<(), DomainError> {
        let request = self.load(id)?;
        Self::require_assigned_driver(actor, &request)?;
        let payment_proof = payment_proof
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self.apply(&request, DeliveryAction::Deliver, None, payment_proof)
    }

    pub fn cancel(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        actor.require_role(Role::Admin)?;
        let request = self.load(id)?;
        self.apply(&request, DeliveryAction::Cancel, None, None)
    }

    pub fn set_admin_commission(
        &self,
        actor: &Actor,
        id: Uuid,
        enabled: bool,
    ) -> Result<(), DomainError> {
        actor.require_role(Role::Admin)?;
        if !self.deliveries.set_admin_commission(id, enabled)? {
            return Err(DomainError::NotFound("Delivery request"));
        }
        log::info!("Admin commission on delivery request {} set to {}", id, enabled);
        Ok(())
    }

    fn require_assigned_driver(actor: &Actor, request: &DeliveryRequest) -> Result<(), DomainError> {
        actor.require_role(Role::Driver)?;
        if request.driver_id != Some(actor.id) {
            return Err(DomainError::Forbidden(
                "delivery request is assigned to another driver".to_string(),
            ));
        }
        Ok(())
    }

    fn load(&self, id: Uuid) -> Result<DeliveryRequest, DomainError> {
        self.deliveries
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Delivery request"))
    }

    fn apply(
        &self,
        request: &DeliveryRequest,
        action: DeliveryAction,
        driver_id: Option<Uuid>,
        payment_proof: Option<String>,
    ) -> Result<(), DomainError> {
        let target = request.status.apply(action).inspect_err(|e| {
            log::warn!("Rejected transition on delivery request {}: {}", request.id, e);
        })?;

        let order = match action.order_action() {
            Some(order_action) => {
                let order = self
                    .orders
                    .find_by_id(request.order_id)?
                    .ok_or(DomainError::NotFound("Order"))?;
                Some(LinkedOrderChange {
                    order_id: order.id,
                    from: order.status,
                    to: order.status.apply(order_action)?,
                })
            }
            None => None,
        };

        let applied = self.deliveries.transition(DeliveryTransition {
            id: request.id,
            from: request.status,
            to: target,
            driver_id,
            payment_proof,
            order,
        })?;
        if !applied {
            log::warn!(
                "Delivery request {} changed before '{}' was applied",
                request.id,
                action.name()
            );
            return Err(DomainError::Conflict(format!(
                "delivery request {} was modified concurrently",
                request.id
            )));
        }
        log::info!(
            "Delivery request {} moved {} -> {}",
            request.id,
            request.status,
            target
        );
        Ok(())
    }
}
