use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::domain::errors::DomainError;
use crate::domain::lifecycle::OrderAction;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderRepository;
use crate::domain::status::OrderStatus;

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_order(&self, actor: &Actor, order: NewOrder) -> Result<Order, DomainError> {
        actor.require_role(Role::Customer)?;
        order.validate()?;
        let order = self.repo.create(actor.id, order)?;
        log::info!(
            "Customer {} placed order {} for {} of crop {}",
            actor.id,
            order.id,
            order.quantity,
            order.crop_id
        );
        Ok(order)
    }

    /// Admins and drivers see every order; customers and farmers only their own.
    pub fn get_order(&self, actor: &Actor, id: Uuid) -> Result<Order, DomainError> {
        let order = self.load(id)?;
        match actor.role {
            Role::Admin | Role::Driver => Ok(order),
            Role::Customer | Role::Farmer if order.is_party(actor.id) => Ok(order),
            _ => Err(DomainError::NotFound("Order")),
        }
    }

    pub fn mark_as_ready_for_delivery(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        let order = self.load(id)?;
        actor.require_owner_or_admin(order.farmer_id)?;
        self.apply(&order, OrderAction::MarkReadyForDelivery)
    }

    pub fn cancel_order(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        let order = self.load(id)?;
        if !actor.is_admin() && !order.is_party(actor.id) {
            return Err(DomainError::Forbidden("not a party to this order".to_string()));
        }
        self.apply(&order, OrderAction::Cancel)
    }

    pub fn upload_payment_proof(
        &self,
        actor: &Actor,
        id: Uuid,
        reference: &str,
    ) -> Result<(), DomainError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(DomainError::InvalidInput(
                "payment proof reference must not be empty".to_string(),
            ));
        }
        let order = self.load(id)?;
        if order.customer_id != actor.id {
            return Err(DomainError::Forbidden("not the ordering customer".to_string()));
        }
        if order.status != OrderStatus::PendingPayment {
            return Err(DomainError::InvalidTransition {
                from: order.status.as_str(),
                action: "upload payment proof",
            });
        }
        if !self
            .repo
            .set_payment_proof(id, OrderStatus::PendingPayment, reference)?
        {
            return Err(DomainError::Conflict(format!(
                "order {id} changed while uploading payment proof"
            )));
        }
        log::info!("Payment proof uploaded for order {}", id);
        Ok(())
    }

    pub fn confirm_payment(&self, actor: &Actor, id: Uuid) -> Result<(), DomainError> {
        actor.require_role(Role::Admin)?;
        let order = self.load(id)?;
        if order.payment_proof.is_none() {
            return Err(DomainError::InvalidInput(
                "no payment proof on file".to_string(),
            ));
        }
        self.apply(&order, OrderAction::ConfirmPayment)
    }

    fn load(&self, id: Uuid) -> Result<Order, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Order"))
    }

    fn apply(&self, order: &Order, action: OrderAction) -> Result<(), DomainError> {
        let target = order.status.apply(action).inspect_err(|e| {
            log::warn!("Rejected transition on order {}: {}", order.id, e);
        })?;
        if !self.repo.transition(order.id, order.status, target)? {
            log::warn!(
                "Order {} left {} before '{}' was applied",
                order.id,
                order.status,
                action.name()
            );
            return Err(DomainError::Conflict(format!(
                "order {} is no longer {}",
                order.id, order.status
            )));
        }
        log::info!("Order {} moved {} -> {}", order.id, order.status, target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::crop::NewCrop;
    use crate::domain::ports::CropRepository;
    use crate::infrastructure::memory::InMemoryStore;

    struct Fixture {
        store: InMemoryStore,
        service: OrderService<InMemoryStore>,
        farmer: Actor,
        customer: Actor,
        admin: Actor,
        crop_id: Uuid,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let farmer = Actor::new(Uuid::new_v4(), Role::Farmer);
        let crop = CropRepository::create(
            &store,
            farmer.id,
            NewCrop {
                name: "Beans".to_string(),
                available_quantity: 20,
                unit: "kg".to_string(),
                price_per_unit: BigDecimal::from_str("3.10").unwrap(),
            },
        )
        .unwrap();
        Fixture {
            service: OrderService::new(store.clone()),
            store,
            farmer,
            customer: Actor::new(Uuid::new_v4(), Role::Customer),
            admin: Actor::new(Uuid::new_v4(), Role::Admin),
            crop_id: crop.id,
        }
    }

    fn place(f: &Fixture, quantity: i32) -> Order {
        f.service
            .create_order(
                &f.customer,
                NewOrder {
                    crop_id: f.crop_id,
                    quantity,
                },
            )
            .unwrap()
    }

    #[test]
    fn new_orders_await_payment_and_reserve_stock() {
        let f = fixture();
        let order = place(&f, 5);
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.farmer_id, f.farmer.id);
        assert_eq!(f.store.crop_quantity(f.crop_id), Some(15));
    }

    #[test]
    fn ordering_more_than_available_is_a_conflict() {
        let f = fixture();
        let result = f.service.create_order(
            &f.customer,
            NewOrder {
                crop_id: f.crop_id,
                quantity: 21,
            },
        );
        assert!(matches!(result, Err(DomainError::Conflict(_))));
        assert_eq!(f.store.crop_quantity(f.crop_id), Some(20));
    }

    #[test]
    fn payment_flow_reaches_ready_for_delivery() {
        let f = fixture();
        let order = place(&f, 2);

        f.service
            .upload_payment_proof(&f.customer, order.id, "https://files.example/receipt.png")
            .unwrap();
        f.service.confirm_payment(&f.admin, order.id).unwrap();

        let paid = f.service.get_order(&f.farmer, order.id).unwrap();
        assert_eq!(paid.status, OrderStatus::PaymentReceived);
        assert_eq!(
            paid.available_actions(),
            vec![OrderAction::MarkReadyForDelivery, OrderAction::Cancel]
        );

        f.service
            .mark_as_ready_for_delivery(&f.farmer, order.id)
            .unwrap();
        let ready = f.service.get_order(&f.customer, order.id).unwrap();
        assert_eq!(ready.status, OrderStatus::ReadyForDelivery);
        assert_eq!(ready.available_actions(), vec![OrderAction::Cancel]);
    }

    #[test]
    fn confirming_payment_requires_proof() {
        let f = fixture();
        let order = place(&f, 1);
        assert!(matches!(
            f.service.confirm_payment(&f.admin, order.id),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn only_admins_confirm_payment() {
        let f = fixture();
        let order = place(&f, 1);
        f.service
            .upload_payment_proof(&f.customer, order.id, "proof-1")
            .unwrap();
        assert!(matches!(
            f.service.confirm_payment(&f.farmer, order.id),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn mark_ready_before_payment_is_rejected() {
        let f = fixture();
        let order = place(&f, 1);
        let err = f
            .service
            .mark_as_ready_for_delivery(&f.farmer, order.id)
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidTransition {
                from: "PENDING_PAYMENT",
                ..
            }
        ));
    }

    #[test]
    fn other_farmers_cannot_mark_ready() {
        let f = fixture();
        let order = place(&f, 1);
        f.store.force_order_status(order.id, OrderStatus::PaymentReceived);
        let stranger = Actor::new(Uuid::new_v4(), Role::Farmer);
        assert!(matches!(
            f.service.mark_as_ready_for_delivery(&stranger, order.id),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn cancel_releases_stock() {
        let f = fixture();
        let order = place(&f, 8);
        assert_eq!(f.store.crop_quantity(f.crop_id), Some(12));

        f.service.cancel_order(&f.customer, order.id).unwrap();

        let cancelled = f.service.get_order(&f.customer, order.id).unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert!(cancelled.available_actions().is_empty());
        assert_eq!(f.store.crop_quantity(f.crop_id), Some(20));
    }

    #[test]
    fn cancelling_twice_is_rejected() {
        let f = fixture();
        let order = place(&f, 1);
        f.service.cancel_order(&f.customer, order.id).unwrap();
        assert!(matches!(
            f.service.cancel_order(&f.customer, order.id),
            Err(DomainError::InvalidTransition {
                from: "CANCELLED",
                action: "cancel"
            })
        ));
    }

    #[test]
    fn delivered_orders_cannot_be_cancelled() {
        let f = fixture();
        let order = place(&f, 1);
        f.store.force_order_status(order.id, OrderStatus::Delivered);
        assert!(f.service.cancel_order(&f.admin, order.id).is_err());
    }

    #[test]
    fn strangers_cannot_see_or_cancel_orders() {
        let f = fixture();
        let order = place(&f, 1);
        let stranger = Actor::new(Uuid::new_v4(), Role::Customer);
        assert!(matches!(
            f.service.get_order(&stranger, order.id),
            Err(DomainError::NotFound("Order"))
        ));
        assert!(matches!(
            f.service.cancel_order(&stranger, order.id),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn payment_proof_only_while_pending_payment() {
        let f = fixture();
        let order = place(&f, 1);
        f.store.force_order_status(order.id, OrderStatus::PaymentReceived);
        assert!(matches!(
            f.service.upload_payment_proof(&f.customer, order.id, "late"),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn blank_payment_proof_is_rejected() {
        let f = fixture();
        let order = place(&f, 1);
        assert!(matches!(
            f.service.upload_payment_proof(&f.customer, order.id, "   "),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_order_is_not_found() {
        let f = fixture();
        assert!(matches!(
            f.service.cancel_order(&f.admin, Uuid::new_v4()),
            Err(DomainError::NotFound("Order"))
        ));
    }
}
