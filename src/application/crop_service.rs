use uuid::Uuid;

use crate::domain::actor::{Actor, Role};
use crate::domain::crop::{Crop, CropFilter, CropInventory, NewCrop};
use crate::domain::errors::DomainError;
use crate::domain::ports::CropRepository;

pub struct CropService<R> {
    repo: R,
}

impl<R: CropRepository> CropService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_crop(&self, actor: &Actor, crop: NewCrop) -> Result<Crop, DomainError> {
        actor.require_role(Role::Farmer)?;
        crop.validate()?;
        let crop = self.repo.create(actor.id, crop)?;
        log::info!("Farmer {} listed crop {} ({})", actor.id, crop.id, crop.name);
        Ok(crop)
    }

    pub fn get_crop(&self, id: Uuid) -> Result<Crop, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Crop"))
    }

    /// Full, unpaginated inventory of the requesting farmer.
    pub fn get_farmer_crops(
        &self,
        actor: &Actor,
        filter: &CropFilter,
    ) -> Result<CropInventory, DomainError> {
        actor.require_role(Role::Farmer)?;
        Ok(self.repo.list_by_farmer(actor.id, filter)?.into())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::stock::StockLevel;
    use crate::infrastructure::memory::InMemoryStore;

    fn farmer() -> Actor {
        Actor::new(Uuid::new_v4(), Role::Farmer)
    }

    fn crop(name: &str, quantity: i32) -> NewCrop {
        NewCrop {
            name: name.to_string(),
            available_quantity: quantity,
            unit: "kg".to_string(),
            price_per_unit: BigDecimal::from_str("1.25").unwrap(),
        }
    }

    #[test]
    fn inventory_lists_only_the_farmers_crops_with_stock_levels() {
        let service = CropService::new(InMemoryStore::new());
        let alice = farmer();
        let bob = farmer();

        service.create_crop(&alice, crop("Tomatoes", 15)).unwrap();
        service.create_crop(&alice, crop("Onions", 3)).unwrap();
        service.create_crop(&alice, crop("Yams", 0)).unwrap();
        service.create_crop(&bob, crop("Cassava", 40)).unwrap();

        let inventory = service
            .get_farmer_crops(&alice, &CropFilter::default())
            .unwrap();
        assert_eq!(inventory.count, 3);

        let mut levels: Vec<(String, StockLevel)> = inventory
            .items
            .iter()
            .map(|c| (c.name.clone(), c.stock_level()))
            .collect();
        levels.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            levels,
            vec![
                ("Onions".to_string(), StockLevel::Low),
                ("Tomatoes".to_string(), StockLevel::High),
                ("Yams".to_string(), StockLevel::Out),
            ]
        );
    }

    #[test]
    fn empty_inventory_has_zero_count() {
        let service = CropService::new(InMemoryStore::new());
        let inventory = service
            .get_farmer_crops(&farmer(), &CropFilter::default())
            .unwrap();
        assert_eq!(inventory.count, 0);
        assert!(inventory.items.is_empty());
    }

    #[test]
    fn customers_cannot_list_crops() {
        let service = CropService::new(InMemoryStore::new());
        let customer = Actor::new(Uuid::new_v4(), Role::Customer);
        assert!(matches!(
            service.create_crop(&customer, crop("Rice", 5)),
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            service.get_farmer_crops(&customer, &CropFilter::default()),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn invalid_crop_is_not_stored() {
        let store = InMemoryStore::new();
        let service = CropService::new(store.clone());
        let alice = farmer();
        assert!(service.create_crop(&alice, crop("Rice", -5)).is_err());
        assert_eq!(
            service
                .get_farmer_crops(&alice, &CropFilter::default())
                .unwrap()
                .count,
            0
        );
    }

    #[test]
    fn unknown_crop_is_not_found() {
        let service = CropService::new(InMemoryStore::new());
        assert!(matches!(
            service.get_crop(Uuid::new_v4()),
            Err(DomainError::NotFound("Crop"))
        ));
    }
}
