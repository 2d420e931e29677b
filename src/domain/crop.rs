use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::stock::StockLevel;

/// Decimal places kept for `price_per_unit`.
pub const PRICE_SCALE: i64 = 2;
/// Whole-unit digits kept for `price_per_unit`.
pub const PRICE_INTEGER_DIGITS: u32 = 10;

#[derive(Debug, Clone)]
pub struct NewCrop {
    pub name: String,
    pub available_quantity: i32,
    pub unit: String,
    pub price_per_unit: BigDecimal,
}

impl NewCrop {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("name must not be empty".to_string()));
        }
        if self.unit.trim().is_empty() {
            return Err(DomainError::InvalidInput("unit must not be empty".to_string()));
        }
        if self.available_quantity < 0 {
            return Err(DomainError::InvalidInput(
                "available_quantity must not be negative".to_string(),
            ));
        }
        if self.price_per_unit < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput(
                "price_per_unit must not be negative".to_string(),
            ));
        }
        if self.price_per_unit.with_scale(PRICE_SCALE) != self.price_per_unit {
            return Err(DomainError::InvalidInput(format!(
                "price_per_unit must have at most {PRICE_SCALE} decimal places"
            )));
        }
        if self.price_per_unit >= BigDecimal::from(10u64.pow(PRICE_INTEGER_DIGITS)) {
            return Err(DomainError::InvalidInput(format!(
                "price_per_unit must be below 10^{PRICE_INTEGER_DIGITS}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Crop {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub name: String,
    pub available_quantity: i32,
    pub unit: String,
    pub price_per_unit: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Crop {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::from_quantity(self.available_quantity)
    }
}

/// Filter for a farmer's crop list. No criteria exist yet; every crop the
/// farmer owns matches.
#[derive(Debug, Clone, Default)]
pub struct CropFilter {}

#[derive(Debug, Clone)]
pub struct CropInventory {
    pub count: usize,
    pub items: Vec<Crop>,
}

impl From<Vec<Crop>> for CropInventory {
    fn from(items: Vec<Crop>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn new_crop(quantity: i32, price: &str) -> NewCrop {
        NewCrop {
            name: "Maize".to_string(),
            available_quantity: quantity,
            unit: "kg".to_string(),
            price_per_unit: BigDecimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn valid_crop_passes() {
        assert!(new_crop(15, "2.50").validate().is_ok());
        assert!(new_crop(0, "0").validate().is_ok());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(matches!(
            new_crop(-1, "2.50").validate(),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(new_crop(1, "-0.01").validate().is_err());
    }

    #[test]
    fn sub_cent_price_is_rejected_not_rounded() {
        assert!(matches!(
            new_crop(1, "1.255").validate(),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(new_crop(1, "1.250").validate().is_ok());
    }

    #[test]
    fn price_must_fit_the_stored_precision() {
        assert!(new_crop(1, "9999999999.99").validate().is_ok());
        assert!(matches!(
            new_crop(1, "10000000000").validate(),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn blank_unit_is_rejected() {
        let mut crop = new_crop(1, "1");
        crop.unit = "  ".to_string();
        assert!(crop.validate().is_err());
    }
}
