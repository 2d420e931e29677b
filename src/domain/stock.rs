use serde::Serialize;
use utoipa::ToSchema;

/// Quantities above this are "High".
pub const HIGH_STOCK_ABOVE: i32 = 10;
/// Quantities above this (and not above [`HIGH_STOCK_ABOVE`]) are "Low".
pub const LOW_STOCK_ABOVE: i32 = 0;

/// Display category derived from a crop's available quantity. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockLevel {
    High,
    Low,
    Out,
}

impl StockLevel {
    pub fn from_quantity(quantity: i32) -> Self {
        if quantity > HIGH_STOCK_ABOVE {
            StockLevel::High
        } else if quantity > LOW_STOCK_ABOVE {
            StockLevel::Low
        } else {
            StockLevel::Out
        }
    }
}
