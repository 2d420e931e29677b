//! Label and style class for every displayable status.
//!
//! Each mapping is an exhaustive `match`, so adding a variant without a badge
//! fails to compile instead of rendering nothing.

use super::status::{DeliveryStatus, OrderStatus};
use super::stock::StockLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

const GREEN: &str = "bg-green-100 text-green-800";
const YELLOW: &str = "bg-yellow-100 text-yellow-800";
const RED: &str = "bg-red-100 text-red-800";
const BLUE: &str = "bg-blue-100 text-blue-800";
const PURPLE: &str = "bg-purple-100 text-purple-800";
const INDIGO: &str = "bg-indigo-100 text-indigo-800";
const GRAY: &str = "bg-gray-100 text-gray-800";

impl StockLevel {
    pub fn badge(self) -> Badge {
        match self {
            StockLevel::High => Badge {
                label: "In Stock",
                class: GREEN,
            },
            StockLevel::Low => Badge {
                label: "Low Stock",
                class: YELLOW,
            },
            StockLevel::Out => Badge {
                label: "Out of Stock",
                class: RED,
            },
        }
    }
}

impl OrderStatus {
    pub fn badge(self) -> Badge {
        match self {
            OrderStatus::PendingPayment => Badge {
                label: "Pending Payment",
                class: YELLOW,
            },
            OrderStatus::PaymentReceived => Badge {
                label: "Payment Received",
                class: BLUE,
            },
            OrderStatus::ReadyForDelivery => Badge {
                label: "Ready for Delivery",
                class: PURPLE,
            },
            OrderStatus::InTransit => Badge {
                label: "In Transit",
                class: INDIGO,
            },
            OrderStatus::Delivered => Badge {
                label: "Delivered",
                class: GREEN,
            },
            OrderStatus::Cancelled => Badge {
                label: "Cancelled",
                class: RED,
            },
        }
    }
}

impl DeliveryStatus {
    pub fn badge(self) -> Badge {
        match self {
            DeliveryStatus::Pending => Badge {
                label: "Pending",
                class: YELLOW,
            },
            DeliveryStatus::Accepted => Badge {
                label: "Accepted",
                class: BLUE,
            },
            DeliveryStatus::PickedUp => Badge {
                label: "Picked Up",
                class: INDIGO,
            },
            DeliveryStatus::Delivered => Badge {
                label: "Delivered",
                class: GREEN,
            },
            DeliveryStatus::Cancelled => Badge {
                label: "Cancelled",
                class: GRAY,
            },
        }
    }
}
