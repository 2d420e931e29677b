pub mod crop_service;
pub mod delivery_service;
pub mod order_service;
