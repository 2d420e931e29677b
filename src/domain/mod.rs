pub mod actor;
pub mod badge;
pub mod crop;
pub mod delivery;
pub mod errors;
pub mod lifecycle;
pub mod order;
pub mod ports;
pub mod status;
pub mod stock;
