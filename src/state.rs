use std::sync::Arc;

use crate::application::crop_service::CropService;
use crate::application::delivery_service::DeliveryService;
use crate::application::order_service::OrderService;
use crate::db::DbPool;
use crate::domain::ports::{CropRepository, DeliveryRequestRepository, OrderRepository};
use crate::infrastructure::{
    DieselCropRepository, DieselDeliveryRequestRepository, DieselOrderRepository,
};

/// Services shared by every worker.
pub struct AppState {
    pub crops: CropService<Arc<dyn CropRepository>>,
    pub orders: OrderService<Arc<dyn OrderRepository>>,
    pub deliveries: DeliveryService<Arc<dyn DeliveryRequestRepository>, Arc<dyn OrderRepository>>,
}

impl AppState {
    pub fn new(
        crops: Arc<dyn CropRepository>,
        orders: Arc<dyn OrderRepository>,
        deliveries: Arc<dyn DeliveryRequestRepository>,
    ) -> Self {
        Self {
            crops: CropService::new(crops),
            orders: OrderService::new(orders.clone()),
            deliveries: DeliveryService::new(deliveries, orders),
        }
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self::new(
            Arc::new(DieselCropRepository::new(pool.clone())),
            Arc::new(DieselOrderRepository::new(pool.clone())),
            Arc::new(DieselDeliveryRequestRepository::new(pool)),
        )
    }
}
