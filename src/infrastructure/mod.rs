pub mod crop_repo;
pub mod delivery_repo;
#[cfg(test)]
pub mod memory;
pub mod models;
pub mod order_repo;
pub mod outbox;
#[cfg(test)]
pub(crate) mod test_db;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

pub use crop_repo::DieselCropRepository;
pub use delivery_repo::DieselDeliveryRequestRepository;
pub use order_repo::DieselOrderRepository;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                log::warn!("Unique constraint violated: {}", info.message());
                DomainError::Conflict(info.message().to_string())
            }
            e => {
                log::error!("Database error: {}", e);
                DomainError::Internal(e.to_string())
            }
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        log::error!("Connection pool error: {}", e);
        DomainError::Internal(e.to_string())
    }
}
