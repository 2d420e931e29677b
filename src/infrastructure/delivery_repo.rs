use chrono::Utc;
use diesel::prelude::*;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::delivery::{DeliveryRequest, DeliveryTransition};
use crate::domain::errors::DomainError;
use crate::domain::ports::DeliveryRequestRepository;
use crate::domain::status::DeliveryStatus;
use crate::schema::{delivery_requests, orders};

use super::models::{DeliveryRequestRow, DeliveryStatusChangeset, NewDeliveryRequestRow};
use super::order_repo::update_status;
use super::outbox::{self, DELIVERY_AGGREGATE};

pub struct DieselDeliveryRequestRepository {
    pool: DbPool,
}

impl DieselDeliveryRequestRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DeliveryRequestRepository for DieselDeliveryRequestRepository {
    fn create(&self, order_id: Uuid) -> Result<DeliveryRequest, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(delivery_requests::table)
                .values(&NewDeliveryRequestRow {
                    id: Uuid::new_v4(),
                    order_id,
                    status: DeliveryStatus::Pending.as_str(),
                    admin_commission: false,
                })
                .returning(DeliveryRequestRow::as_returning())
                .get_result(conn)?;

            outbox::record(
                conn,
                DELIVERY_AGGREGATE,
                row.id,
                "DeliveryRequested",
                json!({ "delivery_request_id": row.id, "order_id": row.order_id }),
            )?;

            DeliveryRequest::try_from(row)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<DeliveryRequest>, DomainError> {
        let mut conn = self.pool.get()?;

        delivery_requests::table
            .find(id)
            .select(DeliveryRequestRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(DeliveryRequest::try_from)
            .transpose()
    }

    fn find_open_for_order(&self, order_id: Uuid) -> Result<Option<DeliveryRequest>, DomainError> {
        let mut conn = self.pool.get()?;

        delivery_requests::table
            .filter(delivery_requests::order_id.eq(order_id))
            .filter(delivery_requests::status.ne(DeliveryStatus::Delivered.as_str()))
            .filter(delivery_requests::status.ne(DeliveryStatus::Cancelled.as_str()))
            .select(DeliveryRequestRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(DeliveryRequest::try_from)
            .transpose()
    }

    fn transition(&self, change: DeliveryTransition) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the linked order so its status cannot move under us
            if let Some(linked) = change.order {
                let current: Option<String> = orders::table
                    .find(linked.order_id)
                    .select(orders::status)
                    .for_update()
                    .first(conn)
                    .optional()?;
                if current.as_deref() != Some(linked.from.as_str()) {
                    return Ok(false);
                }
            }

            // 2. Conditional delivery update
            let updated = diesel::update(
                delivery_requests::table
                    .filter(delivery_requests::id.eq(change.id))
                    .filter(delivery_requests::status.eq(change.from.as_str())),
            )
            .set(&DeliveryStatusChangeset {
                status: change.to.as_str(),
                driver_id: change.driver_id,
                payment_proof: change.payment_proof.as_deref(),
                updated_at: Utc::now(),
            })
            .execute(conn)?;

            if updated == 0 {
                return Ok(false);
            }

            outbox::record(
                conn,
                DELIVERY_AGGREGATE,
                change.id,
                "DeliveryStatusChanged",
                json!({
                    "delivery_request_id": change.id,
                    "from": change.from,
                    "to": change.to,
                    "driver_id": change.driver_id
                }),
            )?;

            // 3. Linked order update; the row is locked, so this cannot miss
            if let Some(linked) = change.order {
                if !update_status(conn, linked.order_id, linked.from, linked.to)? {
                    return Err(DomainError::Internal(format!(
                        "locked order {} changed during delivery transition",
                        linked.order_id
                    )));
                }
            }

            Ok(true)
        })
    }

    fn set_admin_commission(&self, id: Uuid, enabled: bool) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(delivery_requests::table.find(id))
                .set((
                    delivery_requests::admin_commission.eq(enabled),
                    delivery_requests::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            if updated == 0 {
                return Ok(false);
            }

            outbox::record(
                conn,
                DELIVERY_AGGREGATE,
                id,
                "AdminCommissionChanged",
                json!({ "delivery_request_id": id, "admin_commission": enabled }),
            )?;
            Ok(true)
        })
    }
}

/// Cancels every open request of `order_id`, recording one outbox event per
/// request. Runs inside the order's cancellation transaction.
pub(crate) fn cancel_open_requests(
    conn: &mut PgConnection,
    order_id: Uuid,
) -> Result<usize, DomainError> {
    let open: Vec<(Uuid, String)> = delivery_requests::table
        .filter(delivery_requests::order_id.eq(order_id))
        .filter(delivery_requests::status.ne(DeliveryStatus::Delivered.as_str()))
        .filter(delivery_requests::status.ne(DeliveryStatus::Cancelled.as_str()))
        .select((delivery_requests::id, delivery_requests::status))
        .for_update()
        .load(conn)?;

    for (id, from) in &open {
        diesel::update(delivery_requests::table.find(*id))
            .set((
                delivery_requests::status.eq(DeliveryStatus::Cancelled.as_str()),
                delivery_requests::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

        outbox::record(
            conn,
            DELIVERY_AGGREGATE,
            *id,
            "DeliveryStatusChanged",
            json!({
                "delivery_request_id": id,
                "from": from,
                "to": DeliveryStatus::Cancelled,
                "order_id": order_id
            }),
        )?;
    }
    Ok(open.len())
}
