use chrono::Utc;
use diesel::prelude::*;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderRepository;
use crate::domain::status::OrderStatus;
use crate::schema::{crops, orders};

use super::delivery_repo::cancel_open_requests;
use super::models::{CropRow, NewOrderRow, OrderRow};
use super::outbox::{self, ORDER_AGGREGATE};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, customer_id: Uuid, order: NewOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the crop and reserve the ordered quantity
            let crop = crops::table
                .find(order.crop_id)
                .select(CropRow::as_select())
                .for_update()
                .first(conn)
                .optional()?
                .ok_or(DomainError::NotFound("Crop"))?;

            if crop.available_quantity < order.quantity {
                return Err(DomainError::Conflict(format!(
                    "only {} {} of crop {} available",
                    crop.available_quantity, crop.unit, crop.id
                )));
            }

            diesel::update(crops::table.find(crop.id))
                .set((
                    crops::available_quantity.eq(crops::available_quantity - order.quantity),
                    crops::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            // 2. Insert the order
            let row = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: Uuid::new_v4(),
                    crop_id: crop.id,
                    customer_id,
                    farmer_id: crop.farmer_id,
                    quantity: order.quantity,
                    status: OrderStatus::PendingPayment.as_str(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 3. Outbox event in the same transaction
            outbox::record(
                conn,
                ORDER_AGGREGATE,
                row.id,
                "OrderCreated",
                json!({
                    "order_id": row.id,
                    "crop_id": row.crop_id,
                    "customer_id": row.customer_id,
                    "farmer_id": row.farmer_id,
                    "quantity": row.quantity,
                    "status": row.status
                }),
            )?;

            Order::try_from(row)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?
            .map(Order::try_from)
            .transpose()
    }

    fn set_payment_proof(
        &self,
        id: Uuid,
        expected: OrderStatus,
        reference: &str,
    ) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(
                orders::table
                    .filter(orders::id.eq(id))
                    .filter(orders::status.eq(expected.as_str())),
            )
            .set((
                orders::payment_proof.eq(reference),
                orders::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

            if updated == 0 {
                return Ok(false);
            }

            outbox::record(
                conn,
                ORDER_AGGREGATE,
                id,
                "PaymentProofUploaded",
                json!({ "order_id": id, "payment_proof": reference }),
            )?;
            Ok(true)
        })
    }

    fn transition(
        &self,
        id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let applied = update_status(conn, id, from, to)?;
            if applied && to == OrderStatus::Cancelled {
                release_reservation(conn, id)?;
                cancel_open_requests(conn, id)?;
            }
            Ok(applied)
        })
    }
}

/// Conditional status update plus its outbox event. Returns `false` when the
/// order is no longer in `from`.
pub(crate) fn update_status(
    conn: &mut PgConnection,
    id: Uuid,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<bool, DomainError> {
    let updated = diesel::update(
        orders::table
            .filter(orders::id.eq(id))
            .filter(orders::status.eq(from.as_str())),
    )
    .set((
        orders::status.eq(to.as_str()),
        orders::updated_at.eq(Utc::now()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Ok(false);
    }

    outbox::record(
        conn,
        ORDER_AGGREGATE,
        id,
        "OrderStatusChanged",
        json!({ "order_id": id, "from": from, "to": to }),
    )?;
    Ok(true)
}

fn release_reservation(conn: &mut PgConnection, order_id: Uuid) -> Result<(), DomainError> {
    let (crop_id, quantity): (Uuid, i32) = orders::table
        .find(order_id)
        .select((orders::crop_id, orders::quantity))
        .first(conn)?;

    diesel::update(crops::table.find(crop_id))
        .set((
            crops::available_quantity.eq(crops::available_quantity + quantity),
            crops::updated_at.eq(Utc::now()),
        ))
        .execute(conn)?;
    Ok(())
}
