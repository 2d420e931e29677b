use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use super::models::NewOutboxEventRow;
use crate::schema::marketplace_outbox;

pub const CROP_AGGREGATE: &str = "Crop";
pub const ORDER_AGGREGATE: &str = "Order";
pub const DELIVERY_AGGREGATE: &str = "DeliveryRequest";

/// Appends an event to the outbox. Must run inside the transaction that
/// performs the state change it describes.
pub fn record(
    conn: &mut PgConnection,
    aggregate_type: &str,
    aggregate_id: Uuid,
    event_type: &str,
    payload: Value,
) -> QueryResult<()> {
    diesel::insert_into(marketplace_outbox::table)
        .values(&NewOutboxEventRow {
            id: Uuid::new_v4(),
            aggregate_type,
            aggregate_id: aggregate_id.to_string(),
            event_type,
            payload,
        })
        .execute(conn)?;
    Ok(())
}
