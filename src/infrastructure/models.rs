use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::crop::Crop;
use crate::domain::delivery::DeliveryRequest;
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::schema::{crops, delivery_requests, marketplace_outbox, orders};

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crops)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CropRow {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub name: String,
    pub available_quantity: i32,
    pub unit: String,
    pub price_per_unit: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crops)]
pub struct NewCropRow<'a> {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub name: &'a str,
    pub available_quantity: i32,
    pub unit: &'a str,
    pub price_per_unit: &'a BigDecimal,
}

impl From<CropRow> for Crop {
    fn from(row: CropRow) -> Self {
        Crop {
            id: row.id,
            farmer_id: row.farmer_id,
            name: row.name,
            available_quantity: row.available_quantity,
            unit: row.unit,
            price_per_unit: row.price_per_unit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = orders)]
#[diesel(belongs_to(CropRow, foreign_key = crop_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub customer_id: Uuid,
    pub farmer_id: Uuid,
    pub quantity: i32,
    pub status: String,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub customer_id: Uuid,
    pub farmer_id: Uuid,
    pub quantity: i32,
    pub status: &'a str,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            crop_id: row.crop_id,
            customer_id: row.customer_id,
            farmer_id: row.farmer_id,
            quantity: row.quantity,
            status: row.status.parse()?,
            payment_proof: row.payment_proof,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = delivery_requests)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRequestRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub status: String,
    pub admin_commission: bool,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = delivery_requests)]
pub struct NewDeliveryRequestRow<'a> {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status: &'a str,
    pub admin_commission: bool,
}

/// Status update for a delivery request. `None` fields are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = delivery_requests)]
pub struct DeliveryStatusChangeset<'a> {
    pub status: &'a str,
    pub driver_id: Option<Uuid>,
    pub payment_proof: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DeliveryRequestRow> for DeliveryRequest {
    type Error = DomainError;

    fn try_from(row: DeliveryRequestRow) -> Result<Self, Self::Error> {
        Ok(DeliveryRequest {
            id: row.id,
            order_id: row.order_id,
            driver_id: row.driver_id,
            status: row.status.parse()?,
            admin_commission: row.admin_commission,
            payment_proof: row.payment_proof,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = marketplace_outbox)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OutboxEventRow {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = marketplace_outbox)]
pub struct NewOutboxEventRow<'a> {
    pub id: Uuid,
    pub aggregate_type: &'a str,
    pub aggregate_id: String,
    pub event_type: &'a str,
    pub payload: Value,
}
