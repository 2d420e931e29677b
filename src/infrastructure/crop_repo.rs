use diesel::prelude::*;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::crop::{Crop, CropFilter, NewCrop};
use crate::domain::errors::DomainError;
use crate::domain::ports::CropRepository;
use crate::schema::crops;

use super::models::{CropRow, NewCropRow};
use super::outbox::{self, CROP_AGGREGATE};

pub struct DieselCropRepository {
    pool: DbPool,
}

impl DieselCropRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CropRepository for DieselCropRepository {
    fn create(&self, farmer_id: Uuid, crop: NewCrop) -> Result<Crop, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(crops::table)
                .values(&NewCropRow {
                    id: Uuid::new_v4(),
                    farmer_id,
                    name: &crop.name,
                    available_quantity: crop.available_quantity,
                    unit: &crop.unit,
                    price_per_unit: &crop.price_per_unit,
                })
                .returning(CropRow::as_returning())
                .get_result(conn)?;

            outbox::record(
                conn,
                CROP_AGGREGATE,
                row.id,
                "CropListed",
                json!({
                    "crop_id": row.id,
                    "farmer_id": row.farmer_id,
                    "name": row.name,
                    "available_quantity": row.available_quantity,
                    "unit": row.unit,
                    "price_per_unit": row.price_per_unit.to_string()
                }),
            )?;

            Ok(row.into())
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Crop>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = crops::table
            .find(id)
            .select(CropRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Crop::from))
    }

    fn list_by_farmer(
        &self,
        farmer_id: Uuid,
        _filter: &CropFilter,
    ) -> Result<Vec<Crop>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = crops::table
            .filter(crops::farmer_id.eq(farmer_id))
            .select(CropRow::as_select())
            .order(crops::created_at.desc())
            .load(&mut conn)?;

        Ok(rows.into_iter().map(Crop::from).collect())
    }
}
