use async_trait::async_trait;
use meridian_core::repository::{Paginated, RepoResult, VehicleRepository};
use meridian_domain::Vehicle;
use sqlx::PgPool;
use uuid::Uuid;

use crate::rows::{map_sqlx_err, VehicleRow};

const VEHICLE_COLUMNS: &str =
    "id, name, plate_number, capacity, car_type, amenities, created_at, updated_at";

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO vehicles (id, name, plate_number, capacity, car_type, amenities, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.plate_number)
        .bind(vehicle.capacity)
        .bind(&vehicle.car_type)
        .bind(&vehicle.amenities)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(Vehicle::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(Paginated { data: rows.into_iter().map(Vehicle::from).collect(), total_count })
    }

    async fn update(&self, vehicle: &Vehicle) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE vehicles
             SET name = $2, plate_number = $3, capacity = $4, car_type = $5, amenities = $6,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.plate_number)
        .bind(vehicle.capacity)
        .bind(&vehicle.car_type)
        .bind(&vehicle.amenities)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
