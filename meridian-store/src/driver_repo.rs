use async_trait::async_trait;
use meridian_core::repository::{DriverRepository, Paginated, RepoResult};
use meridian_domain::Driver;
use sqlx::PgPool;
use uuid::Uuid;

use crate::rows::{map_sqlx_err, DriverRow};

const DRIVER_COLUMNS: &str =
    "id, first_name, last_name, phone_number, license_number, created_at, updated_at";

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn create(&self, driver: &Driver) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO drivers (id, first_name, last_name, phone_number, license_number, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(driver.id)
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.phone_number)
        .bind(&driver.license_number)
        .bind(driver.created_at)
        .bind(driver.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Driver>> {
        let row = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(Driver::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Driver>> {
        let rows = sqlx::query_as::<_, DriverRow>(&format!(
            "SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM drivers")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(Paginated { data: rows.into_iter().map(Driver::from).collect(), total_count })
    }

    async fn update(&self, driver: &Driver) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE drivers
             SET first_name = $2, last_name = $3, phone_number = $4, license_number = $5,
                 updated_at = NOW()
             WHERE id = $1",
        )
        .bind(driver.id)
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.phone_number)
        .bind(&driver.license_number)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
