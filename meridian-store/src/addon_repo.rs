use async_trait::async_trait;
use meridian_core::repository::{AddOnRepository, Paginated, RepoResult};
use meridian_domain::AddOn;
use sqlx::PgPool;
use uuid::Uuid;

use crate::rows::{map_sqlx_err, AddOnRow};

const ADD_ON_COLUMNS: &str =
    "id, name, description, price, icon, pricing_type, is_active, created_at, updated_at";

pub struct PgAddOnRepository {
    pool: PgPool,
}

impl PgAddOnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddOnRepository for PgAddOnRepository {
    async fn create(&self, add_on: &AddOn) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO add_ons (id, name, description, price, icon, pricing_type, is_active, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(add_on.id)
        .bind(&add_on.name)
        .bind(&add_on.description)
        .bind(add_on.price)
        .bind(&add_on.icon)
        .bind(add_on.pricing_type.as_str())
        .bind(add_on.is_active)
        .bind(add_on.created_at)
        .bind(add_on.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<AddOn>> {
        let row = sqlx::query_as::<_, AddOnRow>(&format!(
            "SELECT {ADD_ON_COLUMNS} FROM add_ons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.map(AddOn::try_from).transpose()
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<AddOn>> {
        let rows = sqlx::query_as::<_, AddOnRow>(&format!(
            "SELECT {ADD_ON_COLUMNS} FROM add_ons ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM add_ons")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        let data = rows.into_iter().map(AddOn::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated { data, total_count })
    }

    async fn find_active(&self, ids: &[Uuid]) -> RepoResult<Vec<AddOn>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, AddOnRow>(&format!(
            "SELECT {ADD_ON_COLUMNS} FROM add_ons WHERE id = ANY($1) AND is_active"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        rows.into_iter().map(AddOn::try_from).collect()
    }

    async fn update(&self, add_on: &AddOn) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE add_ons
             SET name = $2, description = $3, price = $4, icon = $5, pricing_type = $6,
                 is_active = $7, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(add_on.id)
        .bind(&add_on.name)
        .bind(&add_on.description)
        .bind(add_on.price)
        .bind(&add_on.icon)
        .bind(add_on.pricing_type.as_str())
        .bind(add_on.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM add_ons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
