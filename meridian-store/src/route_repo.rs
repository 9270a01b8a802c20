use async_trait::async_trait;
use meridian_core::repository::{Paginated, RepoResult, RouteRepository};
use meridian_domain::Route;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::rows::{map_sqlx_err, RouteRow};

const ROUTE_COLUMNS: &str =
    "id, name, segments, is_featured, image_url, created_at, updated_at";

pub struct PgRouteRepository {
    pool: PgPool,
}

impl PgRouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteRepository for PgRouteRepository {
    async fn create(&self, route: &Route) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO routes (id, name, segments, is_featured, image_url, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(route.id)
        .bind(&route.name)
        .bind(Json(&route.segments))
        .bind(route.is_featured)
        .bind(&route.image_url)
        .bind(route.created_at)
        .bind(route.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Route>> {
        let row = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(row.map(Route::from))
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM routes")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(Paginated { data: rows.into_iter().map(Route::from).collect(), total_count })
    }

    async fn all(&self) -> RepoResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn list_featured(&self, limit: i64) -> RepoResult<Vec<Route>> {
        let rows = sqlx::query_as::<_, RouteRow>(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes WHERE is_featured ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(Route::from).collect())
    }

    async fn update(&self, route: &Route) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE routes
             SET name = $2, segments = $3, is_featured = $4, image_url = $5, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(route.id)
        .bind(&route.name)
        .bind(Json(&route.segments))
        .bind(route.is_featured)
        .bind(&route.image_url)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
