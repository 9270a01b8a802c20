use async_trait::async_trait;
use meridian_core::repository::{BookingRepository, Paginated, RepoResult};
use meridian_domain::Booking;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::rows::{map_sqlx_err, BookingRow};

const BOOKING_COLUMNS: &str = "id, trip_id, reference, booked_segments, passengers, seat_numbers, \
     booked_add_ons, total_cost, payment_status, payment_ref, payment_method, marked_as_paid_by, \
     created_at, updated_at";

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: &Booking) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO bookings (id, trip_id, reference, booked_segments, passengers, seat_numbers,
                                   booked_add_ons, total_cost, payment_status, payment_ref,
                                   payment_method, marked_as_paid_by, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(booking.id)
        .bind(booking.trip_id)
        .bind(&booking.reference)
        .bind(Json(&booking.booked_segments))
        .bind(Json(&booking.passengers))
        .bind(&booking.seat_numbers)
        .bind(Json(&booking.booked_add_ons))
        .bind(booking.total_cost)
        .bind(booking.payment_status.as_str())
        .bind(&booking.payment_ref)
        .bind(booking.payment_method.as_str())
        .bind(booking.marked_as_paid_by)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.map(Booking::try_from).transpose()
    }

    async fn find_by_reference(&self, reference: &str) -> RepoResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE reference = $1"
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.map(Booking::try_from).transpose()
    }

    async fn list(&self, offset: i64, limit: i64) -> RepoResult<Paginated<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        let total_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        let data = rows.into_iter().map(Booking::try_from).collect::<Result<Vec<_>, _>>()?;
        Ok(Paginated { data, total_count })
    }

    async fn search_paid(&self, identifier: &str, limit: i64) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE payment_status = 'paid'
               AND (reference = $1 OR EXISTS (
                        SELECT 1 FROM jsonb_array_elements(passengers) AS p
                        WHERE p->>'email' = $1 OR p->>'phone_number' = $1))
             ORDER BY created_at DESC
             LIMIT $2"
        ))
        .bind(identifier)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_paid_if_pending(&self, reference: &str, payment_ref: &str) -> RepoResult<bool> {
        // The conditional update is the idempotence guard: of any number of
        // concurrent confirmations exactly one sees rows_affected = 1.
        let result = sqlx::query(
            "UPDATE bookings
             SET payment_status = 'paid', payment_ref = $2, updated_at = NOW()
             WHERE reference = $1 AND payment_status = 'pending'",
        )
        .bind(reference)
        .bind(payment_ref)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_failed_if_pending(&self, reference: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE bookings
             SET payment_status = 'failed', updated_at = NOW()
             WHERE reference = $1 AND payment_status = 'pending'",
        )
        .bind(reference)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_paid_manual(&self, id: Uuid, admin_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE bookings
             SET payment_status = 'paid', payment_method = 'manual', marked_as_paid_by = $2,
                 updated_at = NOW()
             WHERE id = $1 AND payment_status = 'pending'",
        )
        .bind(id)
        .bind(admin_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn cancel(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            "UPDATE bookings
             SET payment_status = 'cancelled', updated_at = NOW()
             WHERE id = $1 AND payment_status <> 'cancelled'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(result.rows_affected() > 0)
    }
}
