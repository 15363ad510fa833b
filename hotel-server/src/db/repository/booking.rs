//! Booking Repository

use super::{parse_record_id, BaseRepository, RepoResult};
use crate::db::models::{Booking, BookingUpdate};
use shared::BookingStatus;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

const TABLE: &str = "booking";

/// Sequence numbers start after this value, so the first booking is 1001
const BOOKING_SEQ_START: i64 = 1000;

#[derive(Clone)]
pub struct BookingRepository {
    base: BaseRepository,
}

impl BookingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Allocate the next human-facing booking number
    pub async fn next_booking_id(&self) -> RepoResult<i64> {
        self.base.next_sequence(TABLE, BOOKING_SEQ_START).await
    }

    /// Newest bookings first, one page at a time, optionally narrowed
    /// to a single lifecycle status
    pub async fn find_page(
        &self,
        page: u64,
        per_page: u64,
        status: Option<BookingStatus>,
    ) -> RepoResult<(Vec<Booking>, u64)> {
        let start = (page.saturating_sub(1)) * per_page;
        let mut result = match status {
            Some(status) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM booking WHERE booking_status = $status \
                         ORDER BY booking_id DESC LIMIT $limit START $start",
                    )
                    .query(
                        "SELECT count() AS total FROM booking \
                         WHERE booking_status = $status GROUP ALL",
                    )
                    .bind(("status", status))
                    .bind(("limit", per_page))
                    .bind(("start", start))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM booking ORDER BY booking_id DESC LIMIT $limit START $start")
                    .query("SELECT count() AS total FROM booking GROUP ALL")
                    .bind(("limit", per_page))
                    .bind(("start", start))
                    .await?
            }
        };
        let bookings: Vec<Booking> = result.take(0)?;

        #[derive(serde::Deserialize)]
        struct Total {
            total: u64,
        }
        let total: Option<Total> = result.take(1)?;
        Ok((bookings, total.map(|t| t.total).unwrap_or(0)))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let thing = parse_record_id(id)?;
        let booking: Option<Booking> = self.base.db().select(thing).await?;
        Ok(booking)
    }

    /// Look up by the human-facing booking number
    pub async fn find_by_booking_id(&self, booking_id: i64) -> RepoResult<Option<Booking>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM booking WHERE booking_id = $booking_id LIMIT 1")
            .bind(("booking_id", booking_id))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    pub async fn create(&self, booking: Booking) -> RepoResult<Booking> {
        let created: Option<Booking> = self.base.db().create(TABLE).content(booking).await?;
        created.ok_or_else(|| super::RepoError::Database("Failed to create booking".to_string()))
    }

    /// Update stay details, never the status
    pub async fn update(&self, id: &str, data: BookingUpdate) -> RepoResult<Booking> {
        let thing = parse_record_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| super::RepoError::NotFound(format!("Booking {} not found", id)))?;

        let merged = Booking {
            id: None,
            check_in: data.check_in.unwrap_or(existing.check_in),
            check_out: data.check_out.unwrap_or(existing.check_out),
            num_adults: data.num_adults.unwrap_or(existing.num_adults),
            num_children: data.num_children.unwrap_or(existing.num_children),
            extras: data.extras.unwrap_or(existing.extras),
            guest_comment: data.guest_comment.unwrap_or(existing.guest_comment),
            updated_at: Some(chrono::Utc::now()),
            ..existing
        };

        let updated: Option<Booking> = self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| super::RepoError::NotFound(format!("Booking {} not found", id)))
    }

    pub async fn set_status(&self, id: &RecordId, status: BookingStatus) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $booking SET booking_status = $status, updated_at = time::now()")
            .bind(("booking", id.clone()))
            .bind(("status", status))
            .await?;
        Ok(())
    }

    /// Move to `status` only while the booking has not been checked out
    /// yet. Returns the updated row, or None when another request won
    /// the race.
    pub async fn set_status_unless_checked_out(
        &self,
        id: &RecordId,
        status: BookingStatus,
    ) -> RepoResult<Option<Booking>> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $booking SET booking_status = $status, updated_at = time::now() \
                 WHERE booking_status != $terminal RETURN AFTER",
            )
            .bind(("booking", id.clone()))
            .bind(("status", status))
            .bind(("terminal", BookingStatus::CheckedOut))
            .await?;
        let bookings: Vec<Booking> = result.take(0)?;
        Ok(bookings.into_iter().next())
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = parse_record_id(id)?;
        let deleted: Option<Booking> = self.base.db().delete(thing).await?;
        Ok(deleted.is_some())
    }
}
