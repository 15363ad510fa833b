//! Booking Lifecycle Manager
//!
//! Creating a booking checks the guest in: the room flips to Occupied,
//! the guest to Current Guest, and one unit of every stocked inventory
//! item is consumed for the room setup. The writes span several
//! records, so each effect that fails rolls the earlier ones back
//! before the error surfaces.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Booking, BookingCreate, BookingUpdate};
use crate::db::repository::{
    parse_record_id, BillingRepository, BookingRepository, GuestRepository,
    InventoryItemRepository, RoomRepository,
};
use crate::utils::{AppError, AppResult};
use shared::{BookingStatus, PaymentStatus};

#[derive(Clone)]
pub struct BookingManager {
    bookings: BookingRepository,
    guests: GuestRepository,
    rooms: RoomRepository,
    bills: BillingRepository,
    inventory: InventoryItemRepository,
}

impl BookingManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            bookings: BookingRepository::new(db.clone()),
            guests: GuestRepository::new(db.clone()),
            rooms: RoomRepository::new(db.clone()),
            bills: BillingRepository::new(db.clone()),
            inventory: InventoryItemRepository::new(db),
        }
    }

    pub fn bookings(&self) -> &BookingRepository {
        &self.bookings
    }

    /// Create a booking and perform the check-in.
    ///
    /// Preconditions are checked in order: the guest exists and has no
    /// active stay, the room exists and is Available, and the dates
    /// are ordered. The inventory consumption runs detached; a stock
    /// failure never voids a created booking.
    pub async fn create(&self, data: BookingCreate) -> AppResult<Booking> {
        let guest_ref = parse_record_id(&data.guest)?;
        let room_ref = parse_record_id(&data.room)?;

        let guest = self
            .guests
            .find_by_id(&data.guest)
            .await?
            .ok_or_else(|| AppError::NotFound("Guest not found".to_string()))?;
        if !guest.status.can_book() {
            return Err(AppError::BusinessRule(
                "Guest must be a 'New Guest' or 'Past Guest'".to_string(),
            ));
        }

        let room = self
            .rooms
            .find_by_id(&data.room)
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
        if !room.status.is_bookable() {
            return Err(AppError::Conflict(format!(
                "Room {} is not available",
                room.number
            )));
        }

        if data.check_in >= data.check_out {
            return Err(AppError::Validation(
                "Check-out date must be after check-in date".to_string(),
            ));
        }

        let now = Utc::now();
        let booking = Booking {
            id: None,
            booking_id: self.bookings.next_booking_id().await?,
            guest: guest_ref.clone(),
            room: room_ref.clone(),
            booking_date: Some(now),
            check_in: data.check_in,
            check_out: data.check_out,
            num_adults: data.num_adults,
            num_children: data.num_children,
            extras: data.extras,
            guest_comment: data.guest_comment.unwrap_or_else(|| "No Request".to_string()),
            booking_status: BookingStatus::CheckedIn,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created = self.bookings.create(booking).await?;
        let booking_id = created
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Booking record without id".to_string()))?;

        // The occupancy write is conditional on the room still being
        // Available; losing that race voids the booking row.
        match self
            .rooms
            .mark_occupied(&room_ref, guest.name.clone(), data.check_out, booking_id.clone())
            .await
        {
            Ok(Some(_)) => {}
            Ok(None) => {
                let _ = self.bookings.delete(&booking_id.to_string()).await;
                return Err(AppError::Conflict(format!(
                    "Room {} is not available",
                    room.number
                )));
            }
            Err(err) => {
                let _ = self.bookings.delete(&booking_id.to_string()).await;
                return Err(err.into());
            }
        }

        if let Err(err) = self
            .guests
            .set_status(&guest_ref, shared::GuestStatus::Current)
            .await
        {
            let _ = self.rooms.clear_occupancy(&room_ref).await;
            let _ = self.bookings.delete(&booking_id.to_string()).await;
            return Err(err.into());
        }

        let inventory = self.inventory.clone();
        let booking_number = created.booking_id;
        tokio::spawn(async move {
            if let Err(err) = inventory.consume_one_of_each().await {
                tracing::warn!(
                    booking_id = booking_number,
                    error = %err,
                    "Inventory consumption for check-in failed"
                );
            }
        });

        tracing::info!(booking_id = created.booking_id, "Booking created");
        Ok(created)
    }

    pub async fn find_page(
        &self,
        page: u64,
        per_page: u64,
        status: Option<BookingStatus>,
    ) -> AppResult<(Vec<Booking>, u64)> {
        Ok(self.bookings.find_page(page, per_page, status).await?)
    }

    pub async fn get(&self, id: &str) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Update stay details on an open booking
    pub async fn update(&self, id: &str, data: BookingUpdate) -> AppResult<Booking> {
        let existing = self.get(id).await?;
        if existing.booking_status == BookingStatus::CheckedOut {
            return Err(AppError::Conflict(
                "Booking has already been checked out".to_string(),
            ));
        }

        let check_in = data.check_in.unwrap_or(existing.check_in);
        let check_out = data.check_out.unwrap_or(existing.check_out);
        if check_in >= check_out {
            return Err(AppError::Validation(
                "Check-out date must be after check-in date".to_string(),
            ));
        }

        Ok(self.bookings.update(id, data).await?)
    }

    /// Check a booking out.
    ///
    /// Requires a generated and paid bill. The status flip is
    /// conditional on the booking not being checked out already, so
    /// two concurrent check-outs cannot both run the side effects.
    pub async fn check_out(&self, id: &str) -> AppResult<Booking> {
        let booking = self.get(id).await?;
        let booking_id = booking
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Booking record without id".to_string()))?;

        if booking.booking_status == BookingStatus::CheckedOut {
            return Err(AppError::Conflict(
                "Booking has already been checked out".to_string(),
            ));
        }

        let bill = self
            .bills
            .find_by_booking(&booking_id)
            .await?
            .ok_or_else(|| AppError::BusinessRule("Billing record not found".to_string()))?;
        if bill.payment_status != PaymentStatus::Paid {
            return Err(AppError::BusinessRule(
                "Bill must be paid before check-out".to_string(),
            ));
        }

        let updated = self
            .bookings
            .set_status_unless_checked_out(&booking_id, BookingStatus::CheckedOut)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Booking has already been checked out".to_string())
            })?;

        self.rooms.release(&booking.room).await?;
        self.guests.record_stay(&booking.guest, Utc::now()).await?;

        tracing::info!(booking_id = booking.booking_id, "Booking checked out");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let booking = self.get(id).await?;
        if booking.booking_status != BookingStatus::CheckedOut {
            // Free the room and guest before dropping an open booking
            self.rooms.clear_occupancy(&booking.room).await?;
            self.guests
                .set_status(&booking.guest, shared::GuestStatus::Past)
                .await?;
        }
        Ok(self.bookings.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::BillingEngine;
    use crate::db::models::{
        ExtraGuestCost, GuestAllowance, GuestCreate, InventoryItemCreate, PaymentUpdate,
        RoomTypeCreate,
    };
    use crate::db::repository::RoomTypeRepository;
    use crate::db::DbService;
    use chrono::TimeZone;
    use shared::{GuestStatus, PaymentMethod, RoomStatus, StockStatus};

    struct Fixture {
        db: Surreal<Db>,
        manager: BookingManager,
        guest_ref: String,
        room_ref: String,
    }

    async fn fixture() -> Fixture {
        let db = DbService::open_in_memory().await.unwrap().db;
        let room_types = RoomTypeRepository::new(db.clone());
        let rooms = RoomRepository::new(db.clone());
        let guests = GuestRepository::new(db.clone());

        let room_type = room_types
            .create(RoomTypeCreate {
                name: "Standard".to_string(),
                price: 120.0,
                max_guests: GuestAllowance {
                    adults: 2,
                    children: 2,
                },
                extra_cost: ExtraGuestCost {
                    adult: 15.0,
                    child: 8.0,
                },
            })
            .await
            .unwrap();

        let room = rooms
            .create(
                "204".to_string(),
                room_type.id.unwrap(),
                120.0,
                RoomStatus::Available,
            )
            .await
            .unwrap();

        let guest = guests
            .create(GuestCreate {
                name: "Ravi Kumar".to_string(),
                email: "ravi@example.com".to_string(),
                phone: "9000000001".to_string(),
                status: None,
            })
            .await
            .unwrap();

        Fixture {
            manager: BookingManager::new(db.clone()),
            guest_ref: guest.id.unwrap().to_string(),
            room_ref: room.id.unwrap().to_string(),
            db,
        }
    }

    fn create_payload(fx: &Fixture) -> BookingCreate {
        BookingCreate {
            guest: fx.guest_ref.clone(),
            room: fx.room_ref.clone(),
            check_in: Utc.with_ymd_and_hms(2025, 4, 1, 14, 0, 0).unwrap(),
            check_out: Utc.with_ymd_and_hms(2025, 4, 3, 11, 0, 0).unwrap(),
            num_adults: 2,
            num_children: 0,
            extras: vec![],
            guest_comment: None,
        }
    }

    #[tokio::test]
    async fn test_create_checks_in_room_and_guest() {
        let fx = fixture().await;
        let booking = fx.manager.create(create_payload(&fx)).await.unwrap();

        assert_eq!(booking.booking_id, 1001);
        assert_eq!(booking.booking_status, BookingStatus::CheckedIn);

        let room = RoomRepository::new(fx.db.clone())
            .find_by_id(&fx.room_ref)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(room.status, RoomStatus::Occupied);
        assert_eq!(room.guest.as_deref(), Some("Ravi Kumar"));
        assert_eq!(room.booking, booking.id);

        let guest = GuestRepository::new(fx.db)
            .find_by_id(&fx.guest_ref)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(guest.status, GuestStatus::Current);
    }

    #[tokio::test]
    async fn test_booking_ids_are_sequential() {
        let fx = fixture().await;
        let first = fx.manager.create(create_payload(&fx)).await.unwrap();
        assert_eq!(first.booking_id, 1001);
        assert_eq!(
            fx.manager.bookings().next_booking_id().await.unwrap(),
            1002
        );
    }

    #[tokio::test]
    async fn test_occupied_room_rejected() {
        let fx = fixture().await;
        fx.manager.create(create_payload(&fx)).await.unwrap();

        // Second guest, same room
        let other = GuestRepository::new(fx.db.clone())
            .create(GuestCreate {
                name: "Meera Iyer".to_string(),
                email: "meera@example.com".to_string(),
                phone: "9000000002".to_string(),
                status: None,
            })
            .await
            .unwrap();

        let mut payload = create_payload(&fx);
        payload.guest = other.id.unwrap().to_string();
        let result = fx.manager.create(payload).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_mark_occupied_is_conditional() {
        let fx = fixture().await;
        let booking = fx.manager.create(create_payload(&fx)).await.unwrap();

        // A late claim on the already-occupied room must not apply
        let rooms = RoomRepository::new(fx.db.clone());
        let claimed = rooms
            .mark_occupied(
                &fx.room_ref.parse().unwrap(),
                "Meera Iyer".to_string(),
                create_payload(&fx).check_out,
                booking.id.clone().unwrap(),
            )
            .await
            .unwrap();
        assert!(claimed.is_none());

        let room = rooms.find_by_id(&fx.room_ref).await.unwrap().unwrap();
        assert_eq!(room.guest.as_deref(), Some("Ravi Kumar"));
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let fx = fixture().await;
        fx.manager.create(create_payload(&fx)).await.unwrap();

        let (bookings, total) = fx
            .manager
            .find_page(1, 10, Some(BookingStatus::CheckedIn))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(bookings.len(), 1);

        let (bookings, total) = fx
            .manager
            .find_page(1, 10, Some(BookingStatus::CheckedOut))
            .await
            .unwrap();
        assert_eq!(total, 0);
        assert!(bookings.is_empty());
    }

    #[tokio::test]
    async fn test_current_guest_rejected() {
        let fx = fixture().await;
        GuestRepository::new(fx.db.clone())
            .set_status(&fx.guest_ref.parse().unwrap(), GuestStatus::Current)
            .await
            .unwrap();

        let result = fx.manager.create(create_payload(&fx)).await;
        assert!(matches!(result, Err(AppError::BusinessRule(_))));
    }

    #[tokio::test]
    async fn test_bad_date_order_rejected() {
        let fx = fixture().await;
        let mut payload = create_payload(&fx);
        payload.check_out = payload.check_in;
        let result = fx.manager.create(payload).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_check_out_requires_paid_bill() {
        let fx = fixture().await;
        let booking = fx.manager.create(create_payload(&fx)).await.unwrap();
        let booking_ref = booking.id.unwrap().to_string();

        // No bill generated yet
        let result = fx.manager.check_out(&booking_ref).await;
        assert!(matches!(result, Err(AppError::BusinessRule(_))));

        // Bill generated but unpaid
        let engine = BillingEngine::new(fx.db.clone());
        let (bill, _) = engine.generate(&booking_ref).await.unwrap();
        let result = fx.manager.check_out(&booking_ref).await;
        assert!(matches!(result, Err(AppError::BusinessRule(_))));

        // Paid
        engine
            .update_payment(
                &bill.id.unwrap().to_string(),
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    payment_method: Some(PaymentMethod::CreditCard),
                },
            )
            .await
            .unwrap();
        let checked_out = fx.manager.check_out(&booking_ref).await.unwrap();
        assert_eq!(checked_out.booking_status, BookingStatus::CheckedOut);

        // Room released for cleaning, guest archived
        let room = RoomRepository::new(fx.db.clone())
            .find_by_id(&fx.room_ref)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert!(room.guest.is_none());
        assert_eq!(room.cleaning, Some(shared::CleaningState::InProgress));

        let guest = GuestRepository::new(fx.db.clone())
            .find_by_id(&fx.guest_ref)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(guest.status, GuestStatus::Past);
        assert_eq!(guest.visits, 2);

        // Second check-out is rejected
        let again = fx.manager.check_out(&booking_ref).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_inventory_consumed_on_check_in() {
        let fx = fixture().await;
        let inventory = InventoryItemRepository::new(fx.db.clone());
        inventory
            .create(InventoryItemCreate {
                name: "Towels".to_string(),
                category: crate::db::models::InventoryCategory::Housekeeping,
                stock: 10,
                min_required: 8,
            })
            .await
            .unwrap();

        fx.manager.create(create_payload(&fx)).await.unwrap();

        // The consumption task runs detached; poll briefly
        let mut stock = 10;
        for _ in 0..50 {
            let items = inventory.find_all().await.unwrap();
            stock = items[0].stock;
            if stock == 9 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(stock, 9);

        let items = inventory.find_all().await.unwrap();
        assert_eq!(items[0].status, StockStatus::Low);
    }
}
