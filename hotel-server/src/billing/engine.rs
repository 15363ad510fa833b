//! Billing Engine
//!
//! Builds and settles invoices. An invoice is generated on demand for a
//! booking and recomputed from the live consumption records on every
//! regeneration until it is paid. Once paid the stored amounts are
//! frozen.

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::billing::charges;
use crate::db::models::{BilledGuest, BilledLineItem, BilledRoom, Billing, PaymentUpdate};
use crate::db::repository::{
    BillingRepository, BookingRepository, FoodOrderRepository, GuestRepository,
    MenuItemRepository, RoomRepository, RoomTypeRepository, ServiceRepository,
    ServiceRequestRepository,
};
use crate::utils::{AppError, AppResult};
use shared::{BookingStatus, PaymentStatus};

#[derive(Clone)]
pub struct BillingEngine {
    bookings: BookingRepository,
    guests: GuestRepository,
    rooms: RoomRepository,
    room_types: RoomTypeRepository,
    bills: BillingRepository,
    food_orders: FoodOrderRepository,
    service_requests: ServiceRequestRepository,
    menu_items: MenuItemRepository,
    services: ServiceRepository,
}

impl BillingEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            bookings: BookingRepository::new(db.clone()),
            guests: GuestRepository::new(db.clone()),
            rooms: RoomRepository::new(db.clone()),
            room_types: RoomTypeRepository::new(db.clone()),
            bills: BillingRepository::new(db.clone()),
            food_orders: FoodOrderRepository::new(db.clone()),
            service_requests: ServiceRequestRepository::new(db.clone()),
            menu_items: MenuItemRepository::new(db.clone()),
            services: ServiceRepository::new(db),
        }
    }

    /// Generate the invoice for a booking, or recompute it if one
    /// already exists and has not been paid yet.
    ///
    /// Returns the invoice and whether it was newly created.
    pub async fn generate(&self, booking_ref: &str) -> AppResult<(Billing, bool)> {
        let booking = self
            .bookings
            .find_by_id(booking_ref)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_ref)))?;
        let booking_id = booking
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Booking record without id".to_string()))?;

        let existing = self.bills.find_by_booking(&booking_id).await?;

        // A settled bill is immutable
        if let Some(bill) = &existing {
            if bill.payment_status == PaymentStatus::Paid {
                return Ok((bill.clone(), false));
            }
        }

        let guest = self
            .guests
            .find_by_id(&booking.guest.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound("Guest not found".to_string()))?;
        let room = self
            .rooms
            .find_by_id(&booking.room.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound("Room not found".to_string()))?;
        let room_type = self
            .room_types
            .find_by_id(&room.room_type.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound("Room type not found".to_string()))?;

        // Nightly price comes from the room type, the pricing source
        // of truth; the room's own price field is a display copy.
        let nights = charges::stay_nights(booking.check_in, booking.check_out);
        let room_charge = charges::room_charge(
            room_type.price,
            nights,
            booking.num_adults,
            booking.num_children,
            room_type.max_guests,
            room_type.extra_cost,
        );

        // Only consumption that actually reached the guest is billed
        let orders = self.food_orders.find_delivered_for_booking(&booking_id).await?;
        let mut food_lines = Vec::with_capacity(orders.len());
        for order in &orders {
            let Some(id) = order.id.clone() else { continue };
            let mut names = Vec::with_capacity(order.items.len());
            for item_ref in &order.items {
                if let Some(item) = self.menu_items.find_by_id(&item_ref.to_string()).await? {
                    names.push(item.name);
                }
            }
            food_lines.push(BilledLineItem {
                source: id,
                items: names,
                price: order.price,
            });
        }

        let requests = self
            .service_requests
            .find_completed_for_booking(&booking_id)
            .await?;
        let mut service_lines = Vec::with_capacity(requests.len());
        for request in &requests {
            let Some(id) = request.id.clone() else { continue };
            let mut names = Vec::with_capacity(request.services.len());
            for service_ref in &request.services {
                if let Some(service) = self.services.find_by_id(&service_ref.to_string()).await? {
                    names.push(service.service_name);
                }
            }
            service_lines.push(BilledLineItem {
                source: id,
                items: names,
                price: request.price,
            });
        }

        let total_food = charges::sum_charges(orders.iter().map(|o| &o.price));
        let total_service = charges::sum_charges(requests.iter().map(|r| &r.price));
        let subtotal = room_charge.total + total_food + total_service;
        let taxes = charges::tax_amount(subtotal);
        let total = subtotal + taxes;

        let room_id = room
            .id
            .ok_or_else(|| AppError::Internal("Room record without id".to_string()))?;
        let guest_id = guest
            .id
            .ok_or_else(|| AppError::Internal("Guest record without id".to_string()))?;
        let room_type_id = room_type
            .id
            .ok_or_else(|| AppError::Internal("Room type record without id".to_string()))?;

        let now = Utc::now();
        let bill = Billing {
            id: None,
            booking: booking_id,
            guest: BilledGuest {
                guest_id,
                name: guest.name,
                email: guest.email,
                phone: guest.phone,
            },
            room: BilledRoom {
                room_id,
                room_number: room.number,
                room_type_id,
                num_nights: nights,
                num_adults: booking.num_adults,
                num_children: booking.num_children,
                extra_adults: room_charge.extra_adults,
                extra_children: room_charge.extra_children,
                total_room_price: charges::rounded(room_charge.total),
            },
            food_orders: food_lines,
            total_food_cost: charges::rounded(total_food),
            service_requests: service_lines,
            total_service_cost: charges::rounded(total_service),
            subtotal: charges::rounded(subtotal),
            taxes: charges::rounded(taxes),
            total_amount: charges::rounded(total),
            payment_status: existing
                .as_ref()
                .map(|b| b.payment_status)
                .unwrap_or_default(),
            payment_method: existing.as_ref().and_then(|b| b.payment_method),
            payment_date: existing.as_ref().and_then(|b| b.payment_date),
            created_at: existing
                .as_ref()
                .and_then(|b| b.created_at)
                .or(Some(now)),
            updated_at: Some(now),
        };

        match existing.and_then(|b| b.id) {
            Some(id) => Ok((self.bills.replace(&id, bill).await?, false)),
            None => Ok((self.bills.create(bill).await?, true)),
        }
    }

    /// Fetch the invoice for a booking
    pub async fn get_for_booking(&self, booking_ref: &str) -> AppResult<Billing> {
        let booking = self
            .bookings
            .find_by_id(booking_ref)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_ref)))?;
        let booking_id = booking
            .id
            .ok_or_else(|| AppError::Internal("Booking record without id".to_string()))?;
        self.bills
            .find_by_booking(&booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Billing record not found".to_string()))
    }

    pub async fn get_all(&self) -> AppResult<Vec<Billing>> {
        Ok(self.bills.find_all().await?)
    }

    /// Move an invoice through the payment lifecycle.
    ///
    /// Any status may move to paid, which requires a payment method
    /// and stamps the payment date; every other target status clears
    /// both fields. Marking a bill paid moves its booking to Payment
    /// Completed; leaving paid moves the booking back to CheckedIn,
    /// unless the stay already ended.
    pub async fn update_payment(&self, bill_ref: &str, update: PaymentUpdate) -> AppResult<Billing> {
        let bill = self
            .bills
            .find_by_id(bill_ref)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bill {} not found", bill_ref)))?;
        let bill_id = bill
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Bill record without id".to_string()))?;

        let from = bill.payment_status;
        let to = update.payment_status;

        let updated = if to == PaymentStatus::Paid {
            let method = update
                .payment_method
                .or(bill.payment_method)
                .ok_or_else(|| {
                    AppError::Validation("Payment method is required to mark a bill paid".to_string())
                })?;
            let updated = self
                .bills
                .update_payment(&bill_id, to, Some(method), Some(Utc::now()))
                .await?;
            self.bookings
                .set_status_unless_checked_out(&bill.booking, BookingStatus::PaymentCompleted)
                .await?;
            updated
        } else {
            let updated = self.bills.update_payment(&bill_id, to, None, None).await?;
            if from == PaymentStatus::Paid {
                self.bookings
                    .set_status_unless_checked_out(&bill.booking, BookingStatus::CheckedIn)
                    .await?;
            }
            updated
        };

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        Booking, ExtraGuestCost, FoodOrder, GuestAllowance, GuestCreate, RoomTypeCreate,
    };
    use crate::db::repository::{
        BookingRepository, FoodOrderRepository, GuestRepository, RoomRepository,
        RoomTypeRepository,
    };
    use crate::db::DbService;
    use chrono::TimeZone;
    use shared::{KitchenStatus, PaymentMethod, RoomStatus};
    use surrealdb::RecordId;

    async fn test_db() -> Surreal<Db> {
        DbService::open_in_memory().await.unwrap().db
    }

    /// Seed a room type, room, guest and checked-in booking
    async fn seed_booking(db: &Surreal<Db>) -> RecordId {
        let room_types = RoomTypeRepository::new(db.clone());
        let rooms = RoomRepository::new(db.clone());
        let guests = GuestRepository::new(db.clone());
        let bookings = BookingRepository::new(db.clone());

        let room_type = room_types
            .create(RoomTypeCreate {
                name: "Deluxe".to_string(),
                price: 200.0,
                max_guests: GuestAllowance {
                    adults: 2,
                    children: 1,
                },
                extra_cost: ExtraGuestCost {
                    adult: 10.0,
                    child: 5.0,
                },
            })
            .await
            .unwrap();

        let room = rooms
            .create(
                "101".to_string(),
                room_type.id.unwrap(),
                200.0,
                RoomStatus::Available,
            )
            .await
            .unwrap();

        let guest = guests
            .create(GuestCreate {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                phone: "9876543210".to_string(),
                status: None,
            })
            .await
            .unwrap();

        let booking = bookings
            .create(Booking {
                id: None,
                booking_id: bookings.next_booking_id().await.unwrap(),
                guest: guest.id.unwrap(),
                room: room.id.unwrap(),
                booking_date: Some(Utc::now()),
                check_in: Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap(),
                check_out: Utc.with_ymd_and_hms(2025, 3, 12, 14, 0, 0).unwrap(),
                num_adults: 3,
                num_children: 0,
                extras: vec![],
                guest_comment: "No Request".to_string(),
                booking_status: shared::BookingStatus::CheckedIn,
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            })
            .await
            .unwrap();

        booking.id.unwrap()
    }

    #[tokio::test]
    async fn test_generate_computes_room_charge() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db);

        let (bill, created) = engine.generate(&booking_id.to_string()).await.unwrap();
        assert!(created);
        // 200 x 2 nights + 1 extra adult x 10 x 2 nights
        assert_eq!(bill.room.num_nights, 2);
        assert_eq!(bill.room.extra_adults, 1);
        assert_eq!(bill.room.total_room_price, 420.0);
        assert_eq!(bill.subtotal, 420.0);
        assert_eq!(bill.taxes, 21.0);
        assert_eq!(bill.total_amount, 441.0);
        assert_eq!(bill.payment_status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_room_charge_follows_room_type_price() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db.clone());

        // Reprice the type after the room copied its original price
        let room_types = RoomTypeRepository::new(db);
        let room_type = room_types.find_by_name("Deluxe").await.unwrap().unwrap();
        room_types
            .update(
                &room_type.id.unwrap().to_string(),
                crate::db::models::RoomTypeUpdate {
                    price: Some(250.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let (bill, _) = engine.generate(&booking_id.to_string()).await.unwrap();
        // 250 x 2 nights + 1 extra adult x 10 x 2 nights
        assert_eq!(bill.room.total_room_price, 520.0);
    }

    #[tokio::test]
    async fn test_regenerate_picks_up_delivered_orders() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db.clone());

        let (first, created) = engine.generate(&booking_id.to_string()).await.unwrap();
        assert!(created);

        // A delivered order joins the bill, a pending one does not
        let orders = FoodOrderRepository::new(db.clone());
        let bookings = BookingRepository::new(db);
        let booking = bookings
            .find_by_id(&booking_id.to_string())
            .await
            .unwrap()
            .unwrap();

        let delivered = orders
            .create(FoodOrder {
                id: None,
                order_id: orders.next_order_id().await.unwrap(),
                room: booking.room.clone(),
                booking: booking_id.clone(),
                items: vec![],
                reception_status: Default::default(),
                kitchen_status: Default::default(),
                time: "19:00".to_string(),
                price: 50.0,
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            })
            .await
            .unwrap();
        orders
            .set_kitchen_status(&delivered.id.unwrap(), KitchenStatus::Delivered)
            .await
            .unwrap();

        orders
            .create(FoodOrder {
                id: None,
                order_id: orders.next_order_id().await.unwrap(),
                room: booking.room,
                booking: booking_id.clone(),
                items: vec![],
                reception_status: Default::default(),
                kitchen_status: Default::default(),
                time: "20:00".to_string(),
                price: 99.0,
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
            })
            .await
            .unwrap();

        let (second, created) = engine.generate(&booking_id.to_string()).await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.total_food_cost, 50.0);
        assert_eq!(second.subtotal, 470.0);
        assert_eq!(second.taxes, 23.5);
        assert_eq!(second.total_amount, 493.5);
    }

    #[tokio::test]
    async fn test_payment_paid_cascades_to_booking() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db.clone());

        let (bill, _) = engine.generate(&booking_id.to_string()).await.unwrap();
        let bill_ref = bill.id.unwrap().to_string();

        let paid = engine
            .update_payment(
                &bill_ref,
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    payment_method: Some(PaymentMethod::Upi),
                },
            )
            .await
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert!(paid.payment_date.is_some());

        let bookings = BookingRepository::new(db);
        let booking = bookings
            .find_by_id(&booking_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.booking_status, BookingStatus::PaymentCompleted);

        // A refund puts the stay back in progress and clears the
        // payment record
        let refunded = engine
            .update_payment(
                &bill_ref,
                PaymentUpdate {
                    payment_status: PaymentStatus::Refunded,
                    payment_method: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(refunded.payment_status, PaymentStatus::Refunded);
        assert!(refunded.payment_method.is_none());
        assert!(refunded.payment_date.is_none());
        let booking = bookings
            .find_by_id(&booking_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.booking_status, BookingStatus::CheckedIn);
    }

    #[tokio::test]
    async fn test_payment_requires_method() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db);

        let (bill, _) = engine.generate(&booking_id.to_string()).await.unwrap();
        let result = engine
            .update_payment(
                &bill.id.unwrap().to_string(),
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    payment_method: None,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_cancelled_bill_can_be_paid() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db);

        let (bill, _) = engine.generate(&booking_id.to_string()).await.unwrap();
        let bill_ref = bill.id.unwrap().to_string();

        let cancelled = engine
            .update_payment(
                &bill_ref,
                PaymentUpdate {
                    payment_status: PaymentStatus::Cancelled,
                    payment_method: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cancelled.payment_status, PaymentStatus::Cancelled);
        assert!(cancelled.payment_method.is_none());
        assert!(cancelled.payment_date.is_none());

        // A cancelled bill can still be settled later
        let paid = engine
            .update_payment(
                &bill_ref,
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    payment_method: Some(PaymentMethod::Cash),
                },
            )
            .await
            .unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.payment_method, Some(PaymentMethod::Cash));
        assert!(paid.payment_date.is_some());
    }

    #[tokio::test]
    async fn test_paid_bill_is_frozen() {
        let db = test_db().await;
        let booking_id = seed_booking(&db).await;
        let engine = BillingEngine::new(db.clone());

        let (bill, _) = engine.generate(&booking_id.to_string()).await.unwrap();
        engine
            .update_payment(
                &bill.id.unwrap().to_string(),
                PaymentUpdate {
                    payment_status: PaymentStatus::Paid,
                    payment_method: Some(PaymentMethod::Cash),
                },
            )
            .await
            .unwrap();

        // Late consumption no longer changes the settled amounts
        let (after, created) = engine.generate(&booking_id.to_string()).await.unwrap();
        assert!(!created);
        assert_eq!(after.total_amount, bill.total_amount);
        assert_eq!(after.payment_status, PaymentStatus::Paid);
    }
}
