//! Charge arithmetic
//!
//! Pure functions over `Decimal`. Nothing in here touches the database.

use crate::db::models::{ExtraGuestCost, GuestAllowance};
use crate::utils::money::{to_decimal, to_f64, TAX_RATE_PERCENT};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Number of billable nights for a stay.
///
/// Any started night counts as a full night, and every stay is billed
/// for at least one.
pub fn stay_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    const SECS_PER_NIGHT: i64 = 24 * 60 * 60;
    let secs = (check_out - check_in).num_seconds();
    if secs <= 0 {
        return 1;
    }
    let nights = (secs + SECS_PER_NIGHT - 1) / SECS_PER_NIGHT;
    nights.max(1)
}

/// Guests beyond the room type's allowance, never negative
pub fn extra_guests(booked: i32, allowed: i32) -> i32 {
    (booked - allowed).max(0)
}

/// Room charge breakdown
#[derive(Debug, Clone, Copy)]
pub struct RoomCharge {
    pub nights: i64,
    pub extra_adults: i32,
    pub extra_children: i32,
    pub total: Decimal,
}

/// Total room charge for a stay.
///
/// nightly price x nights, plus the per-night surcharge for every
/// guest beyond the room type's allowance.
pub fn room_charge(
    nightly_price: f64,
    nights: i64,
    num_adults: i32,
    num_children: i32,
    allowance: GuestAllowance,
    extra_cost: ExtraGuestCost,
) -> RoomCharge {
    let nights_dec = Decimal::from(nights);
    let extra_adults = extra_guests(num_adults, allowance.adults);
    let extra_children = extra_guests(num_children, allowance.children);

    let base = to_decimal(nightly_price) * nights_dec;
    let adult_surcharge = to_decimal(extra_cost.adult) * Decimal::from(extra_adults) * nights_dec;
    let child_surcharge =
        to_decimal(extra_cost.child) * Decimal::from(extra_children) * nights_dec;

    RoomCharge {
        nights,
        extra_adults,
        extra_children,
        total: base + adult_surcharge + child_surcharge,
    }
}

/// Flat-rate tax on an invoice subtotal
pub fn tax_amount(subtotal: Decimal) -> Decimal {
    subtotal * Decimal::from(TAX_RATE_PERCENT) / Decimal::from(100)
}

/// Sum a list of stored charge amounts
pub fn sum_charges<'a, I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a f64>,
{
    amounts.into_iter().copied().map(to_decimal).sum()
}

/// Round a computed amount for storage
pub fn rounded(value: Decimal) -> f64 {
    to_f64(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn allowance() -> GuestAllowance {
        GuestAllowance {
            adults: 2,
            children: 1,
        }
    }

    fn extra_cost() -> ExtraGuestCost {
        ExtraGuestCost {
            adult: 10.0,
            child: 5.0,
        }
    }

    #[test]
    fn test_stay_nights_rounds_up() {
        let check_in = Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap();

        // Exactly 48 hours
        let two_nights = Utc.with_ymd_and_hms(2025, 3, 12, 14, 0, 0).unwrap();
        assert_eq!(stay_nights(check_in, two_nights), 2);

        // 48 hours and one minute starts a third night
        let just_over = Utc.with_ymd_and_hms(2025, 3, 12, 14, 1, 0).unwrap();
        assert_eq!(stay_nights(check_in, just_over), 3);
    }

    #[test]
    fn test_stay_nights_minimum_one() {
        let check_in = Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap();
        let same_day = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap();
        assert_eq!(stay_nights(check_in, same_day), 1);
        assert_eq!(stay_nights(check_in, check_in), 1);
    }

    #[test]
    fn test_extra_guests_never_negative() {
        assert_eq!(extra_guests(3, 2), 1);
        assert_eq!(extra_guests(2, 2), 0);
        assert_eq!(extra_guests(1, 2), 0);
    }

    #[test]
    fn test_room_charge_with_surcharge() {
        // 200/night x 2 nights, one extra adult at 10/night
        let charge = room_charge(200.0, 2, 3, 0, allowance(), extra_cost());
        assert_eq!(charge.extra_adults, 1);
        assert_eq!(charge.extra_children, 0);
        assert_eq!(rounded(charge.total), 420.0);
    }

    #[test]
    fn test_room_charge_within_allowance() {
        let charge = room_charge(150.0, 3, 2, 1, allowance(), extra_cost());
        assert_eq!(charge.extra_adults, 0);
        assert_eq!(charge.extra_children, 0);
        assert_eq!(rounded(charge.total), 450.0);
    }

    #[test]
    fn test_invoice_totals() {
        // Room 420 + food 50 = 470 subtotal, 5% tax = 23.5, total 493.5
        let room = room_charge(200.0, 2, 3, 0, allowance(), extra_cost()).total;
        let food = sum_charges([30.0, 20.0].iter());
        let subtotal = room + food;
        assert_eq!(rounded(subtotal), 470.0);

        let tax = tax_amount(subtotal);
        assert_eq!(rounded(tax), 23.5);
        assert_eq!(rounded(subtotal + tax), 493.5);
    }

    #[test]
    fn test_tax_rounding() {
        // 5% of 470.15 is 23.5075, stored as 23.51
        let tax = tax_amount(to_decimal(470.15));
        assert_eq!(rounded(tax), 23.51);
    }
}
