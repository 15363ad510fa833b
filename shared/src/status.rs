//! Domain status enums
//!
//! Wire values are the human-facing strings the reception UI already
//! speaks ("Current Guest", "In Progress", "debit card", ...), so every
//! enum carries explicit serde renames rather than a rename_all rule.

use serde::{Deserialize, Serialize};

/// Room occupancy status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
}

impl RoomStatus {
    /// A room in this status can accept a new booking
    pub fn is_bookable(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Housekeeping sub-state of a room (absent = no cleaning scheduled)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CleaningState {
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// Guest lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GuestStatus {
    #[serde(rename = "New Guest")]
    New,
    #[serde(rename = "Current Guest")]
    Current,
    #[serde(rename = "Arriving Today")]
    ArrivingToday,
    #[serde(rename = "Past Guest")]
    Past,
}

impl GuestStatus {
    /// Only guests without an active stay may be attached to a new booking
    pub fn can_book(&self) -> bool {
        matches!(self, Self::New | Self::Past)
    }
}

/// Booking lifecycle status
///
/// Creation performs the check-in, so bookings start at CheckedIn;
/// Pending is kept for records patched in by hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    CheckedIn,
    #[serde(rename = "Payment Completed")]
    PaymentCompleted,
    CheckedOut,
}

/// Invoice payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

/// Payment method, recorded only while an invoice is paid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "debit card")]
    DebitCard,
    #[serde(rename = "credit card")]
    CreditCard,
    #[serde(rename = "upi")]
    Upi,
}

/// Food order status as the front desk sees it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ReceptionStatus {
    #[default]
    #[serde(rename = "New Order")]
    NewOrder,
    #[serde(rename = "In Progress")]
    InProgress,
    Ready,
    Delivered,
}

/// Food order status as the kitchen sees it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum KitchenStatus {
    #[default]
    Pending,
    Cooking,
    Ready,
    Delivered,
}

impl KitchenStatus {
    /// Reception status implied by a kitchen transition
    pub fn reception_status(&self) -> ReceptionStatus {
        match self {
            Self::Pending => ReceptionStatus::NewOrder,
            Self::Cooking => ReceptionStatus::InProgress,
            Self::Ready => ReceptionStatus::Ready,
            Self::Delivered => ReceptionStatus::Delivered,
        }
    }
}

/// Service request status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ServiceRequestStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

/// Derived inventory stock band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StockStatus {
    Good,
    Low,
    Critical,
}

impl StockStatus {
    /// Band boundaries: Good above 125% of the minimum, Low above the
    /// minimum, Critical at or below it.
    pub fn from_levels(stock: i64, min_required: i64) -> Self {
        if stock as f64 > min_required as f64 * 1.25 {
            Self::Good
        } else if stock > min_required {
            Self::Low
        } else {
            Self::Critical
        }
    }
}

/// Bookable extras offered at reservation time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingExtra {
    Breakfast,
    Lunch,
    Dinner,
    Laundry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_eligibility() {
        assert!(GuestStatus::New.can_book());
        assert!(GuestStatus::Past.can_book());
        assert!(!GuestStatus::Current.can_book());
        assert!(!GuestStatus::ArrivingToday.can_book());
    }

    #[test]
    fn wire_values_match_legacy_strings() {
        assert_eq!(
            serde_json::to_string(&GuestStatus::Current).unwrap(),
            r#""Current Guest""#
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::PaymentCompleted).unwrap(),
            r#""Payment Completed""#
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::DebitCard).unwrap(),
            r#""debit card""#
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            r#""paid""#
        );
        assert_eq!(
            serde_json::to_string(&CleaningState::InProgress).unwrap(),
            r#""In Progress""#
        );
    }

    #[test]
    fn kitchen_status_drives_reception_status() {
        assert_eq!(
            KitchenStatus::Cooking.reception_status(),
            ReceptionStatus::InProgress
        );
        assert_eq!(
            KitchenStatus::Delivered.reception_status(),
            ReceptionStatus::Delivered
        );
    }

    #[test]
    fn stock_bands() {
        assert_eq!(StockStatus::from_levels(100, 50), StockStatus::Good);
        assert_eq!(StockStatus::from_levels(60, 50), StockStatus::Low);
        assert_eq!(StockStatus::from_levels(63, 50), StockStatus::Good); // 63 > 62.5
        assert_eq!(StockStatus::from_levels(50, 50), StockStatus::Critical);
        assert_eq!(StockStatus::from_levels(0, 50), StockStatus::Critical);
    }
}
