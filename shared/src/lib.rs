//! Shared domain vocabulary for the hotel back office
//!
//! Status enums and wire-level constants used by the server's models,
//! handlers and tests. Serde representations match the values stored in
//! the document database and exchanged with the front desk UI.

pub mod status;

pub use status::{
    BookingExtra, BookingStatus, CleaningState, GuestStatus, KitchenStatus, PaymentMethod,
    PaymentStatus, ReceptionStatus, RoomStatus, ServiceRequestStatus, StockStatus,
};
