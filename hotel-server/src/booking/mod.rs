//! Booking Module
//!
//! The stay lifecycle: create (which performs the check-in) and
//! check-out, with the room and guest side effects both entail.

pub mod manager;

pub use manager::BookingManager;
