//! Hotel Back-Office Server
//!
//! REST back office for a hotel: rooms, guests, bookings, billing, food
//! orders, service requests and the supporting catalogs, persisted in an
//! embedded SurrealDB document store.
//!
//! # Module structure
//!
//! ```text
//! hotel-server/src/
//! ├── core/      # Config, state, HTTP server
//! ├── api/       # HTTP routes and handlers
//! ├── booking/   # Booking lifecycle manager (create / check-out)
//! ├── billing/   # Billing engine (charges, invoices, payments)
//! ├── db/        # Models and repositories
//! └── utils/     # Errors, logging, money helpers
//! ```
//!
//! The booking lifecycle (`booking`) and the billing engine (`billing`)
//! carry the business rules; everything under `api` is a thin layer of
//! validation + repository calls.

pub mod api;
pub mod billing;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use booking::BookingManager;
pub use billing::BillingEngine;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __  __      __       __
   / / / /___  / /____  / /
  / /_/ / __ \/ __/ _ \/ /
 / __  / /_/ / /_/  __/ /
/_/ /_/\____/\__/\___/_/
    "#
    );
}
