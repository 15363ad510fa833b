//! Database Models

// Serde helpers
pub mod serde_helpers;

// Rooms
pub mod room;
pub mod room_type;

// Guests and bookings
pub mod booking;
pub mod guest;

// Billing
pub mod billing;

// Consumption
pub mod food_order;
pub mod service_request;

// Catalogs
pub mod inventory_item;
pub mod menu_item;
pub mod service;

// Re-exports
pub use billing::{BilledGuest, BilledLineItem, BilledRoom, Billing, PaymentUpdate};
pub use booking::{Booking, BookingCreate, BookingUpdate};
pub use food_order::{FoodOrder, FoodOrderCreate, FoodOrderStatusUpdate};
pub use guest::{Guest, GuestCreate, GuestUpdate};
pub use inventory_item::{InventoryCategory, InventoryItem, InventoryItemCreate, InventoryItemUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemStatus, MenuItemUpdate};
pub use room::{Room, RoomCreate, RoomUpdate};
pub use room_type::{ExtraGuestCost, GuestAllowance, RoomType, RoomTypeCreate, RoomTypeUpdate};
pub use service::{Service, ServiceCreate, ServiceType, ServiceUpdate};
pub use service_request::{ServiceRequest, ServiceRequestCreate, ServiceRequestStatusUpdate};
