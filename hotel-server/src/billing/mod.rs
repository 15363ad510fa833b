//! Billing Module
//!
//! Invoice generation and payment settlement. The charge arithmetic
//! lives in [`charges`] as pure functions; [`BillingEngine`] wires it
//! to the stored entities.

pub mod charges;
pub mod engine;

pub use engine::BillingEngine;
