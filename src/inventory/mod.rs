//! Inventory subsystem.
//!
//! There is no stock data: availability is a fixed rule on the product id
//! (see availability.rs).

pub mod availability;

pub use availability::{Availability, AVAILABLE_MESSAGE, UNAVAILABLE_MESSAGE};
