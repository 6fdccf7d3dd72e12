//! # SalonBook Core
//!
//! Domain types and the pure scheduling logic shared by the database and API
//! crates. Nothing in here performs I/O.
//!
//! - [`slots`] builds the static slot template for a day of opening hours.
//! - [`availability`] subtracts breaks, appointments and unavailability
//!   windows from candidate windows to find bookable times.

pub mod availability;
pub mod errors;
pub mod models;
pub mod slots;
pub mod time;
