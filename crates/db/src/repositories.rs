//! One module per domain noun. Every function takes the pool (or an open
//! transaction) explicitly and scopes reads and writes by establishment.

pub mod appointment;
pub mod catalog;
pub mod customer;
pub mod employee;
pub mod establishment;
pub mod loyalty;
pub mod metrics;
pub mod ownership;
pub mod package;
pub mod store_hours;
pub mod unavailability;
