pub mod appointment;
pub mod catalog;
pub mod customer;
pub mod employee;
pub mod establishment;
pub mod health;
pub mod loyalty;
pub mod metrics;
pub mod package;
pub mod public;
pub mod store_hours;
