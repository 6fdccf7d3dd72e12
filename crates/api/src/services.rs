/// Builds bookable slots from the availability source
pub mod availability;
/// Transactional appointment writes
pub mod booking;
/// Cross-establishment reference checks
pub mod ownership;
