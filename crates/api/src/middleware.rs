/// Maps domain errors to HTTP responses
pub mod error_handling;
/// Resolves the establishment a request acts for
pub mod scope;
