//! Service layer providing business-oriented operations on top of models.
//! - Separates route handling from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod customer_service;
pub mod reservation_service;
#[cfg(test)]
pub mod test_support;
