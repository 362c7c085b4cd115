//! Row models and DTOs, one module per table.

pub mod adoption;
pub mod donation;
pub mod lost_found;
pub mod pet;
pub mod rescue;
pub mod session;
pub mod user;
