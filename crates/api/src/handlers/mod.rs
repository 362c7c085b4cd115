//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `pawhaven_db` and
//! map errors via [`crate::error::AppError`]; the adoption module fronts the
//! lifecycle commands.

pub mod adoption;
pub mod auth;
pub mod chatbot;
pub mod donations;
pub mod lost_found;
pub mod pets;
pub mod rescue;
pub mod users;
