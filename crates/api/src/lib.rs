//! Pawhaven API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! media store, chatbot client) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod chatbot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
