//! Pawhaven domain core.
//!
//! Transport- and storage-agnostic building blocks shared by the DB and API
//! layers: id/timestamp aliases, the error taxonomy, role constants, the
//! adoption lifecycle state machine, and pet domain rules.

pub mod adoption;
pub mod error;
pub mod pets;
pub mod roles;
pub mod types;
