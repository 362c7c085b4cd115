//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260115000001_create_users.sql`.

pub const ROLE_USER: &str = "user";
pub const ROLE_SHELTER: &str = "shelter";
pub const ROLE_ADMIN: &str = "admin";
