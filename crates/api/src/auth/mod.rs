//! Authentication and authorization primitives.
//!
//! - [`jwt`] -- verification of identity-provider access tokens.
//! - [`roles`] -- privileged role lookup, independent of token claims.

pub mod jwt;
pub mod roles;
