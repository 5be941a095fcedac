//! HTTP middleware for the MamaSouk API.

pub mod auth;
pub mod roles;
