//! Token validation for caller identity.
//!
//! This service validates access tokens but never mints sessions; login and
//! refresh flows live in the surrounding platform.

pub mod jwt;
