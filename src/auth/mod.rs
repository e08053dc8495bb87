//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Telegram Mini App init-data verification
//! - AuthedUser extractor for protected routes
//! - User registration (upsert on sign-in)

pub mod extractors;
pub mod handlers;
pub mod init_data;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use routes::auth_routes;
pub use services::UsersService;
