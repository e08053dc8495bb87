//! # Board Module
//!
//! The single read model the client renders from: the signed-in user's
//! categories with their tasks, ordered, with today's `done` flag derived
//! from each task's last completion.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod tests;

pub use routes::board_routes;
pub use services::BoardService;
