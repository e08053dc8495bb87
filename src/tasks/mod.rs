//! # Tasks Module
//!
//! Tasks inside a category: create (appended last), rename, delete,
//! reorder, and the daily done toggle that drives the streak.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod streak;
pub mod validators;


pub use routes::tasks_routes;
pub use services::TasksService;
