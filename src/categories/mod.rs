//! # Categories Module
//!
//! Per-user task categories: create (appended last), rename, delete with
//! their tasks, and drag-and-drop reordering.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::categories_routes;
pub use services::CategoriesService;
