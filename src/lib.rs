pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod linking;
pub mod models;
pub mod render;
pub mod repository;
pub mod state;
pub mod views;

pub use app::build_router;
