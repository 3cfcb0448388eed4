//! HTTP boundary for the token service: routing, request gate, seeded user
//! directory, and request/response mapping.

pub mod app;
pub mod config;
pub mod context;
pub mod directory;
pub mod middleware;

pub use app::{AppState, build_app};
pub use config::ApiConfig;
pub use directory::{SeedError, SeededDirectory, UserRecord};
