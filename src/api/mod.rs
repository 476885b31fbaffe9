//! HTTP API layer: routers, extractors and request/response types

pub mod admin;
pub mod health;
pub mod middleware;
pub mod recipe;
pub mod router;
pub mod state;
pub mod types;
pub mod user;

pub use router::create_router_with_state;
pub use state::{AppState, MediaMount};
