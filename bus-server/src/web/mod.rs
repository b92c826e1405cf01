//! Web layer for the bus arrival service.
//!
//! Provides plain-text HTTP endpoints over live uWave stop and line data.

mod error;
mod render;
mod routes;
mod state;
pub mod templates;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
