//! HTTP API server for Cofre.
//!
//! This crate provides the HTTP control plane:
//! - Record CRUD endpoints for the main screens
//! - Generic soft delete across every registered entity kind
//! - Trash listing, restore, and policy-checked purge
//! - Dashboard snapshot read and refresh
//! - Background retention sweep scheduling

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod sweep;

pub use auth::TraceId;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use sweep::{SweepStats, run_retention_sweep, spawn_sweep_scheduler};
