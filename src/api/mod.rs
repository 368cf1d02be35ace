//! HTTP API module for the Attendance Reconciliation Engine.
//!
//! This module provides the REST endpoint for running a reconciliation
//! over JSON-encoded source tables.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReconcileRequest;
pub use response::ApiError;
pub use state::AppState;
