//! HTTP API module for the Parafiscal Calculation Engine.
//!
//! This module provides the REST API endpoints for quoting a roster and
//! pricing a bonus pool. Binding a socket and serving the router is left to
//! the embedding application.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeRequest, FeeRequest, QuotationRequest};
pub use response::ApiError;
pub use state::AppState;
