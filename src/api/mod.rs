//! HTTP API module for the Workforce Cost Optimization Engine.
//!
//! This module provides the REST endpoints for analyzing daily records and
//! optimizing staffing.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AnalyzeRequest, CapacityParametersRequest, DailyRecordRequest, DateWindowRequest,
    OptimizeRequest,
};
pub use response::{ApiError, OptimizeResponse};
pub use state::AppState;
