//! # Route Handlers
//!
//! `general` holds the liveness endpoints; `analyze` holds the request
//! orchestrator behind `POST /analyze`.

pub mod analyze;
pub mod general;

pub use crate::{errors::AppError, state::AppState};
pub use analyze::*;
pub use general::*;
