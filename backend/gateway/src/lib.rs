//! PaperForge Gateway HTTP API Server
//!
//! Serves `POST /process-image` and `GET /api/health`.

pub mod error;
pub mod health;
pub mod process_image;
pub mod server;

pub use error::{ErrorBody, ProcessError, ERROR_PREFIX};
pub use health::HealthReport;
pub use server::{build_router, start_server, GatewayState};
