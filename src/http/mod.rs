//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → cors.rs (origin allow-list → permission headers)
//!     → handler.rs (validate, extract, fetch, translate)
//!     → response.rs (errors → status + JSON body)
//!     → Send to client
//! ```

pub mod cors;
pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{HttpServer, PARTS_PATH};
