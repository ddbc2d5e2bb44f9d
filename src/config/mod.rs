//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → loader.rs (read variables, apply defaults and fallbacks)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; changes require a restart
//! - All fields have defaults so an empty environment is a valid setup
//! - Validation separates parsing (loader) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::ServiceConfig;
pub use schema::{CorsConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};
