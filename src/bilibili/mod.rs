//! Bilibili page-list pipeline.
//!
//! # Data Flow
//! ```text
//! raw `url` query value
//!     → extractor.rs (find BV id in text or URL path)
//!     → client.rs (one GET to the page-list API, classify failures)
//!     → translate.rs (upstream parts → public parts, same order)
//! ```
//!
//! # Constraints
//! - Exactly one upstream round trip per request, no retries, no caching
//! - Every upstream call is bounded by the configured timeout

pub mod client;
pub mod extractor;
pub mod translate;
pub mod types;

pub use client::BilibiliClient;
pub use extractor::{extract_bvid, Bvid};
pub use translate::translate;
pub use types::{PartsResponse, PublicPart, UpstreamError, UpstreamPart, UpstreamResult};
