//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Mounts, dispatch, server
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (mount hit/miss counters)
//!
//! Consumers:
//!     → stdout (fmt layer, RUST_LOG filter)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Mount enter/leave/skip events at debug level only
//! - Counters are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
