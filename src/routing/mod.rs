//! Path-prefix mounting.
//!
//! # Data Flow
//! ```text
//! Setup:
//!     mount(prefix, target)
//!     → validate prefix, resolve Target (handler or composed App)
//!     → prefix "/"? return downstream as is : wrap in Mount
//!
//! Per request:
//!     Mount
//!     → matcher.rs (strip prefix or no match)
//!     → no match: next.run(ctx)
//!     → match: enter mounted location
//!         → downstream runs; its tail escapes to the outer location
//!     → restore outer location
//! ```
//!
//! # Design Decisions
//! - Mount points are built at startup and immutable at runtime
//! - Literal prefix matching only; no patterns, methods or route tables

pub mod matcher;
pub mod mount;

pub use matcher::PrefixMatcher;
pub use mount::{mount, mount_root, Mount, Target};
