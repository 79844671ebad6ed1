//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build app → Bind listener → Serve
//!
//! Shutdown:
//!     signals.rs (Ctrl+C) → shutdown.rs (broadcast) → server drains and exits
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
