//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → build.rs (mounts → App)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Validation reports every problem, not just the first

pub mod build;
pub mod loader;
pub mod schema;
pub mod validation;

pub use build::build_app;
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, MountConfig, ObservabilityConfig, ServerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
