//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or SimulatorConfig::default()
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SimulatorConfig (validated, immutable)
//!     → passed by reference into simulator constructors
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::SimulatorConfig;
pub use validation::{validate_config, ValidationError};
