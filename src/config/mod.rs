//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Preset::config() (base)
//!     + config file (TOML, optional, layered key by key)
//!     → loader.rs (parse, merge & deserialize)
//!     → validation.rs (semantic checks)
//!     → PipelineConfig (validated, immutable)
//!     → handed by value to each stage at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; one run, one config
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The signing key is never part of the config; it comes from the environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_over, parse_config_over, ConfigError};
pub use schema::PipelineConfig;
pub use schema::SpaceConfig;
pub use schema::ApiConfig;
pub use schema::IpfsConfig;
pub use schema::BlockchainConfig;
pub use schema::ObservabilityConfig;
