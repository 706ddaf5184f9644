//! # Maktab Config
//!
//! Configuration types for the Maktab API.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`server`]: HTTP bind address
//! - [`sweep`]: Retention sweep schedule
//!
//! # Example
//!
//! ```ignore
//! use maktab_config::{CorsConfig, ServerConfig, SweepConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let sweep_config = SweepConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;
pub mod sweep;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::init_db_pool;
pub use server::ServerConfig;
pub use sweep::SweepConfig;
