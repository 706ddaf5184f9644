//! # Maktab Store
//!
//! The record-store abstraction for the Maktab API.
//!
//! Higher layers depend on the per-entity traits in [`traits`], not on any
//! concrete backend. Two backends are provided:
//!
//! - [`postgres::PgStore`]: the production backend on `sqlx`/PostgreSQL
//! - [`memory::MemoryStore`]: an in-memory backend (feature `memory`) used
//!   by the integration test-suite
//!
//! The three student registers and the three teacher registers share one
//! entity type each; the category enum selects the physical table.

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod postgres;
pub mod traits;

pub use error::{StoreError, StoreResult};
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use traits::{ExcludedStudentStore, Store, StudentStore, TeacherStore, UstaadStore};
