//! # Maktab Core
//!
//! Foundational domain primitives shared by the Maktab API:
//!
//! - [`clock`]: an injectable time source so services and the retention
//!   sweep never read the ambient clock directly
//! - [`retention`]: the 3-year exclusion retention window used both by the
//!   duplicate-check read filter and the nightly cleanup

pub mod clock;
pub mod retention;

pub use clock::{Clock, FixedClock, SystemClock, month_bounds};
pub use retention::{RETENTION_YEARS, blocks_reregistration, retention_cutoff, sweep_eligible};
