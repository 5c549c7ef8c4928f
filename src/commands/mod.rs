//! CLI commands for shipyard
//!
//! - **affected**: which deployable units a change set touches
//! - **units**: the full deployable-unit directory
//!
//! All commands accept `&ShipContext` to avoid redundant loads.

pub mod affected;
pub mod units;

pub use affected::run_affected;
pub use units::run_units;
