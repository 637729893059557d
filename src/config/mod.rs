//! Configuration loading and management for the Salon Payroll Engine.
//!
//! This module loads per-group tier tables and payroll policy from YAML files,
//! validates them, and exposes the read-only [`TierTable`].
//!
//! # Example
//!
//! ```
//! use salon_payroll::config::ConfigLoader;
//! use salon_payroll::models::EmployeeGroup;
//!
//! let config = ConfigLoader::builtin().unwrap();
//! let lowest = &config.tier_table().tiers(EmployeeGroup::RelaxTherapist).unwrap()[0];
//! assert_eq!(lowest.name, "Relax New");
//! ```

mod loader;
mod tier_table;
mod types;

pub use loader::ConfigLoader;
pub use tier_table::TierTable;
pub(crate) use tier_table::ensure_non_negative;
pub use types::{KpiPenaltyPolicy, PayrollSettings, TierDefinition, TiersConfig};
