//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tier tables and
//! payroll policy from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::calculation::PayrollCalculator;
use crate::error::{EngineError, EngineResult};

use super::tier_table::TierTable;
use super::types::{PayrollSettings, TiersConfig};

const BUILTIN_TIERS: &str = include_str!("../../config/salon/tiers.yaml");
const BUILTIN_PAYROLL: &str = include_str!("../../config/salon/payroll.yaml");

/// Loads and provides access to the tier table and payroll settings.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/salon/
/// ├── tiers.yaml    # Tier lists per employee group
/// └── payroll.yaml  # KPI penalty policy and working days per month
/// ```
///
/// The same two files are embedded in the crate and available through
/// [`ConfigLoader::builtin`].
///
/// # Example
///
/// ```no_run
/// use salon_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/salon")?;
/// let calculator = loader.calculator();
/// # Ok::<(), salon_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tier_table: Arc<TierTable>,
    settings: PayrollSettings,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The tier table or settings break an invariant (`Configuration`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tiers_path = path.join("tiers.yaml");
        let tiers = Self::parse_yaml::<TiersConfig>(
            &Self::read_file(&tiers_path)?,
            &tiers_path.display().to_string(),
        )?;

        let payroll_path = path.join("payroll.yaml");
        let settings = Self::parse_yaml::<PayrollSettings>(
            &Self::read_file(&payroll_path)?,
            &payroll_path.display().to_string(),
        )?;

        let loader = Self::from_parts(tiers, settings)?;
        info!(path = %path.display(), "Loaded payroll configuration");
        Ok(loader)
    }

    /// Loads the salon's standard tier tables and payroll policy embedded in the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use salon_payroll::config::ConfigLoader;
    /// use salon_payroll::models::EmployeeGroup;
    ///
    /// let loader = ConfigLoader::builtin().unwrap();
    /// let tiers = loader.tier_table().tiers(EmployeeGroup::NailTechnician).unwrap();
    /// assert_eq!(tiers.len(), 5);
    /// ```
    pub fn builtin() -> EngineResult<Self> {
        Self::from_yaml_str(BUILTIN_TIERS, BUILTIN_PAYROLL)
    }

    /// Builds configuration from YAML text for `tiers.yaml` and `payroll.yaml`.
    pub fn from_yaml_str(tiers_yaml: &str, payroll_yaml: &str) -> EngineResult<Self> {
        let tiers = Self::parse_yaml::<TiersConfig>(tiers_yaml, "tiers.yaml")?;
        let settings = Self::parse_yaml::<PayrollSettings>(payroll_yaml, "payroll.yaml")?;
        Self::from_parts(tiers, settings)
    }

    fn from_parts(tiers: TiersConfig, settings: PayrollSettings) -> EngineResult<Self> {
        settings.validate()?;

        let groups = tiers
            .groups
            .into_iter()
            .map(|(group, definitions)| {
                let tiers = definitions
                    .into_iter()
                    .map(|definition| definition.into_tier(group))
                    .collect();
                (group, tiers)
            })
            .collect::<BTreeMap<_, _>>();

        Ok(Self {
            tier_table: Arc::new(TierTable::new(groups)?),
            settings,
        })
    }

    fn read_file(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    /// Parses YAML text, labelling errors with `source`.
    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, source: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: source.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the tier table.
    pub fn tier_table(&self) -> &TierTable {
        &self.tier_table
    }

    /// Returns a shared handle to the tier table.
    pub fn shared_tier_table(&self) -> Arc<TierTable> {
        Arc::clone(&self.tier_table)
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Creates a payroll calculator sharing this configuration's tier table.
    pub fn calculator(&self) -> PayrollCalculator {
        PayrollCalculator::new(self.shared_tier_table(), self.settings)
    }
}
