//! Revenue category model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A commissionable revenue category.
///
/// Which categories earn commission depends on the employee group; see
/// [`EmployeeGroup::revenue_categories`](super::EmployeeGroup::revenue_categories).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueCategory {
    /// General service revenue.
    Service,
    /// Retail product sales.
    Product,
    /// Facial treatments.
    Facial,
    /// Hair washing.
    Washing,
    /// Chemical treatments (perm, colour).
    Chemical,
    /// Bleaching.
    Bleaching,
    /// Haircuts.
    Cutting,
}

impl RevenueCategory {
    /// Returns the configuration key for this category (e.g. `"bleaching"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueCategory::Service => "service",
            RevenueCategory::Product => "product",
            RevenueCategory::Facial => "facial",
            RevenueCategory::Washing => "washing",
            RevenueCategory::Chemical => "chemical",
            RevenueCategory::Bleaching => "bleaching",
            RevenueCategory::Cutting => "cutting",
        }
    }
}

impl fmt::Display for RevenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
