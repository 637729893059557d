//! Employee model and related types.
//!
//! This module defines the [`Employee`] struct and the [`EmployeeGroup`] enum
//! that selects which tier table and revenue categories apply to a worker.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::RevenueCategory;

/// The staff category an employee belongs to.
///
/// Each group has its own tier table, commission structure and KPI metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeGroup {
    /// Assistant stylist (washing, facial and chemical support work).
    AssistantStylist,
    /// Main stylist (cutting, colouring and bleaching).
    MainStylist,
    /// Relax / spa therapist.
    RelaxTherapist,
    /// Nail technician.
    NailTechnician,
}

const ASSISTANT_CATEGORIES: &[RevenueCategory] = &[
    RevenueCategory::Service,
    RevenueCategory::Product,
    RevenueCategory::Facial,
    RevenueCategory::Washing,
    RevenueCategory::Chemical,
    RevenueCategory::Bleaching,
];

const MAIN_STYLIST_CATEGORIES: &[RevenueCategory] = &[
    RevenueCategory::Service,
    RevenueCategory::Bleaching,
    RevenueCategory::Cutting,
];

const SERVICE_ONLY: &[RevenueCategory] = &[RevenueCategory::Service];

impl EmployeeGroup {
    /// All employee groups, in table order.
    pub const ALL: [EmployeeGroup; 4] = [
        EmployeeGroup::AssistantStylist,
        EmployeeGroup::MainStylist,
        EmployeeGroup::RelaxTherapist,
        EmployeeGroup::NailTechnician,
    ];

    /// Returns the configuration key for this group (e.g. `"main_stylist"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeGroup::AssistantStylist => "assistant_stylist",
            EmployeeGroup::MainStylist => "main_stylist",
            EmployeeGroup::RelaxTherapist => "relax_therapist",
            EmployeeGroup::NailTechnician => "nail_technician",
        }
    }

    /// Returns the revenue categories that earn commission for this group.
    ///
    /// Revenue reported under any other category is not commissionable for
    /// the group.
    ///
    /// # Examples
    ///
    /// ```
    /// use salon_payroll::models::{EmployeeGroup, RevenueCategory};
    ///
    /// assert_eq!(
    ///     EmployeeGroup::MainStylist.revenue_categories(),
    ///     &[RevenueCategory::Service, RevenueCategory::Bleaching, RevenueCategory::Cutting]
    /// );
    /// assert_eq!(
    ///     EmployeeGroup::NailTechnician.revenue_categories(),
    ///     &[RevenueCategory::Service]
    /// );
    /// ```
    pub fn revenue_categories(&self) -> &'static [RevenueCategory] {
        match self {
            EmployeeGroup::AssistantStylist => ASSISTANT_CATEGORIES,
            EmployeeGroup::MainStylist => MAIN_STYLIST_CATEGORIES,
            EmployeeGroup::RelaxTherapist | EmployeeGroup::NailTechnician => SERVICE_ONLY,
        }
    }
}

impl fmt::Display for EmployeeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeGroup {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| {
                EngineError::invalid_input("group", format!("unknown employee group '{}'", s))
            })
    }
}

/// Represents an employee whose pay is calculated by the engine.
///
/// Employee records are owned by the surrounding application; the engine only
/// reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name of the employee.
    #[serde(default)]
    pub name: String,
    /// The staff group the employee belongs to.
    pub group: EmployeeGroup,
    /// Contracted basic salary. When absent, the resolved tier's basic salary applies.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// Fixed monthly allowance.
    #[serde(default)]
    pub allowance: Decimal,
    /// Whether the employee is still in their new-hire period.
    #[serde(default)]
    pub is_new_employee: bool,
}

impl Employee {
    /// Creates an established employee with no allowance who is paid the tier's basic salary.
    pub fn new(id: impl Into<String>, group: EmployeeGroup) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            group,
            basic_salary: None,
            allowance: Decimal::ZERO,
            is_new_employee: false,
        }
    }
}
