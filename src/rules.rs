// 📜 Pension Rules - Rules as Data
// Ages and contribution thresholds per gender. Defaults follow the
// Colombian regime; alternate rule sets can be loaded from JSON.

use crate::calculator::Gender;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// DEFAULTS
// ============================================================================

pub const LABOR_START_AGE: u32 = 18;
pub const MALE_PENSION_AGE: u32 = 62;
pub const FEMALE_PENSION_AGE: u32 = 57;
pub const MALE_MINIMUM_WEEKS: u32 = 1300;
pub const FEMALE_BASE_WEEKS: u32 = 1275;
pub const FEMALE_BASE_YEAR: i32 = 2025;
pub const FEMALE_YEARLY_REDUCTION: u32 = 25;
pub const FEMALE_MINIMUM_WEEKS_FLOOR: u32 = 1000;

// ============================================================================
// RULE SET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionRules {
    /// Age at which contributions are presumed to start
    pub labor_start_age: u32,

    pub male_pension_age: u32,
    pub female_pension_age: u32,

    /// Weeks required from men, constant across years
    pub male_minimum_weeks: u32,

    /// Weeks required from women in `female_base_year`
    pub female_base_weeks: u32,
    pub female_base_year: i32,

    /// Weeks removed from the female requirement per year after the base year
    pub female_yearly_reduction: u32,

    /// The female requirement never drops below this
    pub female_minimum_weeks_floor: u32,
}

impl Default for PensionRules {
    fn default() -> Self {
        PensionRules {
            labor_start_age: LABOR_START_AGE,
            male_pension_age: MALE_PENSION_AGE,
            female_pension_age: FEMALE_PENSION_AGE,
            male_minimum_weeks: MALE_MINIMUM_WEEKS,
            female_base_weeks: FEMALE_BASE_WEEKS,
            female_base_year: FEMALE_BASE_YEAR,
            female_yearly_reduction: FEMALE_YEARLY_REDUCTION,
            female_minimum_weeks_floor: FEMALE_MINIMUM_WEEKS_FLOOR,
        }
    }
}

impl PensionRules {
    /// Parse a rule set from JSON; omitted fields keep their defaults.
    /// Library API for callers that need other rules; the binary reads no
    /// rule source and always uses `PensionRules::default()`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse pension rules JSON")
    }

    /// Retirement age required for `gender`.
    pub fn pension_age(&self, gender: Gender) -> u32 {
        match gender {
            Gender::Male => self.male_pension_age,
            Gender::Female => self.female_pension_age,
        }
    }

    /// Contribution weeks required for `gender` when evaluated in `year`.
    pub fn minimum_weeks(&self, gender: Gender, year: i32) -> u32 {
        match gender {
            Gender::Male => self.male_minimum_weeks,
            Gender::Female => {
                let elapsed = year as i64 - self.female_base_year as i64;
                let weeks =
                    self.female_base_weeks as i64 - elapsed * self.female_yearly_reduction as i64;
                weeks
                    .max(self.female_minimum_weeks_floor as i64)
                    .min(u32::MAX as i64) as u32
            }
        }
    }
}
