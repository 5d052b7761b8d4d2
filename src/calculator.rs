// 🧮 Eligibility Calculator
// Pure functions from (birth date, gender, today) to the pension summary.
// Nothing here reads the system clock; "today" is always passed in.

use crate::error::{PensionError, Result};
use crate::period::{add_years, Period};
use crate::rules::PensionRules;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Menu order: 1 = Hombre, 2 = Mujer
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Hombre",
            Gender::Female => "Mujer",
        }
    }

    pub fn menu_labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Gender::label).collect()
    }

    /// Map a 1-based menu position to a gender.
    pub fn from_menu_index(index: usize) -> Result<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| PensionError::invalid_gender(format!("opción {index}")))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hombre" | "male" | "m" => Ok(Gender::Male),
            "mujer" | "female" | "f" => Ok(Gender::Female),
            _ => Err(PensionError::invalid_gender(s)),
        }
    }
}

// ============================================================================
// BIRTH INFO
// ============================================================================

/// A birth date built from separately entered fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthInfo {
    date: NaiveDate,
}

impl BirthInfo {
    pub fn new(year: i32, month: i32, day: i32) -> Result<Self> {
        let invalid = || PensionError::InvalidDate(format!("{year}-{month:02}-{day:02}"));

        let month = u32::try_from(month).map_err(|_| invalid())?;
        let day = u32::try_from(day).map_err(|_| invalid())?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

        Ok(BirthInfo { date })
    }

    pub fn to_date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

impl From<NaiveDate> for BirthInfo {
    fn from(date: NaiveDate) -> Self {
        BirthInfo { date }
    }
}

// ============================================================================
// ELIGIBILITY RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub contributed_weeks: u32,
    pub pension_date: NaiveDate,
    pub meets_requirements: bool,

    // Inputs to the decision, shown in the summary
    pub current_age: u32,
    pub required_age: u32,
    pub required_weeks: u32,
    pub labor_start_date: NaiveDate,
}

// ============================================================================
// CALCULATIONS
// ============================================================================

/// Completed years from `birth_date` to `today` (0 if not yet born).
pub fn current_age(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    Period::between(birth_date, today).years.max(0) as u32
}

/// Presumed start of working life: the 18th birthday.
pub fn labor_start_date(birth_date: NaiveDate) -> Result<NaiveDate> {
    labor_start_date_with(&PensionRules::default(), birth_date)
}

fn labor_start_date_with(rules: &PensionRules, birth_date: NaiveDate) -> Result<NaiveDate> {
    add_years(birth_date, rules.labor_start_age)
}

/// Weeks contributed since `labor_start`, using 365-day years and 30-day
/// months for the elapsed period. Zero if work has not started yet.
pub fn contributed_weeks(labor_start: NaiveDate, today: NaiveDate) -> u32 {
    let days = Period::between(labor_start, today).approximate_days();
    (days.max(0) / 7) as u32
}

pub fn required_pension_age(gender: Gender) -> u32 {
    PensionRules::default().pension_age(gender)
}

pub fn required_minimum_weeks(gender: Gender, evaluation_year: i32) -> u32 {
    PensionRules::default().minimum_weeks(gender, evaluation_year)
}

/// Evaluate eligibility with the default rules.
pub fn evaluate(birth_date: NaiveDate, gender: Gender, today: NaiveDate) -> Result<EligibilityResult> {
    evaluate_with(&PensionRules::default(), birth_date, gender, today)
}

pub fn evaluate_with(
    rules: &PensionRules,
    birth_date: NaiveDate,
    gender: Gender,
    today: NaiveDate,
) -> Result<EligibilityResult> {
    if birth_date > today {
        return Err(PensionError::InvalidDate(format!(
            "la fecha de nacimiento {birth_date} es posterior a hoy ({today})"
        )));
    }

    let current_age = current_age(birth_date, today);
    let labor_start_date = labor_start_date_with(rules, birth_date)?;
    let contributed_weeks = contributed_weeks(labor_start_date, today);
    let required_age = rules.pension_age(gender);
    let required_weeks = rules.minimum_weeks(gender, today.year());
    let pension_date = add_years(birth_date, required_age)?;

    let meets_requirements = current_age >= required_age && contributed_weeks >= required_weeks;

    log::debug!(
        "evaluate birth={birth_date} gender={gender:?} today={today}: age={current_age}/{required_age} weeks={contributed_weeks}/{required_weeks} eligible={meets_requirements}"
    );

    Ok(EligibilityResult {
        contributed_weeks,
        pension_date,
        meets_requirements,
        current_age,
        required_age,
        required_weeks,
        labor_start_date,
    })
}
