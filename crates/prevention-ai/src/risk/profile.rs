use serde::{Deserialize, Serialize};
use std::fmt;

/// Weekly exercise intensity reported by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseLevel {
    None,
    Light,
    Moderate,
    Heavy,
}

/// Broad dietary pattern reported by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    Omnivore,
    Vegetarian,
    Vegan,
    Pescetarian,
}

/// Habits the user lives with today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LifestyleProfile {
    pub age: u32,
    pub weight: f64,
    pub smoker: bool,
    pub exercise_level: ExerciseLevel,
    pub diet_type: DietType,
    pub meals_per_day: u32,
    pub sugary_drinks: bool,
}

/// Habits the user intends to adopt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlannedProfile {
    pub target_weight: f64,
    pub smoker: bool,
    pub exercise_level: ExerciseLevel,
    pub planned_diet_type: DietType,
    pub planned_meals_per_day: u32,
    pub eliminate_sugary_drinks: bool,
}

/// The pair of profiles submitted for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskComparisonRequest {
    #[serde(rename = "currentLifestyle")]
    pub current: LifestyleProfile,
    #[serde(rename = "plannedLifestyle")]
    pub planned: PlannedProfile,
}

/// Which of the two profiles a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSection {
    Current,
    Planned,
}

impl ProfileSection {
    pub const fn label(self) -> &'static str {
        match self {
            ProfileSection::Current => "current lifestyle",
            ProfileSection::Planned => "planned lifestyle",
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A numeric field that must be positive but is not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{section} field '{field}' must be a positive number")]
pub struct InvalidFieldError {
    pub section: ProfileSection,
    pub field: &'static str,
}

impl RiskComparisonRequest {
    /// Reject zero or non-finite values in fields the comparison depends on.
    pub fn validate(&self) -> Result<(), InvalidFieldError> {
        let positive = |section, field, ok| {
            if ok {
                Ok(())
            } else {
                Err(InvalidFieldError { section, field })
            }
        };

        positive(ProfileSection::Current, "age", self.current.age > 0)?;
        positive(
            ProfileSection::Current,
            "weight",
            self.current.weight.is_finite() && self.current.weight > 0.0,
        )?;
        positive(
            ProfileSection::Current,
            "mealsPerDay",
            self.current.meals_per_day > 0,
        )?;
        positive(
            ProfileSection::Planned,
            "targetWeight",
            self.planned.target_weight.is_finite() && self.planned.target_weight > 0.0,
        )?;
        positive(
            ProfileSection::Planned,
            "plannedMealsPerDay",
            self.planned.planned_meals_per_day > 0,
        )?;
        Ok(())
    }
}

/// Whether the planned lifestyle raises or lowers the estimated risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    More,
    Less,
}

impl Direction {
    pub const fn label(self) -> &'static str {
        match self {
            Direction::More => "more",
            Direction::Less => "less",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed outcome of a successful estimate.
///
/// The multiplier is kept as the exact digits the backend produced; "0.80"
/// is not renormalized to "0.8".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskComparisonResult {
    pub multiplier: String,
    pub direction: Direction,
}
