use super::profile::{
    DietType, ExerciseLevel, LifestyleProfile, PlannedProfile, ProfileSection,
    RiskComparisonRequest, RiskComparisonResult,
};

/// Required fields missing from one of the two profiles.
///
/// Validation stops at the first incomplete section, matching the order the
/// profiles are presented: current first, planned second. Booleans default
/// to false and are never required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please fill out all required fields for the {section}: {}", .fields.join(", "))]
pub struct MissingFieldsError {
    pub section: ProfileSection,
    pub fields: Vec<&'static str>,
}

/// Partially entered current-lifestyle fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentLifestyleDraft {
    age: Option<u32>,
    weight: Option<f64>,
    smoker: bool,
    exercise_level: Option<ExerciseLevel>,
    diet_type: Option<DietType>,
    meals_per_day: Option<u32>,
    sugary_drinks: bool,
}

impl CurrentLifestyleDraft {
    pub fn set_age(&mut self, age: u32) {
        self.age = Some(age);
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = Some(weight);
    }

    /// Flips the smoker flag relative to its current value.
    pub fn toggle_smoker(&mut self) {
        self.smoker = !self.smoker;
    }

    pub fn set_exercise_level(&mut self, level: ExerciseLevel) {
        self.exercise_level = Some(level);
    }

    pub fn set_diet_type(&mut self, diet: DietType) {
        self.diet_type = Some(diet);
    }

    pub fn set_meals_per_day(&mut self, meals: u32) {
        self.meals_per_day = Some(meals);
    }

    pub fn toggle_sugary_drinks(&mut self) {
        self.sugary_drinks = !self.sugary_drinks;
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.weight.is_none() {
            missing.push("weight");
        }
        if self.exercise_level.is_none() {
            missing.push("exerciseLevel");
        }
        if self.diet_type.is_none() {
            missing.push("dietType");
        }
        if self.meals_per_day.is_none() {
            missing.push("mealsPerDay");
        }
        missing
    }

    fn build(&self) -> Option<LifestyleProfile> {
        Some(LifestyleProfile {
            age: self.age?,
            weight: self.weight?,
            smoker: self.smoker,
            exercise_level: self.exercise_level?,
            diet_type: self.diet_type?,
            meals_per_day: self.meals_per_day?,
            sugary_drinks: self.sugary_drinks,
        })
    }
}

/// Partially entered planned-change fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannedLifestyleDraft {
    target_weight: Option<f64>,
    smoker: bool,
    exercise_level: Option<ExerciseLevel>,
    diet_type: Option<DietType>,
    meals_per_day: Option<u32>,
    eliminate_sugary_drinks: bool,
}

impl PlannedLifestyleDraft {
    pub fn set_target_weight(&mut self, weight: f64) {
        self.target_weight = Some(weight);
    }

    pub fn toggle_smoker(&mut self) {
        self.smoker = !self.smoker;
    }

    pub fn set_exercise_level(&mut self, level: ExerciseLevel) {
        self.exercise_level = Some(level);
    }

    pub fn set_diet_type(&mut self, diet: DietType) {
        self.diet_type = Some(diet);
    }

    pub fn set_meals_per_day(&mut self, meals: u32) {
        self.meals_per_day = Some(meals);
    }

    pub fn toggle_eliminate_sugary_drinks(&mut self) {
        self.eliminate_sugary_drinks = !self.eliminate_sugary_drinks;
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.target_weight.is_none() {
            missing.push("targetWeight");
        }
        if self.exercise_level.is_none() {
            missing.push("exerciseLevel");
        }
        if self.diet_type.is_none() {
            missing.push("plannedDietType");
        }
        if self.meals_per_day.is_none() {
            missing.push("plannedMealsPerDay");
        }
        missing
    }

    fn build(&self) -> Option<PlannedProfile> {
        Some(PlannedProfile {
            target_weight: self.target_weight?,
            smoker: self.smoker,
            exercise_level: self.exercise_level?,
            planned_diet_type: self.diet_type?,
            planned_meals_per_day: self.meals_per_day?,
            eliminate_sugary_drinks: self.eliminate_sugary_drinks,
        })
    }
}

/// In-memory state backing the comparison form.
///
/// Holds the two drafts and the submission lifecycle. No network or side
/// effect happens here; the request client owns the wire exchange.
#[derive(Debug, Default)]
pub struct LifestyleFormState {
    pub current: CurrentLifestyleDraft,
    pub planned: PlannedLifestyleDraft,
    pub submission: SubmissionState,
}

impl LifestyleFormState {
    /// Assemble a request once every required field of both profiles is set.
    pub fn validate(&self) -> Result<RiskComparisonRequest, MissingFieldsError> {
        let current = self.current.build().ok_or_else(|| MissingFieldsError {
            section: ProfileSection::Current,
            fields: self.current.missing_fields(),
        })?;
        let planned = self.planned.build().ok_or_else(|| MissingFieldsError {
            section: ProfileSection::Planned,
            fields: self.planned.missing_fields(),
        })?;
        Ok(RiskComparisonRequest { current, planned })
    }
}

/// Where one submission attempt currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded(RiskComparisonResult),
    Failed(String),
}

/// Handle identifying one submission attempt.
///
/// Outcomes delivered with an outdated token are discarded, so a slow
/// response from an abandoned attempt can never overwrite the state of a
/// newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionToken(u64);

/// Submission lifecycle: idle → validating → submitting → succeeded/failed.
#[derive(Debug, Default)]
pub struct SubmissionState {
    phase: SubmissionPhase,
    sequence: u64,
}

impl SubmissionState {
    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// Start a new attempt, discarding any prior result or error.
    pub fn begin(&mut self) -> SubmissionToken {
        self.sequence += 1;
        self.phase = SubmissionPhase::Validating;
        SubmissionToken(self.sequence)
    }

    /// Record a validation failure for the current attempt.
    pub fn reject(&mut self, token: SubmissionToken, error: &MissingFieldsError) -> bool {
        self.transition(token, SubmissionPhase::Failed(error.to_string()))
    }

    /// Mark the current attempt as sent.
    pub fn submit(&mut self, token: SubmissionToken) -> bool {
        self.transition(token, SubmissionPhase::Submitting)
    }

    /// Settle the current attempt with its outcome.
    ///
    /// Returns false (and changes nothing) when the token is stale.
    pub fn complete(
        &mut self,
        token: SubmissionToken,
        outcome: Result<RiskComparisonResult, String>,
    ) -> bool {
        let phase = match outcome {
            Ok(result) => SubmissionPhase::Succeeded(result),
            Err(message) => SubmissionPhase::Failed(message),
        };
        self.transition(token, phase)
    }

    fn transition(&mut self, token: SubmissionToken, phase: SubmissionPhase) -> bool {
        if token.0 != self.sequence {
            return false;
        }
        self.phase = phase;
        true
    }
}
