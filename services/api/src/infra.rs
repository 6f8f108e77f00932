use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use prevention_ai::risk::{DietType, ExerciseLevel};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_exercise_level(raw: &str) -> Result<ExerciseLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" => Ok(ExerciseLevel::None),
        "light" => Ok(ExerciseLevel::Light),
        "moderate" => Ok(ExerciseLevel::Moderate),
        "heavy" => Ok(ExerciseLevel::Heavy),
        other => Err(format!(
            "'{other}' is not an exercise level (none, light, moderate, heavy)"
        )),
    }
}

pub(crate) fn parse_diet_type(raw: &str) -> Result<DietType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "omnivore" => Ok(DietType::Omnivore),
        "vegetarian" => Ok(DietType::Vegetarian),
        "vegan" => Ok(DietType::Vegan),
        "pescetarian" => Ok(DietType::Pescetarian),
        other => Err(format!(
            "'{other}' is not a diet type (omnivore, vegetarian, vegan, pescetarian)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exercise_levels_parse_case_insensitively() {
        assert_eq!(
            parse_exercise_level("Moderate"),
            Ok(ExerciseLevel::Moderate)
        );
        assert_eq!(parse_exercise_level(" none "), Ok(ExerciseLevel::None));
        assert!(parse_exercise_level("extreme").is_err());
    }

    #[test]
    fn diet_types_parse_case_insensitively() {
        assert_eq!(parse_diet_type("VEGAN"), Ok(DietType::Vegan));
        assert!(parse_diet_type("carnivore").is_err());
    }
}
