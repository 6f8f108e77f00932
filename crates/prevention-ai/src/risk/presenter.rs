use super::form::{SubmissionPhase, SubmissionState};
use super::profile::RiskComparisonResult;

/// Render a settled submission for display.
///
/// At most one of result or error is ever shown; nothing is rendered while
/// idle or while a request is outstanding.
pub fn render(state: &SubmissionState) -> Option<String> {
    match state.phase() {
        SubmissionPhase::Succeeded(result) => Some(render_result(result)),
        SubmissionPhase::Failed(message) => Some(message.clone()),
        SubmissionPhase::Idle | SubmissionPhase::Validating | SubmissionPhase::Submitting => None,
    }
}

/// The one sentence shown for a successful estimate.
pub fn render_result(result: &RiskComparisonResult) -> String {
    format!(
        "You are {} times {} likely to get diabetes",
        result.multiplier, result.direction
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::profile::Direction;

    fn settled(outcome: Result<RiskComparisonResult, String>) -> SubmissionState {
        let mut state = SubmissionState::default();
        let token = state.begin();
        state.submit(token);
        state.complete(token, outcome);
        state
    }

    #[test]
    fn success_renders_the_result_sentence() {
        let state = settled(Ok(RiskComparisonResult {
            multiplier: "2.1".to_string(),
            direction: Direction::Less,
        }));
        assert_eq!(
            render(&state).as_deref(),
            Some("You are 2.1 times less likely to get diabetes")
        );
    }

    #[test]
    fn failure_renders_the_error_verbatim() {
        let state = settled(Err("Network error. Please try again.".to_string()));
        assert_eq!(
            render(&state).as_deref(),
            Some("Network error. Please try again.")
        );
    }

    #[test]
    fn nothing_rendered_while_pending() {
        let mut state = SubmissionState::default();
        assert!(render(&state).is_none());

        let token = state.begin();
        assert!(render(&state).is_none());

        state.submit(token);
        assert!(render(&state).is_none());
    }

    #[test]
    fn new_submission_clears_a_prior_result() {
        let mut state = settled(Ok(RiskComparisonResult {
            multiplier: "1.3".to_string(),
            direction: Direction::More,
        }));
        assert!(render(&state).is_some());

        state.begin();
        assert!(render(&state).is_none());
    }
}
