use clap::Args;

use prevention_ai::error::AppError;
use prevention_ai::risk::{
    presenter, DietType, ExerciseLevel, LifestyleFormState, RiskRequestClient, FEATURED_CHARTS,
};

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Comparison endpoint of a running server
    #[arg(long, default_value = "http://127.0.0.1:3000/api/preventionRisk")]
    pub(crate) endpoint: String,

    /// Current age in years
    #[arg(long)]
    pub(crate) age: Option<u32>,
    /// Current weight (lbs)
    #[arg(long)]
    pub(crate) weight: Option<f64>,
    /// The current profile smokes
    #[arg(long)]
    pub(crate) smoker: bool,
    /// Current exercise level (none, light, moderate, heavy)
    #[arg(long, value_parser = crate::infra::parse_exercise_level)]
    pub(crate) exercise_level: Option<ExerciseLevel>,
    /// Current diet type (omnivore, vegetarian, vegan, pescetarian)
    #[arg(long, value_parser = crate::infra::parse_diet_type)]
    pub(crate) diet_type: Option<DietType>,
    /// Current meals per day
    #[arg(long)]
    pub(crate) meals_per_day: Option<u32>,
    /// The current profile regularly consumes sugary drinks
    #[arg(long)]
    pub(crate) sugary_drinks: bool,

    /// Planned target weight (lbs)
    #[arg(long)]
    pub(crate) target_weight: Option<f64>,
    /// The planned profile keeps smoking
    #[arg(long)]
    pub(crate) planned_smoker: bool,
    /// Planned exercise level (none, light, moderate, heavy)
    #[arg(long, value_parser = crate::infra::parse_exercise_level)]
    pub(crate) planned_exercise_level: Option<ExerciseLevel>,
    /// Planned diet type (omnivore, vegetarian, vegan, pescetarian)
    #[arg(long, value_parser = crate::infra::parse_diet_type)]
    pub(crate) planned_diet_type: Option<DietType>,
    /// Planned meals per day
    #[arg(long)]
    pub(crate) planned_meals_per_day: Option<u32>,
    /// The planned profile eliminates sugary drinks
    #[arg(long)]
    pub(crate) eliminate_sugary_drinks: bool,
}

/// Drive the full client path once: form state, validation, submission,
/// presentation. Validation failures and server errors are printed the same
/// way the form would surface them; only transport plumbing bubbles up.
pub(crate) async fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let mut form = LifestyleFormState::default();

    if let Some(age) = args.age {
        form.current.set_age(age);
    }
    if let Some(weight) = args.weight {
        form.current.set_weight(weight);
    }
    if args.smoker {
        form.current.toggle_smoker();
    }
    if let Some(level) = args.exercise_level {
        form.current.set_exercise_level(level);
    }
    if let Some(diet) = args.diet_type {
        form.current.set_diet_type(diet);
    }
    if let Some(meals) = args.meals_per_day {
        form.current.set_meals_per_day(meals);
    }
    if args.sugary_drinks {
        form.current.toggle_sugary_drinks();
    }

    if let Some(weight) = args.target_weight {
        form.planned.set_target_weight(weight);
    }
    if args.planned_smoker {
        form.planned.toggle_smoker();
    }
    if let Some(level) = args.planned_exercise_level {
        form.planned.set_exercise_level(level);
    }
    if let Some(diet) = args.planned_diet_type {
        form.planned.set_diet_type(diet);
    }
    if let Some(meals) = args.planned_meals_per_day {
        form.planned.set_meals_per_day(meals);
    }
    if args.eliminate_sugary_drinks {
        form.planned.toggle_eliminate_sugary_drinks();
    }

    let token = form.submission.begin();
    let request = match form.validate() {
        Ok(request) => request,
        Err(error) => {
            form.submission.reject(token, &error);
            if let Some(line) = presenter::render(&form.submission) {
                println!("{line}");
            }
            return Ok(());
        }
    };

    form.submission.submit(token);
    let client = RiskRequestClient::new(args.endpoint);
    let outcome = client
        .submit(&request)
        .await
        .map_err(|error| error.to_string());
    form.submission.complete(token, outcome);

    if let Some(line) = presenter::render(&form.submission) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn run_charts() {
    for chart in FEATURED_CHARTS {
        println!("{}", chart.slug);
        println!("  {}", chart.caption);
    }
}
