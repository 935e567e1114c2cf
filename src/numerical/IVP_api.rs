//! One submission of y' = f(x), y(x0) = y0: exact solution and Euler approximation are
//! computed independently from the same inputs and merged into a message and chart series.
//!
//! # Example
//! ```
//! use RustedEuler::numerical::IVP_api::{Submission, run_submission};
//! let submission = Submission::from_text("x", "x", "2", "1", "0", "0");
//! let outcome = run_submission(&submission);
//! assert_eq!(outcome.message, "Solution: x^2/2 + 0");
//! assert_eq!(outcome.series.len(), 2);
//! ```
use crate::Utils::plots::{ChartError, ChartSeries, ChartSurface};
use crate::numerical::Euler::{Trajectory, approximate, steps_from_input};
use crate::symbolic::exact_solution::{SolutionResult, solve};
use crate::symbolic::symbolic_evaluator::ExpressionEvaluator;
use log::{info, warn};

pub const EULER_SERIES_LABEL: &str = "Euler Approximation";
pub const SOLUTION_SERIES_LABEL: &str = "Solution Equation";

/// The six user inputs of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub expression: String,
    pub independent_var: String,
    /// step count as typed, see [`steps_from_input`]
    pub num_steps: f64,
    pub step_size: f64,
    pub starting_x: f64,
    pub starting_y: f64,
}

/// Reads a number typed by the user. Anything that is not a number becomes NaN.
pub fn parse_number_text(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

impl Submission {
    pub fn new(
        expression: &str,
        independent_var: &str,
        num_steps: f64,
        step_size: f64,
        starting_x: f64,
        starting_y: f64,
    ) -> Self {
        Submission {
            expression: expression.to_string(),
            independent_var: independent_var.trim().to_string(),
            num_steps,
            step_size,
            starting_x,
            starting_y,
        }
    }

    /// Submission from raw form text, numbers unparsed.
    pub fn from_text(
        expression: &str,
        independent_var: &str,
        num_steps: &str,
        step_size: &str,
        starting_x: &str,
        starting_y: &str,
    ) -> Self {
        Submission::new(
            expression,
            independent_var,
            parse_number_text(num_steps),
            parse_number_text(step_size),
            parse_number_text(starting_x),
            parse_number_text(starting_y),
        )
    }

    pub fn iterations(&self) -> usize {
        steps_from_input(self.num_steps)
    }
}

/// Everything a run produces for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub solution: SolutionResult,
    /// "Solution: ..." or the failure sentence
    pub message: String,
    pub trajectory: Trajectory,
    pub series: Vec<ChartSeries>,
}

impl RunOutcome {
    pub fn series_by_label(&self, label: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.label == label)
    }
}

pub fn solution_message(solution: &SolutionResult) -> String {
    if solution.has_solution {
        format!("Solution: {}", solution.value)
    } else {
        solution.value.clone()
    }
}

/// Resolved solution evaluated at the x positions of the Euler trajectory.
fn solution_points(solution: &SolutionResult, var: &str, trajectory: &Trajectory) -> Vec<(f64, f64)> {
    let evaluator = ExpressionEvaluator::new(&solution.value);
    trajectory
        .iter()
        .map(|p| (p.x, evaluator.evaluate(var, p.x).value_or_nan()))
        .collect()
}

/// Runs solver and approximator on one submission.
pub fn run_submission(submission: &Submission) -> RunOutcome {
    let var = submission.independent_var.as_str();
    info!(
        "run: y' = {}, {}0 = {}, y0 = {}, {} steps of {}",
        submission.expression,
        var,
        submission.starting_x,
        submission.starting_y,
        submission.num_steps,
        submission.step_size
    );
    let solution = solve(
        &submission.expression,
        var,
        submission.starting_x,
        submission.starting_y,
    );
    let trajectory = approximate(
        &submission.expression,
        var,
        submission.iterations(),
        submission.step_size,
        submission.starting_x,
        submission.starting_y,
    );

    let mut series = vec![ChartSeries::new(
        EULER_SERIES_LABEL,
        trajectory.iter().map(|p| (p.x, p.y)).collect(),
    )];
    if solution.has_solution {
        series.push(ChartSeries::new(
            SOLUTION_SERIES_LABEL,
            solution_points(&solution, var, &trajectory),
        ));
    }

    RunOutcome {
        message: solution_message(&solution),
        solution,
        trajectory,
        series,
    }
}

/// Runs a submission and shows it: the chart's series are replaced, then rendered.
/// The outcome is returned whether or not rendering succeeded.
pub fn run_and_render(
    submission: &Submission,
    chart: &mut dyn ChartSurface,
) -> (RunOutcome, Result<(), ChartError>) {
    let outcome = run_submission(submission);
    chart.replace_all_series(outcome.series.clone());
    let rendered = chart.render();
    if let Err(e) = &rendered {
        warn!("chart of y' = {} was not rendered: {}", submission.expression, e);
    }
    (outcome, rendered)
}
