#![allow(non_snake_case)]
use RustedEuler::Utils::logger::init_logger;
use RustedEuler::Utils::plots::PlottersChart;
use RustedEuler::Utils::task_parser::{TaskConfig, TaskError};
use RustedEuler::numerical::IVP_api::{RunOutcome, Submission, run_and_render};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Solve y' = f(x) exactly where possible and approximate it with Euler's method
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task file with problem/initial/grid/output sections
    #[arg(long, conflicts_with = "expression")]
    task: Option<PathBuf>,
    /// Right-hand side f(x) of the equation
    #[arg(long, required_unless_present = "task")]
    expression: Option<String>,
    /// Independent variable
    #[arg(long, default_value = "x")]
    var: String,
    /// Number of Euler steps
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    steps: String,
    /// Step size
    #[arg(long, default_value = "0.1", allow_hyphen_values = true)]
    step_size: String,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    x0: String,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    y0: String,
    /// PNG file for the chart
    #[arg(long)]
    plot: Option<PathBuf>,
    /// debug, info, warn, error or off
    #[arg(long)]
    loglevel: Option<String>,
    /// Also write the log into log_<date>_<time>.txt
    #[arg(long)]
    log_file: bool,
}

impl Cli {
    /// Task file if given, flags otherwise. Flags for the output override the file.
    fn config(&self) -> Result<TaskConfig, TaskError> {
        let mut config = match (&self.task, &self.expression) {
            (Some(path), _) => TaskConfig::from_file(path)?,
            (None, expression) => TaskConfig {
                submission: Submission::from_text(
                    expression.as_deref().unwrap_or_default(),
                    &self.var,
                    &self.steps,
                    &self.step_size,
                    &self.x0,
                    &self.y0,
                ),
                plot: PathBuf::from("euler.png"),
                loglevel: "info".to_string(),
                log_file: false,
            },
        };
        if let Some(plot) = &self.plot {
            config.plot = plot.clone();
        }
        if let Some(loglevel) = &self.loglevel {
            config.loglevel = loglevel.clone();
        }
        config.log_file |= self.log_file;
        Ok(config)
    }
}

fn print_outcome(outcome: &RunOutcome, var: &str) {
    println!("{}", outcome.message);
    println!("{:>6} {:>16} {:>16}", "step", var, "y");
    for (i, point) in outcome.trajectory.iter().enumerate() {
        println!("{:>6} {:>16.8} {:>16.8}", i, point.x, point.y);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logger(&config.loglevel, config.log_file) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let submission = &config.submission;
    let mut chart = PlottersChart::new(&config.plot, &submission.independent_var)
        .with_caption(&format!("y' = {}", submission.expression));
    let (outcome, rendered) = run_and_render(submission, &mut chart);
    print_outcome(&outcome, &submission.independent_var);
    if let Err(e) = rendered {
        eprintln!("Error: {}", e);
    }
    ExitCode::SUCCESS
}
