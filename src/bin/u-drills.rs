//! Command-line front end for the drills.
//!
//! Set `RUST_LOG=u_drills=debug` to see experiment summaries.

use std::error::Error;
use std::fmt::Write;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_drills::arithmetic::arrange;
use u_drills::budget::{spend_chart, Category};
use u_drills::clock::add_time;
use u_drills::probability::{exact_probability, Estimate, Expectation, ExperimentConfig, Hat};
use u_drills::shapes::{Rectangle, Shape, Square};

#[derive(Debug, Parser)]
#[command(name = "u-drills", version, about = "Monte Carlo draws and small formatting drills")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the chance of drawing at least the expected balls from a hat.
    Probability {
        /// Hat contents, e.g. `black=6,red=4,green=3`.
        #[arg(long)]
        hat: Hat,
        /// Minimum counts, e.g. `red=2,green=1`.
        #[arg(long)]
        expect: Expectation,
        /// Balls drawn per trial.
        #[arg(long)]
        draws: usize,
        /// Number of trials.
        #[arg(long, default_value_t = 10_000)]
        trials: usize,
        /// Seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Arrange addition and subtraction problems vertically.
    Arrange {
        /// Also print the answers.
        #[arg(long)]
        answers: bool,
        /// Problems such as "32 + 698".
        problems: Vec<String>,
    },
    /// Add a duration to a 12-hour clock time.
    AddTime {
        /// Start time, e.g. "3:00 PM".
        start: String,
        /// Duration, e.g. "3:10".
        duration: String,
        /// Starting day of the week.
        #[arg(long)]
        day: Option<String>,
    },
    /// Measure a rectangle, and optionally count squares that fit inside it.
    Shapes {
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Side of a square to fit inside the rectangle.
        #[arg(long)]
        side: Option<u32>,
    },
    /// Print a sample ledger and spending chart.
    Budget,
}

/// Estimate, its uncertainty, and how it compares with the exact value.
fn probability_report(estimate: &Estimate, exact: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "estimate: {estimate}");
    let _ = writeln!(out, "std error: {:.4}", estimate.standard_error());
    if let Some((lo, hi)) = estimate.wilson_interval(0.95) {
        let _ = writeln!(out, "95% interval: [{lo:.4}, {hi:.4}]");
    }
    let _ = writeln!(out, "exact: {exact:.6}");
    let _ = writeln!(out, "p-value vs exact: {:.4}", estimate.two_sided_p_value(exact));
    out
}

/// Measurements of a rectangle. A rectangle too big to draw gets the error
/// text in place of its picture.
fn shapes_report(width: u32, height: u32, side: Option<u32>) -> String {
    let rect = Rectangle::new(width, height);
    let mut out = String::new();
    let _ = writeln!(out, "{rect}");
    let _ = writeln!(out, "area: {}", rect.area());
    let _ = writeln!(out, "perimeter: {}", rect.perimeter());
    let _ = writeln!(out, "diagonal: {:.4}", rect.diagonal());
    match rect.picture() {
        Ok(picture) => out.push_str(&picture),
        Err(err) => {
            let _ = writeln!(out, "{err}");
        }
    }
    if let Some(side) = side {
        let square = Square::new(side);
        let _ = writeln!(out, "{square} fits {} times", rect.amount_inside(&square));
    }
    out
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Probability {
            hat,
            expect,
            draws,
            trials,
            seed,
        } => {
            let mut config = ExperimentConfig::new(draws, trials)?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            info!(%hat, ?config, "running experiment");
            let estimate = config.run(&hat, &expect)?;
            let exact = exact_probability(&hat, &expect, draws);
            print!("{}", probability_report(&estimate, exact));
        }
        Command::Arrange { answers, problems } => {
            let refs: Vec<&str> = problems.iter().map(String::as_str).collect();
            println!("{}", arrange(&refs, answers)?);
        }
        Command::AddTime {
            start,
            duration,
            day,
        } => {
            println!("{}", add_time(&start, &duration, day.as_deref())?);
        }
        Command::Shapes {
            width,
            height,
            side,
        } => {
            print!("{}", shapes_report(width, height, side));
        }
        Command::Budget => {
            let mut food = Category::new("Food");
            let mut clothing = Category::new("Clothing");
            let mut auto = Category::new("Auto");
            food.deposit(1000.0, "initial deposit");
            food.withdraw(10.15, "groceries");
            food.withdraw(15.89, "restaurant and more food for dessert");
            food.transfer(50.0, &mut clothing);
            clothing.withdraw(25.55, "shirts");
            auto.deposit(1000.0, "initial deposit");
            auto.withdraw(15.0, "fuel");

            println!("{food}");
            println!("{clothing}");
            println!("{auto}");
            println!("{}", spend_chart(&[&food, &clothing, &auto]));
        }
    }
    Ok(())
}
