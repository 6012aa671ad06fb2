#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

use podium::pipeline::{self, PipelineError, PipelineOutput};
use podium::split::DEFAULT_SPLIT_YEAR;

/// Predicts Olympic medal counts per country-year with ordinary least
/// squares and reports prediction error per country.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the team CSV with team,country,year,athletes,age,prev_medals,medals columns
    input: PathBuf,

    /// First Games year held out for evaluation; earlier years train the model
    #[arg(long, default_value_t = DEFAULT_SPLIT_YEAR)]
    split_year: i32,

    /// Optional path to write per-row predictions as CSV
    #[arg(long, value_name = "PATH")]
    predictions_out: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let output = pipeline::run(&cli.input, cli.split_year)?;

    if let Some(path) = &cli.predictions_out {
        write_predictions(path, &output).map_err(PipelineError::from)?;
    }

    print_report(&output);
    Ok(())
}

fn write_predictions(
    path: &Path,
    output: &PipelineOutput,
) -> Result<(), podium::data::DataError> {
    let mut writer = csv::Writer::from_path(path)?;
    for prediction in &output.predictions {
        writer.serialize(prediction)?;
    }
    writer.flush()?;
    log::info!(
        "Wrote {} predictions to {}",
        output.predictions.len(),
        path.display()
    );
    Ok(())
}

fn print_report(output: &PipelineOutput) {
    let model = &output.model;
    println!("Model: medals ~ intercept + predictors (trained on {} rows)", output.train.len());
    println!("  intercept: {:+.4}", model.intercept);
    for (predictor, coefficient) in model.predictors.iter().zip(&model.coefficients) {
        println!("  {:<12} {:+.4}", predictor.name(), coefficient);
    }
    println!();
    println!(
        "Overall mean absolute error: {:.3} medals over {} test rows",
        output.summary.overall_mae,
        output.predictions.len()
    );
    println!();
    println!("Error ratio by country (ascending; MAE / mean actual medals):");
    println!("{:<8} {:>8} {:>12} {:>8}", "team", "MAE", "mean medals", "ratio");
    for entry in &output.summary.by_country {
        println!(
            "{:<8} {:>8.2} {:>12.2} {:>8.3}",
            entry.country, entry.mae, entry.mean_actual, entry.ratio
        );
    }
}
