mod config;
mod samples;

use anyhow::Result;
use clap::Parser;
use log::info;

use config::Args;
use meshq_batch::run_batch;
use meshq_format::{
    failures_csv, magnitude_summary, method_pivot, summary_text, table_csv, table_json,
};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.batch_config()?;
    let meshes = samples::samples(&args.meshes)?;
    info!("processing {} meshes with {} bins", meshes.len(), config.bins);

    let report = run_batch(&meshes, &config);

    if args.summaries {
        for run in &report.runs {
            print!("{}", summary_text(run)?);
            println!("{}\n", magnitude_summary(&run.error_magnitudes));
        }
    }

    if args.json {
        println!("{}", table_json(&report.table)?);
    } else {
        print!("{}", table_csv(&report.table));
        println!();
        print!("{}", method_pivot(&report.table));
    }

    if !report.failures.is_empty() {
        eprint!("{}", failures_csv(&report.failures));
    }
    if let Some(err) = &report.incomplete {
        eprintln!("warning: {}", err);
    }
    Ok(())
}
