use anyhow::{bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ninetraj::{LoadOptions, Reduction, ResultFile, TimeAxisCheck, TimeUnit};

#[derive(Parser)]
#[command(name = "ninetraj", about = "Inspect result files of the nine N-body integrator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the inferred structure of one or more result files
    Info {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<Utf8PathBuf>,

        /// Print one JSON object per file instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Print the reduced orbital elements at the end of a run
    Final {
        #[arg(value_name = "FILE")]
        file: Utf8PathBuf,

        /// Unit of the final time: dy, yr, kyr or Myr
        #[arg(long, default_value = "kyr")]
        unit: TimeUnit,

        /// Reduction over the last hundredth of the run: mean, median or last
        #[arg(long, default_value = "mean")]
        reduction: Reduction,

        /// Fail if the bodies of a timestep disagree on its time
        #[arg(long)]
        verify_time: bool,

        #[arg(long)]
        json: bool,
    },
}

fn info_one(path: &Utf8Path, json: bool) -> Result<()> {
    let file = ResultFile::open(path).with_context(|| format!("cannot use {path}"))?;
    let structure = file
        .structure()
        .with_context(|| format!("cannot infer the structure of {path}"))?;
    if json {
        let record = serde_json::json!({
            "file": path.as_str(),
            "kind": file.kind(),
            "structure": structure,
            "timestep_count": structure.timestep_count(),
            "records_dropped": structure.records_dropped(),
        });
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("{}", structure.report(file.file_name()));
    }
    Ok(())
}

/// Report every file; a failing file is reported on stderr and skipped.
fn info(files: &[Utf8PathBuf], json: bool) -> Result<()> {
    let mut failed = 0usize;
    for path in files {
        if let Err(err) = info_one(path, json) {
            eprintln!("Error: {err:#}");
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} of {} file(s) could not be read", files.len());
    }
    Ok(())
}

fn final_state(
    path: &Utf8Path,
    unit: TimeUnit,
    reduction: Reduction,
    verify_time: bool,
    json: bool,
) -> Result<()> {
    let time_axis = if verify_time {
        TimeAxisCheck::Verify
    } else {
        TimeAxisCheck::Trust
    };
    let options = LoadOptions::builder().time_axis(time_axis).build()?;
    debug!(%options, "loading {path}");

    let trajectory = ResultFile::open(path)
        .and_then(|file| file.load(&options))
        .with_context(|| format!("cannot load {path}"))?;
    let last = trajectory.final_state(unit, reduction)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&last)?);
    } else {
        print!("{last}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Info { files, json } => info(&files, json),
        Command::Final {
            file,
            unit,
            reduction,
            verify_time,
            json,
        } => final_state(&file, unit, reduction, verify_time, json),
    }
}
