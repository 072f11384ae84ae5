//! Acquisition Study Binary
//!
//! Runs the event study over a JSON dataset bundle and prints the result
//! as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p acquisition-study -- dataset.json [study.yaml]
//! ```
//!
//! The dataset bundle is `{ "months", "companies", "sharePrices", "indexPrices" }`.
//! Raw prices are cleaned and buyers below `analysis.min_market_cap` are
//! removed before the run.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (overrides `observability.logging.level`)

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use acquisition_study::cleaning::prepare_dataset;
use acquisition_study::config::{StudyConfig, load_config};
use acquisition_study::models::StudyDataset;
use acquisition_study::returns::format_optional_pct;
use acquisition_study::telemetry::init_tracing;
use acquisition_study::AcquisitionStudy;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(dataset_path) = args.next() else {
        return Err("usage: acquisition-study <dataset.json> [study.yaml]".into());
    };

    let config = match args.next() {
        Some(path) => load_config(Some(&path))?,
        None => StudyConfig::default(),
    };
    init_tracing(&config.observability.logging);

    info!("Reading dataset from {}", dataset_path);
    let raw: StudyDataset = serde_json::from_reader(BufReader::new(File::open(&dataset_path)?))?;
    let dataset = prepare_dataset(raw, config.analysis.min_market_cap)?;

    let output = AcquisitionStudy::new(&config).run(&dataset)?;
    info!(
        "Baseline over {} acquisitions: {} abnormal return since announcement",
        output.baseline.sample_count,
        format_optional_pct(output.baseline.abnormal.final_since_announcement())
    );

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
