use anyhow::Context;
use clap::Parser;
use csv_record_reader::cli::{Args, create_progress_spinner, print_summary, setup_logging};
use csv_record_reader::models::Account;
use csv_record_reader::{CallbackSink, CountingSink, CsvFileReader, ProcessingError};
use std::process;
use tracing::{error, info};

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Load the file and report outcomes; `Ok(false)` means the file itself failed
fn run(args: &Args) -> anyhow::Result<bool> {
    setup_logging(args)?;

    let config = args.to_config();
    let reader = CsvFileReader::<Account>::from_config(&config)
        .with_context(|| format!("Failed to set up reader for {}", config.file_path.display()))?;

    let progress = args.progress.then(create_progress_spinner);

    let sink = CountingSink::new(CallbackSink::new(
        |account: Account| {
            info!("Successfully read: {}", account);
            if let Some(spinner) = &progress {
                spinner.inc(1);
            }
        },
        |failure: ProcessingError| {
            error!("Unsuccessfully read: {}", failure);
            if let Some(spinner) = &progress {
                spinner.inc(1);
            }
        },
    ));

    reader.process(&sink);

    if let Some(spinner) = &progress {
        spinner.finish_and_clear();
    }

    let summary = sink.summary();
    print_summary(&summary, args.json)?;

    Ok(summary.fatal_errors == 0)
}
