#[macro_use]
extern crate clap;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;

use failure::Error;

mod analyzer;
mod args;
mod input;
mod log_parser;
mod render;
mod result;

use crate::render::json::JsonRenderer;
use crate::render::Renderer;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match args::parse_args(env::args()) {
        Ok(args) => args,
        Err(err) => match err.downcast::<clap::Error>() {
            Ok(clap_error) => clap_error.exit(),
            Err(err) => {
                error!("{}", err);
                process::exit(1);
            }
        },
    };

    match process_logs(&args) {
        Ok(0) => (),
        Ok(failed) => {
            error!("{} file(s) could not be analyzed", failed);
            process::exit(1);
        }
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}

/// Analyzes every log file found at the given path and returns how many of
/// them failed. A failing file does not stop the others.
fn process_logs(args: &args::AccessLogAnalyzerArgs) -> Result<usize, Error> {
    let log_files = input::log_files(Path::new(&args.path), &args.extension)?;

    let mut failed = 0;

    for log_file in log_files {
        if let Err(err) = process_log_file(&log_file, args) {
            error!("Could not analyze {}: {}", log_file.display(), err);
            failed += 1;
        }
    }

    Ok(failed)
}

fn process_log_file(log_file: &Path, args: &args::AccessLogAnalyzerArgs) -> Result<(), Error> {
    info!("Processing {}...", log_file.display());

    let reader = input::open(log_file)?;
    let result = analyzer::analyze_reader(reader)?;

    let output_path = input::output_path(log_file, &args.suffix);
    {
        let mut output = BufWriter::new(File::create(&output_path)?);
        JsonRenderer::new(&mut output).render(&result)?;
    }
    info!("Wrote {}", output_path.display());

    if !args.quiet {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        JsonRenderer::new(&mut handle).render(&result)?;
    }

    Ok(())
}
