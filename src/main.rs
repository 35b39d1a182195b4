#[macro_use]
extern crate log;

use std::{
    fs::File,
    io::{prelude::*, stdout, BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;

mod call;
mod cli;
mod duplicates;
mod io;
mod reader;

use cli::Cli;

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// If `output` is `Some`, it creates a file at the specified path and returns a `BufWriter` for it.
/// If `output` is `None`, it returns a `BufWriter` for the standard output.
///
/// # Arguments
///
/// * `output` - An `Option` containing the path to the output file as a `String`.
///
/// # Returns
///
/// A `Result` containing a `BufWriter` that implements `Write`.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("readprune v{}", cli::VERSION);

    let file = File::open(&cli.file)
        .with_context(|| format!("Unable to open file {}", cli.file))?;
    let records = reader::FastxReader::new(BufReader::new(file));

    let mut writer = get_writer(&cli.output)?;

    let opts = call::CallOpts {
        min_copies: cli.min_copies,
        preserve_copies: cli.preserve_copies,
    };

    let stats = call::call(records, &mut writer, &opts)?;
    writer.flush()?;

    if let Some(ref path) = cli.stats {
        let stats_file = File::create(Path::new(path))
            .with_context(|| format!("Unable to create statistics file {path}"))?;
        serde_json::to_writer_pretty(stats_file, &stats)?;
        info!("Wrote duplicate statistics to {path}");
    }

    info!("Completed successfully.");
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
