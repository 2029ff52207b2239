use anyhow::Context;
use clap::Parser;
use report_flatten_lib::{Converter, ConverterConfig};
use std::path::PathBuf;

/// Convert a report export archive into a flat JSON list of self-contained
/// templates.
#[derive(Parser, Debug)]
#[command(name = "report-flatten", version, about)]
struct Cli {
    /// Export archive (.jsrexport / .zip)
    export: PathBuf,

    /// Output JSON file; parent directories are created
    output: PathBuf,

    /// Log every discovery, registration and replacement step
    #[arg(short, long)]
    verbose: bool,

    /// Directory to extract into (defaults to the system temp dir)
    #[arg(long, value_name = "DIR")]
    work_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> (ConverterConfig, PathBuf, PathBuf) {
        let config = ConverterConfig {
            verbose: self.verbose,
            work_dir: self.work_dir,
            ..ConverterConfig::default()
        };
        (config, self.export, self.output)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, export, output) = cli.into_config();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let conversion = Converter::new(config)
        .save(&export, &output)
        .with_context(|| format!("Failed to convert {}", export.display()))?;

    log::info!(
        "{} templates, {} assets ({} binary)",
        conversion.summary.templates,
        conversion.summary.assets,
        conversion.summary.binary_assets
    );

    Ok(())
}
