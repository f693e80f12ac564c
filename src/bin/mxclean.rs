//! mxclean - metabolomics feature table cleaner
//!
//! Command-line interface running the QC/blank/sample cleaning pipeline on
//! a CSV feature table.

use clap::{ArgAction, Parser, ValueEnum};
use mx_cleaner::config::CleanerConfig;
use mx_cleaner::data::PrefixMode;
use mx_cleaner::error::Result;
use mx_cleaner::pipeline::clean_file_with_report;
use std::path::PathBuf;

/// CLI-friendly prefix mode enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliPrefixMode {
    /// Comma-separated prefixes ("S, WT, KO")
    Tokens,
    /// Every character of the value is its own prefix
    Characters,
}

impl From<CliPrefixMode> for PrefixMode {
    fn from(mode: CliPrefixMode) -> Self {
        match mode {
            CliPrefixMode::Tokens => PrefixMode::Tokens,
            CliPrefixMode::Characters => PrefixMode::Characters,
        }
    }
}

/// Clean a metabolomics feature table using QC, blank and sample columns
#[derive(Parser)]
#[command(name = "mxclean")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Mass column name (default: "Mass")
    #[arg(long, alias = "Mass")]
    mass: Option<String>,

    /// RT column name (default: "RT")
    #[arg(long, alias = "RT")]
    rt: Option<String>,

    /// Sample column prefix(es), comma separated (default: "S")
    #[arg(long, alias = "Sample")]
    sample: Option<String>,

    /// How the sample prefix value is split into prefixes
    #[arg(long, value_enum)]
    sample_prefix_mode: Option<CliPrefixMode>,

    /// Blank column prefix (default: "Blank")
    #[arg(long, alias = "Blank")]
    blank: Option<String>,

    /// QC column prefix (default: "QC")
    #[arg(long, alias = "QC")]
    qc: Option<String>,

    /// %Deviation in QC samples (default: 25)
    #[arg(long)]
    deviation: Option<f64>,

    /// %Detected in QC samples (default: 70)
    #[arg(long, alias = "detection_limit")]
    detection_limit: Option<f64>,

    /// QC/Blank ratio (default: 5)
    #[arg(long)]
    ratio: Option<f64>,

    /// %CV in QC samples (default: 30)
    #[arg(long)]
    cv: Option<f64>,

    /// YAML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path (default: <input>_cleaned.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Build the effective configuration: file (or defaults), then flags.
    fn config(&self) -> Result<CleanerConfig> {
        let mut config = match &self.config {
            Some(path) => CleanerConfig::from_file(path)?,
            None => CleanerConfig::default(),
        };

        if let Some(mass) = &self.mass {
            config.mass_col = mass.clone();
        }
        if let Some(rt) = &self.rt {
            config.rt_col = rt.clone();
        }
        if let Some(sample) = &self.sample {
            config.sample_prefixes = sample.clone();
        }
        if let Some(mode) = self.sample_prefix_mode {
            config.sample_prefix_mode = mode.into();
        }
        if let Some(blank) = &self.blank {
            config.blank_prefix = blank.clone();
        }
        if let Some(qc) = &self.qc {
            config.qc_prefix = qc.clone();
        }
        if let Some(deviation) = self.deviation {
            config.deviation_pct = deviation;
        }
        if let Some(detection) = self.detection_limit {
            config.detection_pct = detection;
        }
        if let Some(ratio) = self.ratio {
            config.ratio_min = ratio;
        }
        if let Some(cv) = self.cv {
            config.cv_max_pct = cv;
        }

        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error [{}]: {}", e.kind(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config()?;
    let (output_path, report) = clean_file_with_report(
        &cli.input,
        cli.output.as_deref(),
        cli.report.as_deref(),
        &config,
    )?;

    let (rows, cols) = report.original_shape;
    println!("Shape of original dataset: ({}, {})", rows, cols);
    let (rows, cols) = report.cleaned_shape;
    println!("Shape of cleaned dataset: ({}, {})", rows, cols);
    println!();
    println!("File path: {}", cli.input.display());
    print!("{}", config);
    println!("Output: {}", output_path.display());
    println!();
    println!("Done!");

    Ok(())
}
