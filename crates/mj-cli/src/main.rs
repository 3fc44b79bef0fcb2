//! mujob CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use mj_core::{configure_job, FrameworkState, InputMode, JobConfig};

#[derive(Parser)]
#[command(name = "mujob")]
#[command(about = "mujob - muon B-field analysis job configuration")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a job configuration and emit the resolved framework state
    Configure {
        /// Job configuration file (YAML; JSON by extension)
        #[arg(short, long)]
        config: PathBuf,

        /// Override the input mode with a local file list (one path per line)
        #[arg(long)]
        files_input: Option<PathBuf>,

        /// Output file for the resolved state (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Configure { config, files_input, output } => {
            cmd_configure(&config, files_input, output.as_ref())
        }
        Commands::Version => {
            println!("mujob {}", mj_core::VERSION);
            Ok(())
        }
    }
}

fn read_job_config(path: &Path) -> Result<JobConfig> {
    let bytes = std::fs::read(path)?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let cfg: JobConfig = if ext == "json" {
        serde_json::from_slice(&bytes)?
    } else {
        // Default: YAML (serde_yaml_ng).
        serde_yaml_ng::from_slice(&bytes)?
    };
    Ok(cfg)
}

fn cmd_configure(
    config: &Path,
    files_input: Option<PathBuf>,
    output: Option<&PathBuf>,
) -> Result<()> {
    let mut cfg = read_job_config(config)?;
    if let Some(list_path) = files_input {
        // Batch-launcher override: force local-list reading regardless of the
        // configured input mode.
        cfg.input = InputMode::LocalList { list_path };
    }

    let mut fw = FrameworkState::default();
    configure_job(&cfg, &mut fw)?;
    tracing::debug!(
        n_algorithms = fw.alg_sequence.len(),
        n_inputs = fw.flags.files_input.len(),
        "job configured"
    );

    write_json(output, serde_json::to_value(&fw)?)
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
