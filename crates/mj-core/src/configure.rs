//! The job configuration pass.
//!
//! One linear pass over a fresh [`FrameworkState`], run exactly once per job
//! before the event loop: pick the input mode, route histogram output, append
//! the analysis algorithm, quiet the framework messaging. Failures propagate
//! to the launcher; nothing is retried or rolled back.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::algorithm::{AlgorithmRegistry, MUON_SELECTION};
use crate::error::{Error, Result};
use crate::framework::{AccessMode, FrameworkState, HistOutput, OutputLevel, XAOD_EVENT_READER};
use crate::input::{read_file_list, InputMode};

/// Event-selector access-mode code for grid xAOD reading.
pub const GRID_ACCESS_MODE_CODE: i32 = 1;

/// Default histogram output mapping.
pub const DEFAULT_HIST_OUTPUT: &str = "ANALYSIS:bfield_map_2016.outputs.root";

/// Job configuration, loaded from YAML or JSON by the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Input mode: grid dataset or local file list.
    pub input: InputMode,

    /// Histogram outputs in `STREAM:file.root` flag form.
    #[serde(default = "default_hist_outputs")]
    pub hist_outputs: Vec<String>,

    /// Read access mode applied in local-list mode.
    #[serde(default = "default_access_mode")]
    pub access_mode: AccessMode,

    /// Algorithm appended to the main sequence.
    #[serde(default)]
    pub algorithm: AlgorithmConfig,

    /// Raise the framework message threshold to `Warning` after configuring.
    #[serde(default = "default_true")]
    pub suppress_logging: bool,
}

fn default_hist_outputs() -> Vec<String> {
    vec![DEFAULT_HIST_OUTPUT.to_string()]
}

fn default_access_mode() -> AccessMode {
    AccessMode::Class
}

fn default_true() -> bool {
    true
}

/// Which algorithm to run, and with which properties.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmConfig {
    /// Registered factory type name.
    #[serde(default = "default_algorithm_type")]
    pub type_name: String,

    /// Instance name; defaults to the type name.
    #[serde(default)]
    pub name: Option<String>,

    /// Property assignments forwarded at initialize time.
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

fn default_algorithm_type() -> String {
    MUON_SELECTION.to_string()
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self { type_name: default_algorithm_type(), name: None, properties: BTreeMap::new() }
    }
}

/// Apply `cfg` to `fw` with the stock algorithm registry.
pub fn configure_job(cfg: &JobConfig, fw: &mut FrameworkState) -> Result<()> {
    configure_job_with(cfg, &AlgorithmRegistry::default(), fw)
}

/// Apply `cfg` to `fw`, in the order the framework expects.
///
/// 1. Grid mode registers the xAOD event reader and sets the selector code;
///    local-list mode reads the list file into the files-input flag and sets
///    the string access mode. The untaken branch's state is never touched.
/// 2. Histogram outputs are mapped and the output size cap is disabled.
/// 3. The configured algorithm is appended after any existing entries.
/// 4. Message output is raised to `Warning` unless suppression is off.
pub fn configure_job_with(
    cfg: &JobConfig,
    registry: &AlgorithmRegistry,
    fw: &mut FrameworkState,
) -> Result<()> {
    match &cfg.input {
        InputMode::Grid => {
            fw.services.register(XAOD_EVENT_READER)?;
            fw.event_selector.access_mode = Some(GRID_ACCESS_MODE_CODE);
        }
        InputMode::LocalList { list_path } => {
            let files = read_file_list(list_path)?;
            let first = files.first().ok_or_else(|| {
                Error::Config(format!("empty input file list: {}", list_path.display()))
            })?;
            tracing::info!(first_input = %first, n_files = files.len(), "input file list loaded");
            fw.flags.files_input = files;
            fw.flags.access_mode = Some(cfg.access_mode);
        }
    }

    fw.flags.hist_outputs =
        cfg.hist_outputs.iter().map(|s| HistOutput::parse(s)).collect::<Result<Vec<_>>>()?;
    // No size cap on the histogram file; jobs routinely exceed the default.
    fw.hist_svc.max_file_size = -1;

    let alg = registry.create(
        &cfg.algorithm.type_name,
        cfg.algorithm.name.as_deref(),
        cfg.algorithm.properties.clone(),
    )?;
    fw.alg_sequence.append(alg);

    if cfg.suppress_logging {
        fw.message_svc.suppress_to(OutputLevel::Warning);
    }

    Ok(())
}
