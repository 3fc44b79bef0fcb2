//! Explicit framework state.
//!
//! The host framework holds these registries as process-wide globals that a
//! job-options layer mutates before the event loop starts. Here they are one
//! owned [`FrameworkState`] so the configuration pass stays checkable in
//! isolation. Everything is `Serialize` so the CLI can dump the resolved
//! state as JSON.

use serde::{Deserialize, Serialize};

use crate::algorithm::AlgorithmInstance;
use crate::error::{Error, Result};

/// Service name registered when reading a grid dataset through the xAOD
/// event reader.
pub const XAOD_EVENT_READER: &str = "xAODEventReader";

/// Framework default cap on histogram output files, in MiB.
pub const DEFAULT_MAX_FILE_SIZE: i64 = 10240;

/// Read access mode for xAOD input files.
///
/// `Class` is the recommended default for xAOD reading; `Branch` trades
/// startup cost for per-branch access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    #[serde(rename = "ClassAccess")]
    Class,
    #[serde(rename = "BranchAccess")]
    Branch,
}

impl AccessMode {
    /// String code the framework flag store expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Class => "ClassAccess",
            AccessMode::Branch => "BranchAccess",
        }
    }
}

/// One histogram output mapping, `STREAM:file.root` in flag form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistOutput {
    /// Logical stream name, e.g. `ANALYSIS`.
    pub stream: String,
    /// Target file path.
    pub file: String,
}

impl HistOutput {
    pub fn new(stream: impl Into<String>, file: impl Into<String>) -> Self {
        Self { stream: stream.into(), file: file.into() }
    }

    /// Parse the `STREAM:file.root` flag form.
    pub fn parse(flag: &str) -> Result<Self> {
        match flag.split_once(':') {
            Some((stream, file)) if !stream.is_empty() && !file.is_empty() => {
                Ok(Self::new(stream, file))
            }
            _ => Err(Error::Config(format!(
                "malformed hist output mapping {flag:?}, expected STREAM:file"
            ))),
        }
    }

    /// Flag-store encoding (`"ANALYSIS:out.root"`).
    pub fn to_flag(&self) -> String {
        format!("{}:{}", self.stream, self.file)
    }
}

/// Process-wide job flags: which files to read, how, and where histograms go.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobFlags {
    /// Ordered input file paths (local-list mode only).
    pub files_input: Vec<String>,
    /// Read access mode (local-list mode only).
    pub access_mode: Option<AccessMode>,
    /// Histogram output stream mappings.
    pub hist_outputs: Vec<HistOutput>,
}

/// Event selector service properties.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventSelector {
    /// Integer access-mode code; the grid xAOD reader expects `1`.
    pub access_mode: Option<i32>,
}

/// Histogram service properties.
#[derive(Debug, Clone, Serialize)]
pub struct HistSvc {
    /// Max output file size in MiB; `-1` disables the cap.
    pub max_file_size: i64,
}

impl Default for HistSvc {
    fn default() -> Self {
        Self { max_file_size: DEFAULT_MAX_FILE_SIZE }
    }
}

/// Ordered registry of framework services configured by this job.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceRegistry {
    services: Vec<String>,
}

impl ServiceRegistry {
    /// Register a service by name. The configuration pass runs once per job,
    /// so a duplicate registration is rejected rather than ignored.
    pub fn register(&mut self, name: &str) -> Result<()> {
        if self.contains(name) {
            return Err(Error::Config(format!("service already registered: {name}")));
        }
        self.services.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.iter().any(|s| s == name)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Ordered main algorithm sequence. Job configuration only ever appends.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlgSequence {
    algorithms: Vec<AlgorithmInstance>,
}

impl AlgSequence {
    /// Append `alg` after any existing entries.
    pub fn append(&mut self, alg: AlgorithmInstance) {
        self.algorithms.push(alg);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmInstance> {
        self.algorithms.iter()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

/// Framework message thresholds, least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum OutputLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Message service properties.
#[derive(Debug, Clone, Serialize)]
pub struct MessageSvc {
    pub output_level: OutputLevel,
}

impl MessageSvc {
    /// Raise the threshold to `level`; an already stricter threshold is kept.
    pub fn suppress_to(&mut self, level: OutputLevel) {
        if level > self.output_level {
            self.output_level = level;
        }
    }
}

impl Default for MessageSvc {
    fn default() -> Self {
        Self { output_level: OutputLevel::Info }
    }
}

/// Pre-event-loop framework state touched by job configuration.
///
/// `Default` reproduces the framework's state before any job options run:
/// empty flags, no selector access mode, the default histogram file cap, no
/// services, an empty algorithm sequence, and `Info` message output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameworkState {
    pub flags: JobFlags,
    pub event_selector: EventSelector,
    pub hist_svc: HistSvc,
    pub services: ServiceRegistry,
    pub alg_sequence: AlgSequence,
    pub message_svc: MessageSvc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hist_output_parses_flag_form() {
        let h = HistOutput::parse("ANALYSIS:bfield_map_2016.outputs.root").unwrap();
        assert_eq!(h.stream, "ANALYSIS");
        assert_eq!(h.file, "bfield_map_2016.outputs.root");
        assert_eq!(h.to_flag(), "ANALYSIS:bfield_map_2016.outputs.root");
    }

    #[test]
    fn hist_output_rejects_malformed_flags() {
        for bad in ["no-colon", ":file.root", "STREAM:", ""] {
            let err = HistOutput::parse(bad).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "expected Config error for {bad:?}");
        }
    }

    #[test]
    fn service_registry_rejects_duplicates() {
        let mut reg = ServiceRegistry::default();
        reg.register(XAOD_EVENT_READER).unwrap();
        assert!(reg.contains(XAOD_EVENT_READER));
        assert_eq!(reg.len(), 1);

        let err = reg.register(XAOD_EVENT_READER).unwrap_err();
        assert!(format!("{err}").contains("already registered"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn suppress_never_lowers_the_threshold() {
        let mut msg = MessageSvc { output_level: OutputLevel::Error };
        msg.suppress_to(OutputLevel::Warning);
        assert_eq!(msg.output_level, OutputLevel::Error);

        let mut msg = MessageSvc::default();
        msg.suppress_to(OutputLevel::Warning);
        assert_eq!(msg.output_level, OutputLevel::Warning);
    }

    #[test]
    fn access_mode_wire_strings() {
        assert_eq!(AccessMode::Class.as_str(), "ClassAccess");
        assert_eq!(serde_json::to_value(AccessMode::Class).unwrap(), "ClassAccess");
        assert_eq!(
            serde_json::from_str::<AccessMode>("\"BranchAccess\"").unwrap(),
            AccessMode::Branch
        );
    }
}
