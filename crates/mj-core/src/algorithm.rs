//! Algorithm construction.
//!
//! Algorithms are opaque framework objects; the job only picks one by its
//! registered type name, carries its property assignments, and appends the
//! configured instance to the main execution sequence.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Dimuon selection with combined/standalone track comparison branches.
pub const MUON_SELECTION: &str = "MuonSelection";
/// Plain muon xAOD analysis over the same input streams.
pub const MUON_AOD_ANALYSIS: &str = "MuonAODAnalysis";

/// A configured algorithm instance, ready to append to a sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmInstance {
    /// Registered factory type name, e.g. `"MuonSelection"`.
    pub type_name: String,
    /// Instance name; defaults to the type name.
    pub name: String,
    /// Property assignments forwarded to the framework at initialize time.
    pub properties: BTreeMap<String, Value>,
}

/// Registry of algorithm factories keyed by type name.
///
/// Which algorithm a job runs is a configuration value looked up here, so an
/// unknown name fails the configuration pass instead of the event loop.
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    known: Vec<String>,
}

impl Default for AlgorithmRegistry {
    /// Registry seeded with the algorithms this analysis package ships.
    fn default() -> Self {
        Self { known: vec![MUON_SELECTION.to_string(), MUON_AOD_ANALYSIS.to_string()] }
    }
}

impl AlgorithmRegistry {
    /// Empty registry, for callers wiring up their own algorithm set.
    pub fn empty() -> Self {
        Self { known: Vec::new() }
    }

    /// Register an additional algorithm type name. Re-registration is a no-op.
    pub fn register(&mut self, type_name: impl Into<String>) {
        let type_name = type_name.into();
        if !self.known.contains(&type_name) {
            self.known.push(type_name);
        }
    }

    /// Construct a configured instance of a registered algorithm type.
    pub fn create(
        &self,
        type_name: &str,
        name: Option<&str>,
        properties: BTreeMap<String, Value>,
    ) -> Result<AlgorithmInstance> {
        if !self.known.iter().any(|k| k == type_name) {
            return Err(Error::Config(format!(
                "unknown algorithm type {:?} (registered: {})",
                type_name,
                self.known.join(", ")
            )));
        }
        Ok(AlgorithmInstance {
            type_name: type_name.to_string(),
            name: name.unwrap_or(type_name).to_string(),
            properties,
        })
    }
}
