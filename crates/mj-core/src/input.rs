//! Input-mode selection and local file-list reading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// How the job locates its input files.
///
/// The two modes are mutually exclusive: grid reading registers an event
/// service and sets an integer selector code, local-list reading fills the
/// files-input flag from a text file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InputMode {
    /// Read a grid dataset through the xAOD event-reading service.
    Grid,
    /// Read a newline-delimited list of file paths from a local text file.
    LocalList {
        /// List file, one input path per line.
        list_path: PathBuf,
    },
}

/// Read an input file list: one path per non-empty line, in file order.
///
/// Trailing `\n` / `\r\n` terminators are trimmed; a final line without a
/// terminator is kept intact. No deduplication, and no check that the listed
/// paths exist.
pub fn read_file_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().filter(|l| !l.is_empty()).map(str::to_string).collect())
}
