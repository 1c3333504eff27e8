//! Artifact writing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use vforge_templates::TextEncoding;

use crate::error::{CodegenError, CodegenResult};

/// Outcome of one write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The path was already written in this run; first declaration wins.
    DuplicateSkipped,
}

/// Writes generated artifacts for one generation run.
///
/// Text is encoded, written to a `.tmp` sibling and renamed into place, so a
/// crashed run never leaves a partial artifact. Within a run each output
/// path is written at most once.
#[derive(Debug, Default)]
pub struct ArtifactWriter {
    written: HashSet<PathBuf>,
}

impl ArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one artifact.
    pub fn write(
        &mut self,
        path: &Path,
        text: &str,
        encoding: TextEncoding,
    ) -> CodegenResult<WriteOutcome> {
        if self.written.contains(path) {
            warn!("Output path written twice in one run, skipping: {:?}", path);
            return Ok(WriteOutcome::DuplicateSkipped);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file_name = path
            .file_name()
            .ok_or_else(|| CodegenError::InvalidOutputPath(path.to_path_buf()))?;
        let tmp = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

        fs::write(&tmp, encode(text, encoding))?;
        fs::rename(&tmp, path)?;

        debug!("Wrote {:?} ({})", path, encoding.as_str());
        self.written.insert(path.to_path_buf());
        Ok(WriteOutcome::Written)
    }

    /// Paths written so far, in no particular order.
    pub fn written(&self) -> &HashSet<PathBuf> {
        &self.written
    }
}

fn encode(text: &str, encoding: TextEncoding) -> Vec<u8> {
    let (bytes, had_errors) = match encoding {
        TextEncoding::Utf8 => return text.as_bytes().to_vec(),
        TextEncoding::ShiftJis => {
            let (bytes, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
            (bytes, had_errors)
        }
        TextEncoding::Windows1252 => {
            let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(text);
            (bytes, had_errors)
        }
    };
    if had_errors {
        warn!(
            "Some characters were not representable in {} and were replaced",
            encoding.as_str()
        );
    }
    bytes.into_owned()
}
