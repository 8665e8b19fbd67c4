//! The fixed conversion sequence: temp dir, nine scales, one copy, one
//! packaging run, cleanup.

use crate::error::PipelineError;
use crate::iconset::{self, COPY_ENTRY, ENTRY_COUNT, ICONSET_DIR_NAME, SCALED_ENTRIES};
use crate::tools::Toolchain;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Processing phases, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Preparing,
    Scaling,
    Packaging,
}

/// Number of phases, used by callers to turn phase progress into a fraction.
pub const PHASE_COUNT: usize = 3;

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Preparing => write!(f, "Preparing"),
            Phase::Scaling => write!(f, "Scaling"),
            Phase::Packaging => write!(f, "Packaging"),
        }
    }
}

/// Progress event emitted during conversion.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A processing phase has started
    PhaseStarted { phase: Phase },
    /// One iconset slot has been written
    Entry {
        file: String,
        index: usize,
        total: usize,
    },
    /// Conversion completed successfully
    Done { output: PathBuf },
    /// An error occurred
    Error {
        message: String,
        details: Option<String>,
    },
}

/// Converts one source image into an `.icns` file.
///
/// The source is treated as the 1024px master: nine scaled-down copies are
/// produced by `sips`, the source itself is copied into the 1024px slot, and
/// `iconutil` packages the resulting iconset. All work happens in a
/// temporary directory that is removed afterward.
pub struct IconPipeline {
    source: PathBuf,
    output: PathBuf,
    tools: Toolchain,
}

impl IconPipeline {
    /// Create a pipeline for `source`, writing the `.icns` next to it.
    pub fn new(source: &Path) -> Result<Self, PipelineError> {
        if !source.exists() {
            return Err(PipelineError::SourceNotFound(source.to_path_buf()));
        }
        if !source.is_file() {
            return Err(PipelineError::SourceNotAFile(source.to_path_buf()));
        }

        Ok(IconPipeline {
            source: source.to_path_buf(),
            output: iconset::icns_output_path(source),
            tools: Toolchain::default(),
        })
    }

    /// Override the output path.
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    /// Override the tool locations.
    pub fn with_toolchain(mut self, tools: Toolchain) -> Self {
        self.tools = tools;
        self
    }

    /// Where the `.icns` will be written.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the conversion with a progress callback.
    ///
    /// The callback is invoked for each progress event. The first failing
    /// step aborts the pipeline; its error is emitted as an `Error` event
    /// and returned. The temporary working directory is removed on both
    /// the success and the error path.
    pub fn run<F>(&self, mut on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(ProgressEvent),
    {
        let result = self.run_inner(&mut on_progress);
        match &result {
            Ok(output) => on_progress(ProgressEvent::Done {
                output: output.clone(),
            }),
            Err(e) => on_progress(ProgressEvent::Error {
                message: "Conversion failed".to_string(),
                details: Some(e.to_string()),
            }),
        }
        result
    }

    fn run_inner<F>(&self, on_progress: &mut F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(ProgressEvent),
    {
        // Preparing phase: temp working dir with the iconset inside.
        on_progress(ProgressEvent::PhaseStarted {
            phase: Phase::Preparing,
        });
        let work_dir = tempfile::tempdir().map_err(PipelineError::WorkDir)?;
        let iconset_dir = work_dir.path().join(ICONSET_DIR_NAME);
        fs::create_dir(&iconset_dir).map_err(PipelineError::IconsetDirCreation)?;

        // Scaling phase: nine sips runs, then the 1024px copy.
        on_progress(ProgressEvent::PhaseStarted {
            phase: Phase::Scaling,
        });
        for (index, entry) in SCALED_ENTRIES.iter().enumerate() {
            let dest = iconset_dir.join(entry.file_name);
            self.tools.scale(&self.source, entry.pixels, &dest)?;
            on_progress(ProgressEvent::Entry {
                file: entry.file_name.to_string(),
                index,
                total: ENTRY_COUNT,
            });
        }

        let copy_dest = iconset_dir.join(COPY_ENTRY.file_name);
        fs::copy(&self.source, &copy_dest).map_err(|e| PipelineError::CopyFailed {
            from: self.source.clone(),
            to: copy_dest.clone(),
            source: e,
        })?;
        on_progress(ProgressEvent::Entry {
            file: COPY_ENTRY.file_name.to_string(),
            index: ENTRY_COUNT - 1,
            total: ENTRY_COUNT,
        });

        // Packaging phase: iconutil writes the .icns directly to the output.
        on_progress(ProgressEvent::PhaseStarted {
            phase: Phase::Packaging,
        });
        self.tools.pack_icns(&iconset_dir, &self.output)?;

        if !self.output.exists() {
            return Err(PipelineError::OutputMissing(self.output.clone()));
        }

        work_dir.close().map_err(PipelineError::CleanupFailed)?;

        Ok(self.output.clone())
    }
}
