//! Core conversion pipeline for iconify.
//!
//! Turns a single source image into a multi-resolution macOS `.icns` file by
//! shelling out to the OS tools that own the actual work: `sips` for scaling
//! and `iconutil` for packaging. This crate contains no image processing of
//! its own; it knows the iconset layout, runs the tools in a fixed order, and
//! reports progress to the caller.

pub mod error;
pub mod iconset;
pub mod pipeline;
pub mod tools;

// Re-export public items
pub use error::{PipelineError, ToolError};
pub use iconset::{COPY_ENTRY, ENTRY_COUNT, ICONSET_DIR_NAME, IconsetEntry, SCALED_ENTRIES};
pub use pipeline::{IconPipeline, PHASE_COUNT, Phase, ProgressEvent};
pub use tools::Toolchain;
