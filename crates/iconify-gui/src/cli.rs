use iconify_core::{IconPipeline, ProgressEvent};
use std::path::{Path, PathBuf};

/// Run a conversion in headless (CLI) mode
pub fn run_headless(input: &Path, out: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Iconify - Headless Mode");
    println!("=======================");

    let mut pipeline = IconPipeline::new(input)?;
    if let Some(out) = out {
        pipeline = pipeline.with_output(out);
    }

    println!("\nSource: {}", input.display());
    println!("Output: {}", pipeline.output().display());

    let result = pipeline.run(|event| match event {
        ProgressEvent::PhaseStarted { phase } => {
            println!("\n{}...", phase);
        }
        ProgressEvent::Entry { file, index, total } => {
            println!("  [{}/{}] {}", index + 1, total, file);
        }
        ProgressEvent::Done { output } => {
            println!("\nWrote {}", output.display());
        }
        ProgressEvent::Error { .. } => {
            // Error details will be printed by the result handler below
        }
    });

    match result {
        Ok(_) => {
            println!("Icon created successfully!");
            Ok(())
        }
        Err(e) => {
            eprintln!("\nError: {}", e);
            std::process::exit(1);
        }
    }
}
