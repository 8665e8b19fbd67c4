//! # iconify
//!
//! Single-window utility that turns one image into a macOS `.icns` icon
//! bundle. Drop an image onto the window (or pick one with the file dialog)
//! and the app runs the fixed sips/iconutil pipeline from `iconify-core`.
//!
//! ## Modes
//!
//! - **GUI mode** (default): `iconify` - graphical interface
//! - **Headless convert**: `iconify headless <image>` - CLI-only for scripting

mod cli;
mod gui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "iconify")]
#[command(about = "Turn a 1024px image into a macOS .icns icon")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image in headless (CLI) mode instead of the GUI
    Headless {
        /// Source image, treated as the 1024px master
        input: PathBuf,

        /// Path for the .icns file (defaults to next to the input)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.command {
        Some(Command::Headless { input, out }) => cli::run_headless(&input, out),
        None => gui::run().map_err(|e| e.into()),
    }
}
