//! Wrappers around the external OS tools the pipeline delegates to.
//!
//! All actual image work happens in `sips` (scaling) and `iconutil`
//! (`.icns` packaging). Both are invoked with a fixed argument shape and
//! captured output; a non-zero exit surfaces the tool's stderr.

use crate::error::ToolError;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Standard location of the scaling tool on macOS.
pub const SIPS_PATH: &str = "/usr/bin/sips";
/// Standard location of the packaging tool on macOS.
pub const ICONUTIL_PATH: &str = "/usr/bin/iconutil";

/// Paths to the external tools the pipeline invokes.
///
/// `Default` points at the standard macOS locations. Custom paths are
/// injectable, which is how the tests substitute stand-in executables.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub sips: PathBuf,
    pub iconutil: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            sips: PathBuf::from(SIPS_PATH),
            iconutil: PathBuf::from(ICONUTIL_PATH),
        }
    }
}

impl Toolchain {
    /// Scale `source` to a square `pixels` x `pixels` PNG at `dest`.
    ///
    /// Runs `sips -z <pixels> <pixels> <source> --out <dest>`.
    pub fn scale(&self, source: &Path, pixels: u32, dest: &Path) -> Result<(), ToolError> {
        let size = pixels.to_string();
        run_tool(
            "sips",
            &self.sips,
            [
                OsStr::new("-z"),
                size.as_ref(),
                size.as_ref(),
                source.as_os_str(),
                OsStr::new("--out"),
                dest.as_os_str(),
            ],
        )
    }

    /// Package an `.iconset` directory into an `.icns` file at `dest`.
    ///
    /// Runs `iconutil -c icns <iconset_dir> -o <dest>`.
    pub fn pack_icns(&self, iconset_dir: &Path, dest: &Path) -> Result<(), ToolError> {
        run_tool(
            "iconutil",
            &self.iconutil,
            [
                OsStr::new("-c"),
                OsStr::new("icns"),
                iconset_dir.as_os_str(),
                OsStr::new("-o"),
                dest.as_os_str(),
            ],
        )
    }
}

/// Run a tool to completion, capturing output and checking the exit status.
fn run_tool<'a>(
    tool: &'static str,
    program: &Path,
    args: impl IntoIterator<Item = &'a OsStr>,
) -> Result<(), ToolError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ToolError::NotFound {
                tool,
                path: program.to_path_buf(),
            },
            _ => ToolError::Spawn { tool, source: e },
        })?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// Write an executable shell script to stand in for a tool.
    #[cfg(unix)]
    fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn scale_invokes_tool_with_source_and_dest() {
        let dir = tempdir().unwrap();
        // Stand-in sips: args are `-z N N <src> --out <dst>`; copy src to dst.
        let sips = fake_tool(dir.path(), "sips", r#"cp "$4" "$6""#);
        let tools = Toolchain {
            sips,
            iconutil: PathBuf::from(ICONUTIL_PATH),
        };

        let source = dir.path().join("master.png");
        fs::write(&source, b"png bytes").unwrap();
        let dest = dir.path().join("icon_16x16.png");

        tools.scale(&source, 16, &dest).unwrap();
        assert_eq!(fs::read(&dest).unwrap(), b"png bytes");
    }

    #[cfg(unix)]
    #[test]
    fn pack_icns_creates_dest() {
        let dir = tempdir().unwrap();
        // Stand-in iconutil: args are `-c icns <dir> -o <dst>`.
        let iconutil = fake_tool(dir.path(), "iconutil", r#": > "$5""#);
        let tools = Toolchain {
            sips: PathBuf::from(SIPS_PATH),
            iconutil,
        };

        let iconset = dir.path().join("AppIcon.iconset");
        fs::create_dir(&iconset).unwrap();
        let dest = dir.path().join("AppIcon.icns");

        tools.pack_icns(&iconset, &dest).unwrap();
        assert!(dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_reports_exit_code_and_stderr() {
        let dir = tempdir().unwrap();
        let sips = fake_tool(dir.path(), "sips", "echo 'bad image' >&2; exit 3");
        let tools = Toolchain {
            sips,
            iconutil: PathBuf::from(ICONUTIL_PATH),
        };

        let err = tools
            .scale(Path::new("in.png"), 16, Path::new("out.png"))
            .unwrap_err();
        match err {
            ToolError::Failed {
                tool,
                exit_code,
                stderr,
            } => {
                assert_eq!(tool, "sips");
                assert_eq!(exit_code, Some(3));
                assert!(stderr.contains("bad image"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_tool_reports_not_found() {
        let tools = Toolchain {
            sips: PathBuf::from("/nonexistent/sips"),
            iconutil: PathBuf::from(ICONUTIL_PATH),
        };

        let err = tools
            .scale(Path::new("in.png"), 16, Path::new("out.png"))
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound { tool: "sips", .. }));
    }

    #[test]
    fn default_toolchain_points_at_usr_bin() {
        let tools = Toolchain::default();
        assert_eq!(tools.sips, PathBuf::from("/usr/bin/sips"));
        assert_eq!(tools.iconutil, PathBuf::from("/usr/bin/iconutil"));
    }
}
