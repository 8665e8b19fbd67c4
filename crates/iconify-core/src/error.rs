use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error from invoking an external tool.
#[derive(Debug)]
pub enum ToolError {
    /// The tool binary does not exist at the expected path.
    NotFound { tool: &'static str, path: PathBuf },
    /// The tool could not be started.
    Spawn { tool: &'static str, source: io::Error },
    /// The tool ran but exited unsuccessfully.
    Failed {
        tool: &'static str,
        exit_code: Option<i32>,
        stderr: String,
    },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::NotFound { tool, path } => {
                write!(f, "{} not found at {}", tool, path.display())
            }
            ToolError::Spawn { tool, source } => {
                write!(f, "failed to start {}: {}", tool, source)
            }
            ToolError::Failed {
                tool,
                exit_code,
                stderr,
            } => match exit_code {
                Some(code) => {
                    write!(f, "{} failed (exit code {}): {}", tool, code, stderr.trim())
                }
                None => write!(f, "{} terminated by signal: {}", tool, stderr.trim()),
            },
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error type for the conversion pipeline.
#[derive(Debug)]
pub enum PipelineError {
    /// Source image does not exist
    SourceNotFound(PathBuf),
    /// Source path exists but is not a regular file
    SourceNotAFile(PathBuf),
    /// Failed to create the temporary working directory
    WorkDir(io::Error),
    /// Failed to create the iconset directory inside the working directory
    IconsetDirCreation(io::Error),
    /// An external tool invocation failed
    Tool(ToolError),
    /// Copying the source into the 1024px slot failed
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    /// iconutil reported success but the output file is missing
    OutputMissing(PathBuf),
    /// Failed to remove the temporary working directory
    CleanupFailed(io::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::SourceNotFound(path) => {
                write!(f, "source image not found: {}", path.display())
            }
            PipelineError::SourceNotAFile(path) => {
                write!(f, "source is not a file: {}", path.display())
            }
            PipelineError::WorkDir(e) => {
                write!(f, "failed to create working directory: {}", e)
            }
            PipelineError::IconsetDirCreation(e) => {
                write!(f, "failed to create iconset directory: {}", e)
            }
            PipelineError::Tool(e) => write!(f, "{}", e),
            PipelineError::CopyFailed { from, to, source } => {
                write!(
                    f,
                    "failed to copy {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            PipelineError::OutputMissing(path) => {
                write!(
                    f,
                    "iconutil succeeded but produced no file at {}",
                    path.display()
                )
            }
            PipelineError::CleanupFailed(e) => {
                write!(f, "failed to clean up working directory: {}", e)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::WorkDir(e) => Some(e),
            PipelineError::IconsetDirCreation(e) => Some(e),
            PipelineError::Tool(e) => Some(e),
            PipelineError::CopyFailed { source, .. } => Some(source),
            PipelineError::CleanupFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ToolError> for PipelineError {
    fn from(e: ToolError) -> Self {
        PipelineError::Tool(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failure_message_includes_exit_code_and_stderr() {
        let err = ToolError::Failed {
            tool: "sips",
            exit_code: Some(1),
            stderr: "Error: cannot open file\n".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sips"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("cannot open file"));
    }

    #[test]
    fn tool_failure_without_code_mentions_signal() {
        let err = ToolError::Failed {
            tool: "iconutil",
            exit_code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn pipeline_error_exposes_tool_error_as_source() {
        use std::error::Error;
        let err = PipelineError::from(ToolError::NotFound {
            tool: "sips",
            path: PathBuf::from("/usr/bin/sips"),
        });
        assert!(err.source().is_some());
    }
}
