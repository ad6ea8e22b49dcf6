//! Request and result types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::AccessError;

/// How a write treats existing content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Truncate and replace
    #[default]
    Overwrite,
    /// Add to the end
    Append,
}

impl FromStr for WriteMode {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" | "w" => Ok(Self::Overwrite),
            "append" | "a" => Ok(Self::Append),
            other => Err(AccessError::invalid(
                "mode",
                format!("expected 'overwrite' or 'append', got '{}'", other),
            )),
        }
    }
}

/// Which operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Bounded read
    Read,
    /// Write or append
    Write,
}

/// Arguments for a single access. Fields not used by the operation are ignored.
#[derive(Debug, Clone, Default)]
pub struct AccessRequest {
    /// Path to access, relative to the project root or absolute
    pub target_path: Option<String>,
    /// First line to read (1-based)
    pub start_line: Option<usize>,
    /// Last line to read (inclusive)
    pub end_line: Option<usize>,
    /// Content to write
    pub content: Option<String>,
    /// Write mode
    pub mode: Option<WriteMode>,
    /// Create missing parent directories before writing
    pub create_parent_dirs: Option<bool>,
}

impl AccessRequest {
    /// Request targeting `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            target_path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the line range.
    pub fn lines(mut self, start: Option<usize>, end: Option<usize>) -> Self {
        self.start_line = start;
        self.end_line = end;
        self
    }

    /// Set the content to write.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the write mode.
    pub fn mode(mut self, mode: WriteMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set whether parent directories are created.
    pub fn create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = Some(create);
        self
    }
}

/// Outcome of a read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResult {
    /// Selected lines, terminators preserved
    pub content: String,
    /// Line count of the whole file
    pub total_lines: usize,
    /// Explicit end line cut the file short
    pub truncated: bool,
}

/// Outcome of a write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    /// Absolute path that was written
    pub resolved_path: PathBuf,
    /// UTF-8 bytes written
    pub bytes_written: usize,
}

/// Outcome of [`crate::SafeFileAccessor::execute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessOutcome {
    /// Read completed
    Read(ReadResult),
    /// Write completed
    Write(WriteResult),
}
