//! Built-in file tools (reader, writer).

use super::{args, r#trait::*};
use async_trait::async_trait;
use codegen_fs::{AccessError, AccessRequest, SafeFileAccessor};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, error};

/// Run a blocking file operation off the async runtime.
pub(crate) async fn run_blocking<T, F>(path: &str, f: F) -> Result<T, AccessError>
where
    F: FnOnce() -> Result<T, AccessError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => {
            error!("File operation on {} did not complete: {}", path, e);
            Err(AccessError::UnknownIo {
                path: PathBuf::from(path),
                reason: e.to_string(),
            })
        }
    }
}

/// Reads a file, or a line range of it, inside the project root.
pub struct FileReaderTool {
    accessor: SafeFileAccessor,
}

impl FileReaderTool {
    /// Create a reader over `accessor`.
    pub fn new(accessor: SafeFileAccessor) -> Self {
        Self { accessor }
    }
}

#[async_trait]
impl Tool for FileReaderTool {
    fn name(&self) -> &str {
        "file_reader"
    }

    fn description(&self) -> &str {
        "Read the contents of a file, optionally limited to a line range"
    }

    async fn execute(&self, args: &ToolArgs, _state: &mut ToolState) -> Result<ToolOutput, ToolError> {
        debug!("Starting file reader tool");

        let file_path = args::required_str(args, "file_path")?.to_string();
        let request = AccessRequest::new(file_path.clone()).lines(
            args::line_number(args, "start_line")?,
            args::line_number(args, "end_line")?,
        );

        let accessor = self.accessor.clone();
        let result = run_blocking(&file_path, move || accessor.read(&request)).await?;

        Ok(ToolOutput::Read(result))
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: vec![
                Parameter::required(
                    "file_path",
                    "string",
                    "Path to the file, relative to the project root",
                ),
                Parameter::optional(
                    "start_line",
                    "integer",
                    "First line to read (1-based)",
                    Some(json!(1)),
                ),
                Parameter::optional(
                    "end_line",
                    "integer",
                    "Last line to read (inclusive); reads to end of file when omitted",
                    None,
                ),
            ],
        }
    }
}

/// Writes or appends to a file inside the project root.
pub struct FileWriterTool {
    accessor: SafeFileAccessor,
}

impl FileWriterTool {
    /// Create a writer over `accessor`.
    pub fn new(accessor: SafeFileAccessor) -> Self {
        Self { accessor }
    }
}

#[async_trait]
impl Tool for FileWriterTool {
    fn name(&self) -> &str {
        "file_writer"
    }

    fn description(&self) -> &str {
        "Write content to a file, creating parent directories as needed"
    }

    async fn execute(&self, args: &ToolArgs, _state: &mut ToolState) -> Result<ToolOutput, ToolError> {
        debug!("Starting file writer tool");

        let file_path = args::required_str(args, "file_path")?.to_string();
        let content = args::content(args, "content").ok_or_else(|| AccessError::missing("content"))?;
        args::check_encoding(args, "encoding")?;

        let mut request = AccessRequest::new(file_path.clone()).content(content);
        request.mode = args::write_mode(args, "mode")?;
        request.create_parent_dirs = args::flag(args, "create_dirs")?;

        let accessor = self.accessor.clone();
        let result = run_blocking(&file_path, move || accessor.write(&request)).await?;

        Ok(ToolOutput::Write(WriteOutput {
            status: "success".to_string(),
            file_path: result.resolved_path,
            bytes_written: result.bytes_written,
            message: "File written successfully".to_string(),
        }))
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: vec![
                Parameter::required(
                    "file_path",
                    "string",
                    "Path to write, relative to the project root",
                ),
                Parameter::required("content", "string", "Content to write"),
                Parameter::optional(
                    "mode",
                    "string",
                    "'overwrite' (or 'w') to replace, 'append' (or 'a') to add to the end",
                    Some(json!("overwrite")),
                ),
                Parameter::optional("encoding", "string", "File encoding", Some(json!("utf-8"))),
                Parameter::optional(
                    "create_dirs",
                    "boolean",
                    "Create missing parent directories",
                    Some(json!(true)),
                ),
            ],
        }
    }
}
