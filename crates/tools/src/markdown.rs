//! Markdown document writer.

use super::{args, builtin::run_blocking, r#trait::*};
use async_trait::async_trait;
use codegen_fs::{AccessError, AccessRequest, SafeFileAccessor, WriteMode};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_docs";

/// Markdown writer configuration.
#[derive(Debug, Clone)]
pub struct MarkdownWriterConfig {
    /// Output directory, relative to the project root
    pub output_dir: PathBuf,
}

impl Default for MarkdownWriterConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.into(),
        }
    }
}

/// Writes markdown documents into the output directory.
///
/// New documents get a title and timestamp header; appends to an existing
/// document do not.
pub struct MarkdownWriterTool {
    accessor: SafeFileAccessor,
    config: MarkdownWriterConfig,
}

impl MarkdownWriterTool {
    /// Create a writer with the default output directory.
    pub fn new(accessor: SafeFileAccessor) -> Self {
        Self::with_config(accessor, MarkdownWriterConfig::default())
    }

    /// Create a writer with a custom config.
    pub fn with_config(accessor: SafeFileAccessor, config: MarkdownWriterConfig) -> Self {
        Self { accessor, config }
    }
}

#[async_trait]
impl Tool for MarkdownWriterTool {
    fn name(&self) -> &str {
        "markdown_writer"
    }

    fn description(&self) -> &str {
        "Write markdown content to a document in the output directory"
    }

    async fn execute(&self, args: &ToolArgs, _state: &mut ToolState) -> Result<ToolOutput, ToolError> {
        let file_name = args::required_str(args, "file_name")?;
        let content = args::content(args, "content")
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AccessError::missing("content"))?;
        let append = args::flag(args, "append")?.unwrap_or(false);

        let file_name = if file_name.ends_with(".md") {
            file_name.to_string()
        } else {
            format!("{}.md", file_name)
        };
        let target = self.config.output_dir.join(&file_name).to_string_lossy().into_owned();

        let accessor = self.accessor.clone();
        let path = target.clone();
        let result = run_blocking(&target, move || {
            let resolved = accessor.resolve(&path)?;
            let is_new = !matches!(resolved.try_exists(), Ok(true));

            let mut document = String::new();
            if !append || is_new {
                document.push_str(&header(&file_name));
            }
            document.push_str(&content);
            document.push_str("\n\n");

            let mode = if append { WriteMode::Append } else { WriteMode::Overwrite };
            accessor.write(&AccessRequest::new(path).content(document).mode(mode))
        })
        .await?;

        info!("Wrote markdown document {}", result.resolved_path.display());
        Ok(ToolOutput::Message {
            message: format!(
                "Successfully wrote content to {}",
                result.resolved_path.display()
            ),
        })
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: vec![
                Parameter::required(
                    "file_name",
                    "string",
                    "Document name; '.md' is added when missing",
                ),
                Parameter::required("content", "string", "Markdown content to write"),
                Parameter::optional(
                    "append",
                    "boolean",
                    "Append to an existing document instead of replacing it",
                    Some(json!(false)),
                ),
            ],
        }
    }
}

fn header(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "# {}\n\n*Generated on: {}*\n\n---\n\n",
        title_case(&stem.replace('_', " ")),
        timestamp
    )
}

/// Uppercase the first letter of every word, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}
