//! Tool abstraction.

use async_trait::async_trait;
use codegen_fs::{AccessError, ErrorKind, ReadResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Arguments passed to a tool call.
pub type ToolArgs = serde_json::Map<String, serde_json::Value>;

/// State carried between tool calls by the caller. Tools may ignore it.
pub type ToolState = serde_json::Map<String, serde_json::Value>;

/// A tool that can be executed.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get tool name.
    fn name(&self) -> &str;

    /// Get tool description.
    fn description(&self) -> &str;

    /// Execute the tool.
    async fn execute(&self, args: &ToolArgs, state: &mut ToolState) -> Result<ToolOutput, ToolError>;

    /// Get tool schema (for AI discovery).
    fn schema(&self) -> ToolSchema;
}

/// Tool executor - runs tools by name.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name.
    async fn execute_tool(
        &self,
        tool: &str,
        args: &ToolArgs,
        state: &mut ToolState,
    ) -> Result<ToolOutput, ToolError>;
}

/// Error from a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// File access failed
    #[error(transparent)]
    Access(#[from] AccessError),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Access error classification, if this is an access error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Access(e) => Some(e.kind()),
            Self::UnknownTool(_) => None,
        }
    }

    /// Render as the `Error: ...` string agent runtimes expect.
    pub fn agent_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Structured result of a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolOutput {
    /// File content
    Read(ReadResult),

    /// Write confirmation
    Write(WriteOutput),

    /// Free-form confirmation
    Message {
        /// Message text
        message: String,
    },
}

/// Write confirmation returned by `file_writer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutput {
    /// Always `success`
    pub status: String,
    /// Path that was written
    pub file_path: PathBuf,
    /// UTF-8 bytes written
    pub bytes_written: usize,
    /// Human-readable summary
    pub message: String,
}

/// Tool schema for AI discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,

    /// Description
    pub description: String,

    /// Parameters
    pub parameters: Vec<Parameter>,
}

impl ToolSchema {
    /// JSON Schema object describing the parameters.
    pub fn input_schema(&self) -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = self
            .parameters
            .iter()
            .map(|p| {
                let mut prop = serde_json::json!({
                    "type": p.param_type,
                    "description": p.description,
                });
                if let Some(default) = &p.default {
                    prop["default"] = default.clone();
                }
                (p.name.clone(), prop)
            })
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A tool parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Description
    pub description: String,

    /// Type
    pub param_type: String,

    /// Required
    pub required: bool,

    /// Default value
    pub default: Option<serde_json::Value>,
}

impl Parameter {
    /// Required parameter.
    pub fn required(name: &str, param_type: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type: param_type.to_string(),
            required: true,
            default: None,
        }
    }

    /// Optional parameter with an optional default.
    pub fn optional(
        name: &str,
        param_type: &str,
        description: &str,
        default: Option<serde_json::Value>,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            param_type: param_type.to_string(),
            required: false,
            default,
        }
    }
}
