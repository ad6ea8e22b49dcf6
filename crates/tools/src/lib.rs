//! Agent tools
//!
//! File tools an agent runtime can call by name, all sandboxed to the
//! project root.

#![warn(missing_docs)]

pub mod r#trait;
pub mod args;
pub mod builtin;
pub mod markdown;
pub mod registry;

pub use r#trait::{
    Parameter, Tool, ToolArgs, ToolError, ToolExecutor, ToolOutput, ToolSchema, ToolState,
    WriteOutput,
};
pub use builtin::{FileReaderTool, FileWriterTool};
pub use markdown::{MarkdownWriterConfig, MarkdownWriterTool, DEFAULT_OUTPUT_DIR};
pub use registry::ToolRegistry;
