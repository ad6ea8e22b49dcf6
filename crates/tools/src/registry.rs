//! Name-based tool dispatch.

use super::{
    FileReaderTool, FileWriterTool, MarkdownWriterConfig, MarkdownWriterTool, Tool, ToolArgs,
    ToolError, ToolExecutor, ToolOutput, ToolSchema, ToolState,
};
use async_trait::async_trait;
use codegen_fs::{AccessorConfig, SafeFileAccessor};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Holds registered tools and runs them by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with the given tools.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let tools = tools
            .into_iter()
            .map(|t| (t.name().to_string(), t))
            .collect();

        Self { tools }
    }

    /// Create a registry with the file reader, file writer and markdown writer.
    pub fn with_builtin_tools(config: AccessorConfig, markdown: MarkdownWriterConfig) -> Self {
        let accessor = SafeFileAccessor::new(config);
        Self::new(vec![
            Arc::new(FileReaderTool::new(accessor.clone())),
            Arc::new(FileWriterTool::new(accessor.clone())),
            Arc::new(MarkdownWriterTool::with_config(accessor, markdown)),
        ])
    }

    /// Look up a tool.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Schemas of all registered tools, sorted by name.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute_tool(
        &self,
        tool: &str,
        args: &ToolArgs,
        state: &mut ToolState,
    ) -> Result<ToolOutput, ToolError> {
        let Some(handler) = self.tools.get(tool) else {
            warn!("Unknown tool requested: {}", tool);
            return Err(ToolError::UnknownTool(tool.to_string()));
        };

        debug!("Executing tool: {}", tool);
        handler.execute(args, state).await
    }
}
