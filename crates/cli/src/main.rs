//! CodeGen tools CLI - run the sandboxed file tools from a shell.

mod agent_card;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codegen_fs::AccessorConfig;
use codegen_tools::{MarkdownWriterConfig, ToolExecutor, ToolRegistry, ToolState};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::agent_card::AgentCard;

#[derive(Parser)]
#[command(name = "codegen-tools")]
#[command(about = "Sandboxed file tools for agent workflows", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to $PROJECT_ROOT, then the current directory)
    #[arg(long, global = true)]
    project_root: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a file, optionally a line range
    Read {
        /// File path
        path: String,
        /// First line (1-based)
        #[arg(long)]
        start_line: Option<usize>,
        /// Last line (inclusive)
        #[arg(long)]
        end_line: Option<usize>,
    },
    /// Write content to a file
    Write {
        /// File path
        path: String,
        /// Content to write
        content: String,
        /// Append instead of overwriting
        #[arg(long)]
        append: bool,
        /// Fail if the parent directory is missing
        #[arg(long)]
        no_create_dirs: bool,
    },
    /// Write a markdown document
    Markdown {
        /// Document name
        file_name: String,
        /// Markdown content
        content: String,
        /// Append to an existing document
        #[arg(long)]
        append: bool,
        /// Output directory, relative to the project root
        #[arg(long, default_value = codegen_tools::DEFAULT_OUTPUT_DIR)]
        output_dir: std::path::PathBuf,
    },
    /// Call a tool with JSON arguments
    Call {
        /// Tool name
        tool: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
    /// List available tools
    ListTools,
    /// Print the agent card
    AgentCard {
        /// Host advertised in the card URL
        #[arg(long, default_value = "localhost")]
        host: String,
        /// Port advertised in the card URL
        #[arg(long, default_value = "9999")]
        port: u16,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // stdout carries tool output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.project_root {
        Some(root) => AccessorConfig::new(root),
        None => AccessorConfig::from_env().context("Failed to determine project root")?,
    };
    debug!("Project root: {}", config.project_root.display());

    let markdown = match &cli.command {
        Commands::Markdown { output_dir, .. } => MarkdownWriterConfig {
            output_dir: output_dir.clone(),
        },
        _ => MarkdownWriterConfig::default(),
    };
    let registry = ToolRegistry::with_builtin_tools(config, markdown);

    let (tool, args) = match cli.command {
        Commands::Read { path, start_line, end_line } => (
            "file_reader",
            json!({"file_path": path, "start_line": start_line, "end_line": end_line}),
        ),
        Commands::Write { path, content, append, no_create_dirs } => (
            "file_writer",
            json!({
                "file_path": path,
                "content": content,
                "mode": if append { "append" } else { "overwrite" },
                "create_dirs": !no_create_dirs,
            }),
        ),
        Commands::Markdown { file_name, content, append, .. } => (
            "markdown_writer",
            json!({"file_name": file_name, "content": content, "append": append}),
        ),
        Commands::Call { tool, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("Arguments must be a JSON object")?;
            return call(&registry, &tool, args).await;
        }
        Commands::ListTools => {
            let tools: Vec<_> = registry
                .schemas()
                .into_iter()
                .map(|s| {
                    json!({
                        "name": &s.name,
                        "description": &s.description,
                        "input_schema": s.input_schema(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&tools)?);
            return Ok(());
        }
        Commands::AgentCard { host, port } => {
            let card = AgentCard::for_tools(&host, port, &registry.schemas());
            println!("{}", serde_json::to_string_pretty(&card)?);
            return Ok(());
        }
    };

    call(&registry, tool, args).await
}

async fn call(registry: &ToolRegistry, tool: &str, args: serde_json::Value) -> Result<()> {
    let serde_json::Value::Object(args) = args else {
        anyhow::bail!("Arguments must be a JSON object");
    };
    let mut state = ToolState::new();

    info!("Running {}", tool);
    let output = registry.execute_tool(tool, &args, &mut state).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
