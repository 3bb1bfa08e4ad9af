#[cfg(test)]
mod tests;

use crate::sandbox::Sandbox;
use crate::tools::{
    ListFilesTool, ReadFileTool, RunScriptTool, ToolRegistry, WriteFileTool,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "agentbox", version)]
#[command(about = "Sandboxed filesystem and script toolset for agent loops")]
pub struct Cli {
    /// Working directory that confines every tool operation
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List files with sizes, recursively
    Ls {
        /// Directory to list, relative to the workspace (defaults to the workspace itself)
        directory: Option<String>,
    },
    /// Print a file's contents
    Cat {
        /// File to read, relative to the workspace
        file_path: String,
    },
    /// Create or overwrite a file
    Write {
        /// File to write, relative to the workspace
        file_path: String,
        /// Content to write
        content: String,
    },
    /// Execute a Python script inside the workspace
    Run {
        /// Script to run, relative to the workspace
        file_path: String,
    },
    /// Print the registered tool definitions as JSON
    Tools,
}

/// Build the standard four-tool registry for one working directory.
/// Each tool clones the sandbox; calls stay independent of each other.
pub fn build_registry(sandbox: &Sandbox) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(ListFilesTool::new(sandbox.clone())));
    registry.register(Arc::new(ReadFileTool::new(sandbox.clone())));
    registry.register(Arc::new(WriteFileTool::new(sandbox.clone())));
    registry.register(Arc::new(RunScriptTool::new(sandbox.clone())));
    registry
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let sandbox = Sandbox::new(&cli.workspace)?;
    let registry = build_registry(&sandbox);

    let (name, params) = match cli.command {
        Commands::Ls { directory } => (
            "list_files",
            match directory {
                Some(d) => json!({"directory": d}),
                None => json!({}),
            },
        ),
        Commands::Cat { file_path } => ("read_file", json!({"file_path": file_path})),
        Commands::Write { file_path, content } => (
            "write_file",
            json!({"file_path": file_path, "content": content}),
        ),
        Commands::Run { file_path } => ("run_script", json!({"file_path": file_path})),
        Commands::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
            return Ok(());
        }
    };

    let result = registry.execute(name, params).await?;
    if result.is_error {
        anyhow::bail!("{}", result.content);
    }
    println!("{}", result.content);
    Ok(())
}
