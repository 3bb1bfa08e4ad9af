use crate::sandbox::Sandbox;
use crate::tools::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::Value;

/// Maximum file size that `read_file` will load (10 MB).
const MAX_READ_BYTES: u64 = 10 * 1024 * 1024;

pub struct ReadFileTool {
    sandbox: Sandbox,
}

impl ReadFileTool {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Reads and returns the content of a file within the working directory."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the file to read, relative to the working directory."
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, params: Value) -> anyhow::Result<ToolResult> {
        let file_path = params["file_path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing 'file_path' parameter"))?;

        let resolved = match self.sandbox.resolve(file_path) {
            Ok(p) => p,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        match tokio::fs::metadata(&resolved).await {
            Err(_) => {
                return Ok(ToolResult::error(format!(
                    "file \"{}\" not found",
                    file_path
                )));
            }
            Ok(meta) if meta.is_dir() => {
                return Ok(ToolResult::error(format!(
                    "not a file (path is a directory): \"{}\"",
                    file_path
                )));
            }
            Ok(meta) if meta.len() > MAX_READ_BYTES => {
                return Ok(ToolResult::error(format!(
                    "file \"{}\" too large ({} bytes, max {})",
                    file_path,
                    meta.len(),
                    MAX_READ_BYTES
                )));
            }
            _ => {}
        }

        match tokio::fs::read_to_string(&resolved).await {
            Ok(content) => Ok(ToolResult::new(content)),
            Err(e) => Ok(ToolResult::error(format!(
                "error reading \"{}\": {}",
                file_path, e
            ))),
        }
    }
}
