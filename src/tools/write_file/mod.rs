use crate::sandbox::Sandbox;
use crate::tools::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::Value;

pub struct WriteFileTool {
    sandbox: Sandbox,
}

impl WriteFileTool {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Creates or overwrites a file with the specified content within the working directory."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path where to write the file, relative to the working directory."
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file."
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(&self, params: Value) -> anyhow::Result<ToolResult> {
        let file_path = params["file_path"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing 'file_path' parameter"))?;
        let content = params["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing 'content' parameter"))?;

        let resolved = match self.sandbox.resolve(file_path) {
            Ok(p) => p,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        // Parent creation stays inside the sandbox: `resolved` is already
        // confined, so every ancestor below the root is too.
        if let Some(parent) = resolved.parent()
            && let Err(e) = tokio::fs::create_dir_all(parent).await
        {
            return Ok(ToolResult::error(format!(
                "failed to create parent directories for \"{}\": {}",
                file_path, e
            )));
        }

        match tokio::fs::write(&resolved, content).await {
            Ok(()) => Ok(ToolResult::new(format!(
                "Successfully wrote to \"{}\" ({} bytes)",
                file_path,
                content.len()
            ))),
            Err(e) => Ok(ToolResult::error(format!(
                "error writing \"{}\": {}",
                file_path, e
            ))),
        }
    }
}
