use crate::sandbox::Sandbox;
use crate::tools::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::ffi::OsStr;
use std::process::Output;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const SCRIPT_EXTENSION: &str = "py";
const INTERPRETER: &str = "python3";

/// Executes a Python script from inside the sandbox as a subprocess.
///
/// The subprocess runs with its working directory set to the script's own
/// containing directory, stdout and stderr captured separately, and a hard
/// timeout after which the child is killed (`kill_on_drop`). No retry is
/// attempted on expiry.
pub struct RunScriptTool {
    sandbox: Sandbox,
    timeout: Duration,
}

impl RunScriptTool {
    pub fn new(sandbox: Sandbox) -> Self {
        Self {
            sandbox,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the subprocess timeout (tests use short values).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Tool for RunScriptTool {
    fn name(&self) -> &str {
        "run_script"
    }

    fn description(&self) -> &str {
        "Executes a Python file within the working directory with a 30-second timeout."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the Python file to execute, relative to the working directory."
                }
            },
            "required": ["file_path"]
        })
    }

    /// The registry-level guard must not fire before the subprocess timeout.
    fn execution_timeout(&self) -> Duration {
        self.timeout + Duration::from_secs(5)
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
            Ok(meta) if meta.is_file() => {}
            _ => {
                return Ok(ToolResult::error(format!(
                    "script \"{}\" not found",
                    file_path
                )));
            }
        }
        if resolved.extension().and_then(OsStr::to_str) != Some(SCRIPT_EXTENSION) {
            return Ok(ToolResult::error(format!(
                "\"{}\" is not a Python file",
                file_path
            )));
        }

        // Inside the sandbox the script always has a parent directory and a
        // file name; fall back to the root only to satisfy the type.
        let cwd = resolved.parent().unwrap_or_else(|| self.sandbox.root());
        let file_name = resolved.file_name().unwrap_or(resolved.as_os_str());

        let mut cmd = tokio::process::Command::new(INTERPRETER);
        cmd.arg(file_name).current_dir(cwd).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => Ok(format_execution(&output)),
            Ok(Err(e)) => Ok(ToolResult::error(format!(
                "error executing script \"{}\": {}",
                file_path, e
            ))),
            Err(_) => Ok(ToolResult::error(format!(
                "script \"{}\" timed out after {} seconds",
                file_path,
                self.timeout.as_secs()
            ))),
        }
    }
}

/// Build the execution report: STDOUT/STDERR sections when present, an exit
/// note for non-zero codes, and a distinct message when nothing was emitted.
fn format_execution(output: &Output) -> ToolResult {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let mut parts = Vec::new();
    if !stdout.trim_end().is_empty() {
        parts.push(format!("STDOUT:\n{}", stdout.trim_end()));
    }
    if !stderr.trim_end().is_empty() {
        parts.push(format!("STDERR:\n{}", stderr.trim_end()));
    }
    match output.status.code() {
        Some(0) => {}
        Some(code) => parts.push(format!("Process exited with code {}", code)),
        None => parts.push("Process terminated by signal".to_string()),
    }

    if parts.is_empty() {
        ToolResult::new("No output produced.")
    } else {
        ToolResult::new(parts.join("\n\n"))
    }
}
