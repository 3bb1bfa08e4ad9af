use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }

}

impl std::fmt::Display for ToolResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

/// A single callable operation exposed to an orchestrating agent loop.
///
/// Every implementation is self-contained: it re-validates path containment
/// on each call and holds no mutable state, so calls never interfere with
/// one another. Failures of the tool's own contract (bad path, missing file,
/// subprocess trouble) come back as `ToolResult::error`; only malformed
/// parameters are surfaced as `Err`.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters(&self) -> Value; // JSON Schema

    async fn execute(&self, params: Value) -> anyhow::Result<ToolResult>;

    /// Per-tool execution timeout enforced by the registry.
    fn execution_timeout(&self) -> Duration {
        Duration::from_secs(120)
    }

    /// The function-call schema an orchestrator would hand to a model.
    fn to_schema(&self) -> Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters()
            }
        })
    }
}
