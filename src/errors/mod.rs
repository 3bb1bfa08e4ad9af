use thiserror::Error;

/// Typed error hierarchy for agentbox.
///
/// Used at module boundaries (sandbox resolution, CLI setup). Internal/leaf
/// functions can continue using `anyhow::Result` — the `Internal` variant
/// allows seamless conversion via the `?` operator. Tool-level failures
/// (not-found, ambiguity, I/O, execution) are converted to descriptive
/// `ToolResult::error` strings at the tool boundary and never propagate
/// as faults.
#[derive(Debug, Error)]
pub enum AgentboxError {
    #[error("cannot access \"{0}\": it is outside the permitted working directory")]
    OutsideWorkspace(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AgentboxError {
    /// Whether this error is a sandbox containment violation.
    pub fn is_containment(&self) -> bool {
        matches!(self, Self::OutsideWorkspace(_))
    }
}
