use crate::sandbox::Sandbox;
use crate::tools::{Tool, ToolResult};
use crate::utils::fmt::human_size;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively lists a directory's contents with human-readable file sizes.
///
/// When the requested directory name does not resolve directly, the whole
/// sandbox subtree is searched for directories with that base name. A unique
/// match is listed; multiple matches produce a disambiguation report instead.
/// The heuristic exists for model-driven callers guessing at paths, and its
/// three-way outcome (direct hit / unique match / ambiguous) is part of the
/// tool's contract.
pub struct ListFilesTool {
    sandbox: Sandbox,
}

impl ListFilesTool {
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "Lists files in the specified directory along with their sizes, constrained to the working directory."
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "The directory to list files from, relative to the working directory. If not provided, lists files in the working directory itself."
                }
            }
        })
    }

    async fn execute(&self, params: Value) -> anyhow::Result<ToolResult> {
        let directory = params["directory"].as_str().map(str::to_string);
        let sandbox = self.sandbox.clone();
        // The recursive walk and the search fallback are synchronous
        // filesystem work; keep them off the async runtime.
        let result =
            tokio::task::spawn_blocking(move || list_files(&sandbox, directory.as_deref()))
                .await?;
        Ok(result)
    }
}

fn list_files(sandbox: &Sandbox, directory: Option<&str>) -> ToolResult {
    let (target, shown) = match directory {
        None => (sandbox.root().to_path_buf(), ".".to_string()),
        Some(name) => {
            // Containment first: an escaping path must be refused before any
            // filesystem access, including the existence probe below.
            let direct = match sandbox.resolve(name) {
                Ok(p) => p,
                Err(e) => return ToolResult::error(e.to_string()),
            };
            if direct.is_dir() {
                (direct, name.to_string())
            } else {
                match search_directories(sandbox, name) {
                    SearchOutcome::None => {
                        return ToolResult::error(format!(
                            "\"{}\" is not a directory or does not exist",
                            name
                        ));
                    }
                    SearchOutcome::Unique(rel) => {
                        // Re-validate the match through the sandbox before use.
                        match sandbox.resolve(&rel) {
                            Ok(p) => (p, rel),
                            Err(e) => return ToolResult::error(e.to_string()),
                        }
                    }
                    SearchOutcome::Ambiguous(matches) => {
                        return disambiguation_report(name, &matches);
                    }
                }
            }
        }
    };

    match render_listing(&target) {
        Ok(lines) if lines.is_empty() => {
            ToolResult::new(format!("directory \"{}\" is empty", shown))
        }
        Ok(lines) => ToolResult::new(lines.join("\n")),
        Err(e) => ToolResult::error(format!("error listing \"{}\": {}", shown, e)),
    }
}

enum SearchOutcome {
    None,
    Unique(String),
    Ambiguous(Vec<String>),
}

/// Walk the sandbox subtree collecting every directory whose base name
/// equals `name`, as root-relative paths sorted for stable reports.
fn search_directories(sandbox: &Sandbox, name: &str) -> SearchOutcome {
    let mut matches: Vec<String> = Vec::new();
    for entry in WalkDir::new(sandbox.root())
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.file_type().is_dir() && entry.file_name().to_str() == Some(name) {
            matches.push(sandbox.relative_display(entry.path()));
        }
    }
    matches.sort();
    match matches.len() {
        0 => SearchOutcome::None,
        1 => SearchOutcome::Unique(matches.remove(0)),
        _ => SearchOutcome::Ambiguous(matches),
    }
}

fn disambiguation_report(name: &str, matches: &[String]) -> ToolResult {
    let mut report = format!("multiple directories named \"{}\" found:\n", name);
    for rel in matches {
        report.push_str(&format!("  - {}\n", rel));
    }
    report.push_str("specify the full path relative to the working directory");
    ToolResult::error(report)
}

/// Recursively render one directory: its files first (sorted by name, each
/// with a human-readable size), then each subdirectory as an indented header
/// followed by its own contents one level deeper.
fn render_listing(target: &Path) -> std::io::Result<Vec<String>> {
    let mut lines = Vec::new();
    walk(target, 0, &mut lines)?;
    Ok(lines)
}

fn walk(dir: &Path, depth: usize, lines: &mut Vec<String>) -> std::io::Result<()> {
    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            subdirs.push(name);
        } else {
            files.push(name);
        }
    }
    files.sort();
    subdirs.sort();

    let indent = "  ".repeat(depth);
    for name in &files {
        // A per-file metadata failure goes on that file's line; the rest of
        // the listing still completes.
        match std::fs::metadata(dir.join(name)) {
            Ok(meta) => lines.push(format!("{}{} ({})", indent, name, human_size(meta.len()))),
            Err(e) => lines.push(format!("{}{} (error reading size: {})", indent, name, e)),
        }
    }
    for name in &subdirs {
        lines.push(format!("{}{}/", indent, name));
        walk(&dir.join(name), depth + 1, lines)?;
    }
    Ok(())
}
