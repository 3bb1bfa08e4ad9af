pub mod base;
pub mod list_files;
pub mod read_file;
pub mod registry;
pub mod run_script;
pub mod write_file;

pub use base::{Tool, ToolResult};
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use registry::{ToolDefinition, ToolRegistry};
pub use run_script::RunScriptTool;
pub use write_file::WriteFileTool;
