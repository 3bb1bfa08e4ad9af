use super::*;
use clap::CommandFactory;
use tempfile::TempDir;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_ls_with_workspace() {
    let cli = Cli::try_parse_from(["agentbox", "-w", "/tmp", "ls", "src"]).unwrap();
    assert_eq!(cli.workspace, PathBuf::from("/tmp"));
    match cli.command {
        Commands::Ls { directory } => assert_eq!(directory.as_deref(), Some("src")),
        _ => panic!("expected ls"),
    }
}

#[test]
fn test_parse_write_requires_content() {
    assert!(Cli::try_parse_from(["agentbox", "write", "a.txt"]).is_err());
}

#[test]
fn test_workspace_defaults_to_current_dir() {
    let cli = Cli::try_parse_from(["agentbox", "tools"]).unwrap();
    assert_eq!(cli.workspace, PathBuf::from("."));
}

#[test]
fn test_build_registry_has_all_four_tools() {
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    let registry = build_registry(&sandbox);
    assert_eq!(
        registry.tool_names(),
        vec!["list_files", "read_file", "run_script", "write_file"]
    );
}
