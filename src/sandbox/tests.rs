use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_new_rejects_missing_root() {
    let err = Sandbox::new("/tmp/agentbox_nonexistent_root_12345").unwrap_err();
    assert!(err.to_string().contains("configuration error"));
}

#[test]
fn test_resolve_within_root() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("file.txt"), "x").unwrap();

    let sandbox = Sandbox::new(tmp.path()).unwrap();
    let resolved = sandbox.resolve("file.txt").unwrap();
    assert!(resolved.starts_with(sandbox.root()));
    assert_eq!(resolved.file_name().unwrap(), "file.txt");
}

#[test]
fn test_resolve_root_itself() {
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    assert_eq!(sandbox.resolve("").unwrap(), sandbox.root());
}

#[test]
fn test_resolve_nonexistent_inside_root() {
    // Non-existent paths inside the root must resolve (for write operations)
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    let resolved = sandbox.resolve("new/deep/file.txt").unwrap();
    assert!(resolved.starts_with(sandbox.root()));
}

#[test]
fn test_resolve_traversal_blocked() {
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    let err = sandbox.resolve("../../etc/passwd").unwrap_err();
    assert!(err.is_containment());
    assert!(err.to_string().contains("../../etc/passwd"));
}

#[test]
fn test_resolve_nested_traversal_blocked() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    assert!(sandbox.resolve("sub/../../outside").unwrap_err().is_containment());
}

#[test]
fn test_resolve_absolute_path_blocked() {
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    assert!(sandbox.resolve("/etc/passwd").unwrap_err().is_containment());
}

#[test]
fn test_sibling_prefix_root_blocked() {
    // A sibling whose name shares a prefix with the root must not pass the
    // containment check (the string-prefix pitfall).
    let base = TempDir::new().unwrap();
    fs::create_dir(base.path().join("ws")).unwrap();
    fs::create_dir(base.path().join("ws2")).unwrap();
    fs::write(base.path().join("ws2/secret.txt"), "secret").unwrap();

    let sandbox = Sandbox::new(base.path().join("ws")).unwrap();
    let err = sandbox.resolve("../ws2/secret.txt").unwrap_err();
    assert!(err.is_containment());
}

#[test]
fn test_traversal_that_returns_inside_is_allowed() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();
    fs::write(tmp.path().join("file.txt"), "x").unwrap();

    let sandbox = Sandbox::new(tmp.path()).unwrap();
    let resolved = sandbox.resolve("sub/../file.txt").unwrap();
    assert_eq!(resolved.file_name().unwrap(), "file.txt");
}

#[test]
fn test_relative_display_strips_root() {
    let tmp = TempDir::new().unwrap();
    let sandbox = Sandbox::new(tmp.path()).unwrap();
    let abs = sandbox.root().join("a/b.txt");
    assert_eq!(sandbox.relative_display(&abs), "a/b.txt");
}

#[test]
fn test_lexical_normalize() {
    assert_eq!(
        lexical_normalize(Path::new("/workspace/../etc/passwd")),
        PathBuf::from("/etc/passwd")
    );
    assert_eq!(
        lexical_normalize(Path::new("/a/./b/../c")),
        PathBuf::from("/a/c")
    );
    // ".." never pops past root
    assert_eq!(
        lexical_normalize(Path::new("/../../etc")),
        PathBuf::from("/etc")
    );
}
