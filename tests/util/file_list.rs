// Recursive expansion of directory arguments.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use unlzw::util::create_file_list;

fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b/deeper")).unwrap();
    fs::create_dir(root.join("a")).unwrap();
    for f in ["a/2.Z", "a/1.Z", "b/deeper/3.Z", "b/skip.txt", "top.Z"] {
        fs::write(root.join(f), f.as_bytes()).unwrap();
    }
    dir
}

#[test]
fn walk_is_sorted_and_filtered() {
    let dir = tree();
    let list = create_file_list(&[dir.path()], Some(".Z")).unwrap();
    let rel: Vec<PathBuf> = list
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        rel,
        ["a/1.Z", "a/2.Z", "b/deeper/3.Z", "top.Z"].map(PathBuf::from).to_vec()
    );
}

#[test]
fn mixed_files_and_directories_keep_argument_order() {
    let dir = tree();
    let named = dir.path().join("b/skip.txt");
    let sub = dir.path().join("a");
    let list = create_file_list(&[named.as_path(), sub.as_path()], Some(".Z")).unwrap();
    assert_eq!(list, vec![named, sub.join("1.Z"), sub.join("2.Z")]);
}

#[test]
fn missing_argument_is_passed_through() {
    // The driver reports it when it fails to open it.
    let dir = tree();
    let ghost = dir.path().join("ghost.Z");
    assert_eq!(create_file_list(&[ghost.as_path()], Some(".Z")).unwrap(), vec![ghost]);
}
