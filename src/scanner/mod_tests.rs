use std::fs;
use std::path::Path;

use super::*;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

struct HeaderOnlyFilter;

impl FileFilter for HeaderOnlyFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "hpp")
    }
}

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "").unwrap();
    path
}

#[test]
fn scanner_finds_files_in_subdirectories_in_name_order() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/b.cpp");
    touch(temp_dir.path(), "src/a.cpp");
    touch(temp_dir.path(), "include/a.hpp");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let files = scanner.scan(temp_dir.path()).unwrap().files;

    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from("include/a.hpp"),
            PathBuf::from("src/a.cpp"),
            PathBuf::from("src/b.cpp"),
        ]
    );
}

#[test]
fn scanner_respects_filter() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "widget.hpp");
    touch(temp_dir.path(), "widget.cpp");

    let scanner = DirectoryScanner::new(HeaderOnlyFilter);
    let files = scanner.scan(temp_dir.path()).unwrap().files;

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("widget.hpp"));
}

#[test]
fn collect_sources_classifies_walked_files() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "include/widget.h");
    touch(temp_dir.path(), "src/widget.cc");
    touch(temp_dir.path(), "docs/guide.md");

    let files = collect_sources(
        &[temp_dir.path().to_path_buf()],
        &SourceKindRegistry::default(),
        &[],
    )
    .unwrap()
    .files;

    let kinds: Vec<_> = files.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![SourceKind::Interface, SourceKind::Implementation]
    );
}

#[test]
fn collect_sources_applies_excludes() {
    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/widget.cpp");
    let vendored = touch(temp_dir.path(), "third_party/lib/lib.hpp");

    let exclude = vec!["**/third_party/**".to_string()];
    let registry = SourceKindRegistry::default();
    let files = collect_sources(&[temp_dir.path().to_path_buf()], &registry, &exclude)
        .unwrap()
        .files;
    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("widget.cpp"));

    let explicit = collect_sources(&[vendored], &registry, &exclude).unwrap();
    assert!(explicit.files.is_empty());
}

#[test]
fn collect_sources_skips_unknown_explicit_files() {
    let temp_dir = TempDir::new().unwrap();
    let notes = touch(temp_dir.path(), "notes.txt");

    let set = collect_sources(&[notes], &SourceKindRegistry::default(), &[]).unwrap();
    assert!(set.files.is_empty());
}

#[test]
fn collect_sources_keeps_missing_paths_for_error_reporting() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("gone.hpp");

    let files = collect_sources(
        std::slice::from_ref(&missing),
        &SourceKindRegistry::default(),
        &[],
    )
    .unwrap();
    assert_eq!(
        files.files,
        vec![SourceFile::new(missing, SourceKind::Interface)]
    );
    assert!(files.unreadable.is_empty());
}

#[test]
fn collect_sources_deduplicates_overlapping_paths() {
    let temp_dir = TempDir::new().unwrap();
    let file = touch(temp_dir.path(), "src/widget.cpp");

    let files = collect_sources(
        &[temp_dir.path().to_path_buf(), file],
        &SourceKindRegistry::default(),
        &[],
    )
    .unwrap();
    assert_eq!(files.files.len(), 1);
}

#[test]
fn collect_sources_rejects_invalid_patterns() {
    let result = collect_sources(&[], &SourceKindRegistry::default(), &["[".to_string()]);
    assert!(result.is_err());
}

#[test]
fn unreadable_walk_root_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let vanished = temp_dir.path().join("vanished");

    let scanner = DirectoryScanner::new(AcceptAllFilter);
    let result = scanner.scan(&vanished).unwrap();

    assert!(result.files.is_empty());
    assert_eq!(result.failures.len(), 1);
    let failure = &result.failures[0];
    assert!(failure.is_input_error());
    assert!(matches!(
        failure,
        StyleGuardError::DirectoryWalk { path, .. } if path == &vanished
    ));
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_is_collected() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    touch(temp_dir.path(), "src/widget.cpp");
    let locked = temp_dir.path().join("locked");
    touch(temp_dir.path(), "locked/hidden.cpp");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    let readable = fs::read_dir(&locked).is_ok();

    let set = collect_sources(
        &[temp_dir.path().to_path_buf()],
        &SourceKindRegistry::default(),
        &[],
    )
    .unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    // Permission bits do not bind a privileged user.
    if readable {
        return;
    }
    assert_eq!(set.files.len(), 1);
    assert_eq!(set.unreadable.len(), 1);
    assert!(matches!(
        &set.unreadable[0],
        StyleGuardError::DirectoryWalk { path, .. } if path == &locked
    ));
}
