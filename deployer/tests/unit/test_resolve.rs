//! Resource resolution tests

use std::fs;
use std::path::Path;

use camunda_deploy::resolve;

fn touch(base: &Path, relative: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "<definitions/>").unwrap();
}

fn patterns(items: &[&str]) -> Vec<String> {
    items.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_resolve_nested_model_folders() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "models/invoice.bpmn");
    touch(dir.path(), "services/billing/models/approver.dmn");
    touch(dir.path(), "services/billing/models/readme.md");
    touch(dir.path(), "other/ignored.bpmn");

    let resources = resolve(
        dir.path(),
        &patterns(&["**/models/*.bpmn", "**/models/*.dmn"]),
    )
    .unwrap();

    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["models/invoice.bpmn", "services/billing/models/approver.dmn"]
    );
    for resource in &resources {
        assert_eq!(resource.path, dir.path().join(&resource.name));
        assert!(resource.path.is_file());
    }
}

#[test]
fn test_resolve_deduplicates_overlapping_patterns() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "models/invoice.bpmn");

    let resources = resolve(
        dir.path(),
        &patterns(&["**/models/*.bpmn", "**/models/invoice.*", "models/invoice.bpmn"]),
    )
    .unwrap();

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].name, "models/invoice.bpmn");
}

#[test]
fn test_resolve_nothing_found_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();

    let resources = resolve(dir.path(), &patterns(&["**/models/*.bpmn"])).unwrap();
    assert!(resources.is_empty());
}

#[test]
fn test_resolve_skips_directories_and_hidden_files() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "models/.draft.bpmn");
    touch(dir.path(), "models/nested.bpmn/inner.txt");
    touch(dir.path(), "models/final.bpmn");

    let resources = resolve(dir.path(), &patterns(&["**/models/*.bpmn"])).unwrap();
    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["models/final.bpmn"]);
}

#[test]
fn test_resolve_relative_base_dir() {
    let dir = tempfile::tempdir_in(".").unwrap();
    let relative = dir.path().strip_prefix(".").unwrap_or(dir.path()).to_path_buf();
    assert!(relative.is_relative());
    touch(&relative, "models/invoice.bpmn");
    touch(&relative, "nested/models/approver.dmn");

    let with_slash = format!("{}/", relative.display());
    for base in [relative.clone(), Path::new(&with_slash).to_path_buf()] {
        let resources = resolve(&base, &patterns(&["**/models/*.bpmn", "**/models/*.dmn"])).unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["models/invoice.bpmn", "nested/models/approver.dmn"]);
        for resource in &resources {
            assert!(resource.path.is_file(), "{}", resource.path.display());
        }
    }
}

#[test]
fn test_resolve_current_directory() {
    // Integration tests run from the package directory.
    let resources = resolve(Path::new("."), &patterns(&["tests/unit/*.rs"])).unwrap();
    let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
    assert!(names.contains(&"tests/unit/main.rs"), "{:?}", names);
    assert!(resources.iter().all(|r| r.path.is_file()));
}
