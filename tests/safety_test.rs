use std::fs;
use tempfile::TempDir;
use templproc::error::Error;
use templproc::safety::{check_output_directory, check_output_path, resolve_path};

#[test]
fn test_plain_output_path_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    fs::create_dir(&output_dir).unwrap();

    let resolved = check_output_path(&output_dir.join("app_line0001.conf"), &output_dir).unwrap();
    assert_eq!(resolved, fs::canonicalize(&output_dir).unwrap().join("app_line0001.conf"));
}

#[test]
fn test_missing_output_dir_is_resolved_leniently() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("not").join("yet");
    assert!(check_output_path(&output_dir.join("a.txt"), &output_dir).is_ok());
}

#[test]
fn test_traversal_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    fs::create_dir(&output_dir).unwrap();

    let candidate = output_dir.join("..").join("escape.txt");
    assert!(matches!(
        check_output_path(&candidate, &output_dir),
        Err(Error::UnsafeOutputPath { .. })
    ));
}

#[test]
fn test_resolve_path_normalizes_missing_tail() {
    let temp_dir = TempDir::new().unwrap();
    let base = fs::canonicalize(temp_dir.path()).unwrap();
    let resolved = resolve_path(&temp_dir.path().join("a").join("..").join("b")).unwrap();
    assert_eq!(resolved, base.join("b"));
}

#[cfg(unix)]
#[test]
fn test_symlinked_candidate_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    fs::create_dir(&output_dir).unwrap();
    let victim = temp_dir.path().join("victim.txt");
    fs::write(&victim, "keep").unwrap();
    let candidate = output_dir.join("app_line0001.txt");
    std::os::unix::fs::symlink(&victim, &candidate).unwrap();

    match check_output_path(&candidate, &output_dir) {
        Err(Error::UnsafeOutputPath { reason, .. }) => assert!(reason.contains("symbolic link")),
        other => panic!("Expected UnsafeOutputPath, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let real = temp_dir.path().join("real");
    fs::create_dir(&real).unwrap();
    let output_dir = temp_dir.path().join("out");
    std::os::unix::fs::symlink(&real, &output_dir).unwrap();

    assert!(matches!(
        check_output_path(&output_dir.join("a.txt"), &output_dir),
        Err(Error::UnsafeOutputPath { .. })
    ));
}

#[test]
fn test_output_nested_in_template_dir_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    let template = templates.join("app.conf");
    fs::write(&template, "x").unwrap();

    for output_dir in [templates.clone(), templates.join("out"), templates.join("a").join("b")] {
        assert!(matches!(
            check_output_directory(&output_dir, &[template.clone()]),
            Err(Error::OutputOverlapsTemplates { .. })
        ));
    }
}

#[test]
fn test_disjoint_output_dir_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    let template = templates.join("app.conf");
    fs::write(&template, "x").unwrap();

    let nested = check_output_directory(&temp_dir.path().join("out"), &[template]).unwrap();
    assert!(nested.is_empty());
}

#[test]
fn test_templates_inside_output_dir_are_only_reported() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    let templates = output_dir.join("templates");
    fs::create_dir_all(&templates).unwrap();
    let template = templates.join("app.conf");
    fs::write(&template, "x").unwrap();

    let nested = check_output_directory(&output_dir, &[template.clone(), template]).unwrap();
    assert_eq!(nested, vec![fs::canonicalize(&templates).unwrap()]);
}
