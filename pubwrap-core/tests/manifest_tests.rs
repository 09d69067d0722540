//! Manifest error-message and loading integration tests.

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pubwrap_core::{manifest, ContextPath, ManifestError};
use rstest::rstest;

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_manifest_mentions_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = manifest::load_at(&manifest::manifest_path_at(dir.path())).unwrap_err();
    assert!(matches!(err, ManifestError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("manifest not found"));
    assert!(err.to_string().contains("pubwrap.yaml"));
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("pubwrap.yaml");
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .expect("write");

    let err = manifest::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
    let msg = err.to_string();
    assert!(msg.contains("pubwrap.yaml"), "must contain file path, got: {msg}");
}

#[test]
fn load_wrong_type_yaml_returns_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("pubwrap.yaml");
    file.write_str("- this is a list, not a mapping\n").expect("write");

    let err = manifest::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
}

#[test]
fn missing_module_field_is_a_parse_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("pubwrap.yaml");
    file.write_str("files:\n  - path: _run.py\n").expect("write");

    let err = manifest::load_at(file.path()).unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Full manifest
// ---------------------------------------------------------------------------

#[test]
fn loads_trio_style_manifest() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("pubwrap.yaml");
    file.write_str(
        "settings:\n\
         \x20 prefix: _gen\n\
         files:\n\
         \x20 - path: trio/_core/_run.py\n\
         \x20   module: runner\n\
         \x20   imports: |\n\
         \x20     from typing import Any\n\
         \x20 - path: trio/_core/_io_kqueue.py\n\
         \x20   module: runner.io_manager\n\
         \x20   platform: darwin\n",
    )
    .expect("write");
    file.assert(predicate::path::exists());

    let loaded = manifest::load_at(file.path()).expect("load");
    assert_eq!(loaded.settings.prefix, "_gen");
    assert_eq!(loaded.settings.marker, "_public", "unset fields keep defaults");
    assert_eq!(loaded.files.len(), 2);
    assert_eq!(loaded.files[0].imports.as_deref(), Some("from typing import Any\n"));
    assert_eq!(loaded.files[1].module, ContextPath::from("runner.io_manager"));
    assert_eq!(loaded.files[1].platform.as_deref(), Some("darwin"));
    assert!(loaded.files[1].path.starts_with(dir.path()));
}

#[rstest]
#[case("runner io")]
#[case("runner.")]
#[case(".runner")]
#[case("9lives")]
fn invalid_module_paths_are_rejected(#[case] module: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("pubwrap.yaml");
    file.write_str(&format!(
        "files:\n  - path: _run.py\n    module: \"{module}\"\n"
    ))
    .expect("write");

    let err = manifest::load_at(file.path()).unwrap_err();
    assert!(
        matches!(err, ManifestError::InvalidModulePath { .. }),
        "module {module:?} should be rejected, got: {err}"
    );
}
