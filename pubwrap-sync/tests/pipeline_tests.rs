use std::fs;
use std::path::{Path, PathBuf};

use pubwrap_core::{Manifest, SourceFile};
use pubwrap_renderer::Renderer;
use pubwrap_sync::{pipeline, Mode, Outcome, SyncError};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copy fixtures into a scratch dir and build a manifest over them.
fn workspace() -> (TempDir, Manifest) {
    let dir = TempDir::new().expect("tempdir");
    for name in ["_run.py", "_io_kqueue.py"] {
        fs::copy(fixture(name), dir.path().join(name)).expect("copy fixture");
    }
    let manifest = Manifest {
        files: vec![
            SourceFile::new(dir.path().join("_run.py"), "runner"),
            SourceFile::new(dir.path().join("_io_kqueue.py"), "runner.io_manager")
                .with_platform("darwin")
                .with_imports("from typing import Callable, ContextManager, TYPE_CHECKING\nimport sys\n"),
        ],
        ..Manifest::default()
    };
    (dir, manifest)
}

#[test]
fn regenerate_writes_every_output() {
    let (dir, manifest) = workspace();
    let report = pipeline::run(&manifest, Mode::Regenerate, &Renderer::new().unwrap()).expect("run");

    assert_eq!(report.files.len(), 2);
    assert!(report.files.iter().all(|f| f.outcome == Outcome::Written));
    assert_eq!(report.files[0].wrappers, 3);
    assert_eq!(report.files[1].wrappers, 3);

    let kqueue = fs::read_to_string(dir.path().join("_generated_io_kqueue.py")).expect("read");
    assert!(kqueue.contains("def current_kqueue() -> select.kqueue:"));
    assert!(kqueue.contains(
        "def monitor_kevent(ident: int, filter: int) -> ContextManager[_core.UnboundedQueue[select.kevent]]:"
    ));
    assert!(kqueue.contains("return await GLOBAL_RUN_CONTEXT.runner.io_manager.wait_kevent(ident, filter, abort_func)"));
    assert!(kqueue.contains("assert not TYPE_CHECKING or sys.platform==\"darwin\""));
    assert!(!kqueue.contains("_private_helper"));
    assert!(!kqueue.contains("__init__"));

    let run = fs::read_to_string(dir.path().join("_generated_run.py")).expect("read");
    assert!(run.contains("async def wait_all_tasks_blocked(cushion: float = 0.0) -> None:"));
    assert!(run.contains("return await GLOBAL_RUN_CONTEXT.runner.wait_all_tasks_blocked(cushion)"));
}

#[test]
fn verify_after_regenerate_passes() {
    let (_dir, manifest) = workspace();
    let renderer = Renderer::new().unwrap();
    pipeline::run(&manifest, Mode::Regenerate, &renderer).expect("regenerate");

    let report = pipeline::run(&manifest, Mode::Verify, &renderer).expect("verify");
    assert!(report.passed());
    assert_eq!(report.failing().count(), 0);
}

#[test]
fn regenerating_twice_is_byte_identical() {
    let (dir, manifest) = workspace();
    let renderer = Renderer::new().unwrap();
    let output = dir.path().join("_generated_run.py");

    pipeline::run(&manifest, Mode::Regenerate, &renderer).expect("first");
    let first = fs::read(&output).expect("read");
    pipeline::run(&manifest, Mode::Regenerate, &renderer).expect("second");
    assert_eq!(first, fs::read(&output).expect("read"));
}

#[test]
fn one_byte_change_is_stale() {
    let (dir, manifest) = workspace();
    let renderer = Renderer::new().unwrap();
    pipeline::run(&manifest, Mode::Regenerate, &renderer).expect("regenerate");

    let output = dir.path().join("_generated_run.py");
    let mut bytes = fs::read(&output).expect("read");
    bytes.push(b'\n');
    fs::write(&output, &bytes).expect("write");

    let report = pipeline::run(&manifest, Mode::Verify, &renderer).expect("verify");
    assert!(!report.passed());
    assert_eq!(report.files[0].outcome, Outcome::Stale);
    assert_eq!(report.files[1].outcome, Outcome::UpToDate);
    assert_eq!(fs::read(&output).expect("read"), bytes, "verify must not write");
}

#[test]
fn verify_on_fresh_tree_reports_missing() {
    let (dir, manifest) = workspace();
    let report = pipeline::run(&manifest, Mode::Verify, &Renderer::new().unwrap()).expect("verify");
    assert!(report.files.iter().all(|f| f.outcome == Outcome::Missing));
    assert!(!dir.path().join("_generated_run.py").exists());
}

#[test]
fn parse_failure_writes_nothing() {
    let (dir, mut manifest) = workspace();
    let broken = dir.path().join("_broken.py");
    fs::write(&broken, "class C:\n    @_public\n    def f(self\n").expect("write");
    manifest.files.push(SourceFile::new(broken.clone(), "broken"));

    let err = pipeline::run(&manifest, Mode::Regenerate, &Renderer::new().unwrap()).unwrap_err();
    assert!(matches!(err, SyncError::Scan(_)), "got {err:?}");
    assert!(!dir.path().join("_generated_run.py").exists());
    assert!(!dir.path().join("_generated_io_kqueue.py").exists());
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let manifest = Manifest {
        files: vec![SourceFile::new(dir.path().join("nope.py"), "runner")],
        ..Manifest::default()
    };
    let err = pipeline::run(&manifest, Mode::Verify, &Renderer::new().unwrap()).unwrap_err();
    assert!(matches!(err, SyncError::Scan(_)), "got {err:?}");
}
