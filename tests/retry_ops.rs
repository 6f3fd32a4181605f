use assert_fs::prelude::*;
use resilient_fs::fs_ops::{
    absent_many, clear, remove_file_if_exists, retry, retry_move, retry_move_with, retry_remove, retry_remove_with,
};
use resilient_fs::{Backoff, FsError, RetryPolicy, MOVE_ATTEMPTS, REMOVE_ATTEMPTS};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::time::Duration;

#[test]
fn removing_a_missing_path_succeeds() {
    let temp = assert_fs::TempDir::new().unwrap();
    retry_remove(&temp.path().join("never-existed")).unwrap();
}

#[test]
fn removes_file_and_whole_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("f.txt");
    file.write_str("x").unwrap();
    retry_remove(file.path()).unwrap();
    assert!(!file.path().exists());

    let tree = temp.child("tree");
    tree.child("a/b/c.txt").write_str("deep").unwrap();
    tree.child("top.txt").write_str("top").unwrap();
    retry_remove(tree.path()).unwrap();
    assert!(!tree.path().exists());
}

#[cfg(unix)]
#[test]
fn removes_symlink_not_its_target() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child("target");
    target.child("keep.txt").write_str("keep").unwrap();
    let link = temp.path().join("link");
    std::os::unix::fs::symlink(target.path(), &link).unwrap();

    retry_remove(&link).unwrap();
    assert!(std::fs::symlink_metadata(&link).is_err());
    target.child("keep.txt").assert("keep");
}

#[test]
fn move_renames_within_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("old.txt");
    src.write_str("payload").unwrap();
    let dst = temp.child("new.txt");

    retry_move(src.path(), dst.path()).unwrap();
    assert!(!src.path().exists());
    dst.assert("payload");
}

#[test]
fn move_of_missing_source_exhausts_budget() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.path().join("ghost");
    let err = retry_move(&src, &temp.path().join("dst")).unwrap_err();

    match &err {
        FsError::RetriesExhausted { op, path, attempts, source } => {
            assert_eq!(*op, "rename");
            assert_eq!(path, &src);
            assert_eq!(*attempts, MOVE_ATTEMPTS);
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected RetriesExhausted, got {other}"),
    }
    assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
    assert!(err.to_string().contains("20 attempts"), "{err}");
}

#[test]
fn remove_that_keeps_failing_exhausts_budget() {
    // stat under a regular file fails with ENOTDIR on every attempt
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("plain");
    file.write_str("x").unwrap();
    let target = file.path().join("child");

    let err = retry_remove(&target).unwrap_err();
    match &err {
        FsError::RetriesExhausted { op, path, attempts, source } => {
            assert_eq!(*op, "remove");
            assert_eq!(path, &target);
            assert_eq!(*attempts, REMOVE_ATTEMPTS);
            assert_ne!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected RetriesExhausted, got {other}"),
    }

    let policy = RetryPolicy::new(4, Backoff::None);
    let err = retry_remove_with(&target, &policy).unwrap_err();
    assert!(matches!(err, FsError::RetriesExhausted { op: "remove", attempts: 4, .. }));
    file.assert("x");
}

#[test]
fn exhausted_error_reports_cause_once() {
    use std::error::Error as _;
    let temp = assert_fs::TempDir::new().unwrap();
    let err = retry_move(&temp.path().join("ghost"), &temp.path().join("dst")).unwrap_err();
    let cause = err.source().expect("io cause").to_string();
    assert!(!err.to_string().contains(&cause), "{err}");
}

#[test]
fn custom_policy_limits_attempts() {
    let temp = assert_fs::TempDir::new().unwrap();
    let policy = RetryPolicy::new(3, Backoff::Fixed(Duration::from_millis(1)));
    let err = retry_move_with(&temp.path().join("ghost"), &temp.path().join("dst"), &policy).unwrap_err();
    assert!(matches!(err, FsError::RetriesExhausted { attempts: 3, .. }));
}

#[test]
fn transient_failures_are_absorbed() {
    let mut calls = 0u32;
    let policy = RetryPolicy::default();
    let out = retry(&policy, "probe", Path::new("/busy"), || {
        calls += 1;
        if calls < 5 {
            Err(io::Error::new(ErrorKind::ResourceBusy, "busy"))
        } else {
            Ok(calls)
        }
    })
    .unwrap();
    assert_eq!(out, 5);
}

#[test]
fn absent_many_removes_everything_it_can() {
    let temp = assert_fs::TempDir::new().unwrap();
    let a = temp.child("a.txt");
    a.write_str("a").unwrap();
    let b = temp.child("b");
    b.child("inner.txt").write_str("b").unwrap();
    let missing = temp.path().join("missing");

    absent_many(&[a.path(), b.path(), missing.as_path()]).unwrap();
    assert!(!a.path().exists());
    assert!(!b.path().exists());
}

#[test]
fn clear_empties_but_keeps_directory() {
    let temp = assert_fs::TempDir::new().unwrap();
    let d = temp.child("work");
    d.child("x.txt").write_str("x").unwrap();
    d.child("sub/y.txt").write_str("y").unwrap();

    clear(d.path()).unwrap();
    assert!(d.path().is_dir());
    assert_eq!(std::fs::read_dir(d.path()).unwrap().count(), 0);

    clear(&temp.path().join("absent")).unwrap();
}

#[test]
fn remove_file_if_exists_tolerates_absence() {
    let temp = assert_fs::TempDir::new().unwrap();
    let f = temp.child("gone.txt");
    f.write_str("x").unwrap();
    remove_file_if_exists(f.path()).unwrap();
    remove_file_if_exists(f.path()).unwrap();
    assert!(!f.path().exists());
}
