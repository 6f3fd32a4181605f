use resilient_fs::prelude::*;
use std::path::Path;

#[test]
fn prelude_exports_expected_items() {
    let _ = LogLevel::Debug;
    let _ = Backoff::None;
    let _err = FsError::BufferReleased;
    let policy = RetryPolicy::default();
    let _ = PoolConfig::default();
    assert_eq!(policy.attempts, 20);

    // Signatures are visible through the prelude; invoking them needs real paths.
    let _ensure_fn: fn(&Path, Mode) -> FsResult<()> = ensure_directory;
    let _remove_fn: fn(&Path) -> FsResult<()> = retry_remove;
    let _move_fn: fn(&Path, &Path) -> FsResult<()> = retry_move;
    let _copy_fn: fn(&Path, &Path, Mode) -> FsResult<u64> = copy_file;
    let _tree_fn: fn(&Path, &Path) -> FsResult<TreeCopyReport> = copy_tree;
    let _rename_fn: fn(&Path, &Path, Mode) -> FsResult<()> = rename;

    let mut batch = PathAndModes::new();
    batch.append("/tmp", 0o755);
    assert_eq!(batch.len(), 1);
    let _id = ContentIdentity::new();
}
