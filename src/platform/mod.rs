//! Platform-specific helpers.
//! Hides how permission modes are applied (POSIX bits vs. a readonly attribute)
//! behind a uniform API so the fs_ops code stays platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    apply_mode, create_dir_all_with_mode, create_dir_with_mode, mode_of, open_append_with_mode,
    open_file_with_mode,
};

#[cfg(not(unix))]
pub use windows::{
    apply_mode, create_dir_all_with_mode, create_dir_with_mode, mode_of, open_append_with_mode,
    open_file_with_mode,
};

/// Permission bits in POSIX form (e.g. `0o755`).
pub type Mode = u32;
