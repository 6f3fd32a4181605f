//! I/O error context helpers.
//!
//! Wraps io::Error into `FsError::Io` with the operation and path attached, and renders
//! platform-aware hints when the error is displayed.
//!
//! Usage:
//!   fs::create_dir(dir).map_err(io_err("mkdir", dir))?;

use std::io;
use std::path::Path;

use crate::errors::FsError;

/// Build the `FsError::Io` message: "<op> '<path>'" plus a hint and OS code.
/// The io::Error text itself is left to the error's `source()`.
pub(crate) fn describe_io(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}'", op, path.display());

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and mode bits"),
                libc::ENOTDIR => Some("a path component is not a directory"),
                libc::EXDEV => Some("cross-filesystem; rename cannot span devices"),
                libc::EBUSY => Some("resource busy; another process holds it"),
                libc::ENOENT => Some("path not found"),
                libc::EEXIST => Some("already exists"),
                libc::ENOTEMPTY => Some("directory not empty"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem"),
                libc::ESTALE => Some("stale file handle; network filesystem lost track of it"),
                libc::ENAMETOOLONG => Some("filename or path too long"),
                libc::EMFILE | libc::ENFILE => Some("too many open files"),
                _ => None,
            };
            if let Some(hint) = hint {
                msg.push_str(" (");
                msg.push_str(hint);
                msg.push(')');
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied"),
                17 => Some("not same device"),
                32 => Some("sharing violation; file is in use"),
                2 | 3 => Some("path not found"),
                112 => Some("insufficient disk space"),
                _ => None,
            };
            if let Some(hint) = hint {
                msg.push_str(" (");
                msg.push_str(hint);
                msg.push(')');
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(" (permission denied)"),
            io::ErrorKind::NotFound => msg.push_str(" (path not found)"),
            io::ErrorKind::AlreadyExists => msg.push_str(" (already exists)"),
            _ => {}
        }
    }

    msg
}

/// Closure adapter for `.map_err(...)`: io::Error -> FsError::Io { op, path }.
pub(crate) fn io_err<'a>(op: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> FsError + 'a {
    move |source: io::Error| FsError::Io {
        op,
        path: path.to_path_buf(),
        source,
    }
}

/// Whether an io::Error means the path is absent.
pub(crate) fn is_not_found(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::NotFound
}
