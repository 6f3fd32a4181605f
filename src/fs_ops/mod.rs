//! Filesystem operations.
//!
//! - `ensure`: idempotent directory creation and the batch variant.
//! - `retry`: bounded-retry removal and rename.
//! - `copy`: strict single-file copy and best-effort tree copy.
//! - `write`: stream a reader into a file under an ensured directory.

mod copy;
mod ensure;
pub(crate) mod helpers;
mod io_copy;
mod retry;
mod util;
mod write;

pub use copy::{copy_file, copy_file_ensure_dir, copy_tree, rename, TreeCopyReport};
pub use ensure::{ensure, ensure_directory, ensure_many, PathAndMode, PathAndModes};
pub use retry::{
    absent_many, clear, remove_file_if_exists, retry, retry_move, retry_move_with, retry_remove,
    retry_remove_with,
};
pub use util::{absolutize, is_dir_empty, is_exists};
pub use write::{write_file, write_to_file};
