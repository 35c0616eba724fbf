//! Filesystem helpers used by the file-level drivers and the CLI.
//!
//! - [`file_status`] - regular-file/directory checks, metadata propagation
//! - [`file_size`]   - sizes of files and file sets
//! - [`file_list`]   - recursive expansion of directory arguments

pub mod file_list;
pub mod file_size;
pub mod file_status;

pub use file_list::create_file_list;
pub use file_size::{get_file_size, get_total_file_size};
pub use file_status::{copy_file_stat, is_directory, is_reg_file, set_file_stat};
