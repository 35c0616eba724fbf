//! File-level I/O: opening sources and destinations, sparse output, the
//! single- and multi-file decompression drivers and `--list`.

pub mod decompress;
pub mod file_info;
pub mod file_io;
pub mod prefs;
pub mod sparse;

pub use decompress::{
    decompress_filename, decompress_multiple_filenames, decompress_stream, DecompressStats,
};
pub use file_info::{display_compressed_files_info, CompressedFileInfo};
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};
pub use prefs::{default_nb_workers, set_notification_level, Prefs};
