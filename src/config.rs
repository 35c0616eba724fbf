// config.rs - Compile-time configuration constants.
//
// Runtime preferences live in `io::prefs::Prefs`; everything here is fixed at
// build time. Sparse-file support is detected by build.rs and exposed as
// `#[cfg(has_sparse_files)]`.

// Extension stripped from input names to derive the output name.
pub const Z_EXTENSION: &str = ".Z";

// Whether parallel multi-file decompression is compiled in.
pub const MULTITHREAD: bool = cfg!(feature = "multithread");

// Default number of worker threads (0 = one per core).
// Overridden by the UNLZW_NBWORKERS environment variable or by -T#.
pub const NB_WORKERS_DEFAULT: usize = 0;

// Upper bound on -T#.
pub const NB_WORKERS_MAX: usize = 200;

// Name of the environment variable seeding the worker count.
pub const ENV_NBWORKERS: &str = "UNLZW_NBWORKERS";

// Size of the decompressed-data transfer buffer used by `uncompress`
// and by the file-level drivers.
pub const TRANSFER_BUFFER_SIZE: usize = 100_000;

// Zero runs at least this long are skipped with a seek when writing sparse
// output.
pub const SPARSE_SEGMENT_SIZE: usize = 32 * 1024;

// Sparse-file mode default: 0 = off, 1 = auto (regular files only), 2 = forced.
pub const SPARSE_DEFAULT: u32 = 1;
