//! Operation mode and environment-derived defaults.

use crate::cli::arg_utils::read_u32_from_str;
use crate::cli::constants::display_level;
use crate::config::{ENV_NBWORKERS, NB_WORKERS_DEFAULT};

/// What the tool does with its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Decompress,
    /// Decode and discard, reporting only failures.
    Test,
    /// Print header and size information.
    List,
}

/// Worker count from `UNLZW_NBWORKERS`, or 0 (auto).
pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Parses an optional `UNLZW_NBWORKERS` value.
///
/// Trailing text after the digits is ignored. A value without leading
/// digits is reported at display level 2 and replaced by the default.
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    let Some(env) = env_val else {
        return NB_WORKERS_DEFAULT;
    };
    match read_u32_from_str(env) {
        Some((val, _)) => val as usize,
        None => {
            if display_level() >= 2 {
                eprintln!(
                    "Ignore environment variable setting {}={}: not a valid unsigned value ",
                    ENV_NBWORKERS, env
                );
            }
            NB_WORKERS_DEFAULT
        }
    }
}
