//! Alias detection from `argv[0]`.
//!
//! The tool may be installed under several names through links. The name
//! picks defaults before any flag is parsed; explicit flags win.
//!
//! | Name         | Effect                                                  |
//! |--------------|---------------------------------------------------------|
//! | `uncompress` | every argument is an input file                         |
//! | `lzwcat`     | stdout output, pass-through, every argument is an input |

use crate::cli::arg_utils::{exe_name_match, last_name_from_path};
use crate::cli::constants::{set_display_level, LZWCAT, UNCOMPRESS};
use crate::cli::op_mode::{init_nb_workers, OpMode};
use crate::io::file_io::STDOUT_MARK;
use crate::io::prefs::Prefs;

/// State handed to the argument parser.
#[derive(Debug, Clone)]
pub struct CliInit {
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Treat every positional argument as an input file.
    pub multiple_inputs: bool,
    /// Worker count from the environment (0 = auto).
    pub nb_workers: usize,
    /// Write to stdout even when it is a terminal.
    pub force_stdout: bool,
    pub output_filename: Option<String>,
    /// Display level the alias asks for; already applied to `DISPLAY_LEVEL`.
    pub display_level_override: Option<u32>,
}

/// Builds the initial state for the program named `argv0` (a path is fine).
pub fn detect_alias(argv0: &str) -> CliInit {
    let exe_name = last_name_from_path(argv0);

    let mut prefs = Prefs::default();
    // Existing outputs are only replaced with -f.
    prefs.set_overwrite(false);

    let mut init = CliInit {
        prefs,
        op_mode: OpMode::Decompress,
        multiple_inputs: false,
        nb_workers: init_nb_workers(),
        force_stdout: false,
        output_filename: None,
        display_level_override: None,
    };

    if exe_name_match(exe_name, UNCOMPRESS) {
        init.multiple_inputs = true;
    }

    if exe_name_match(exe_name, LZWCAT) {
        init.prefs.set_overwrite(true);
        init.prefs.set_pass_through(true);
        init.prefs.set_remove_src_file(false);
        init.force_stdout = true;
        init.output_filename = Some(STDOUT_MARK.to_owned());
        init.multiple_inputs = true;
        init.display_level_override = Some(1);
        set_display_level(1);
    }

    init
}
