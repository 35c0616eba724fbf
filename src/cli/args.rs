//! Command-line argument parsing.
//!
//! The options are declared with clap's derive API in [`Cli`] and then
//! folded over the alias defaults from [`CliInit`] into a [`ParsedArgs`].
//! [`parse_args_from`] takes an explicit argument list for tests.
//!
//! `--help` and `--version` are printed here and reported through
//! `ParsedArgs::exit_early`. Other usage errors come back as `Err` with a
//! message starting with `"bad usage: "`.

use anyhow::anyhow;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};

use crate::cli::constants::{set_display_level, DEFAULT_DISPLAY_LEVEL, PROGRAM_NAME};
use crate::cli::init::CliInit;
use crate::cli::op_mode::OpMode;
use crate::io::file_io::STDOUT_MARK;
use crate::io::prefs::Prefs;

#[derive(Parser, Debug)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Decompress files in the Unix `compress` (.Z) format",
    after_help = "With no INPUT, or when INPUT is -, read standard input."
)]
struct Cli {
    /// Decompress (the default and only operation)
    #[arg(short = 'd', long = "decompress", visible_alias = "uncompress")]
    decompress: bool,

    /// Write to standard output, even to a terminal
    #[arg(short = 'c', long = "stdout", visible_alias = "to-stdout")]
    stdout: bool,

    /// Overwrite existing files; allow reading compressed data from a terminal
    #[arg(short = 'f', long = "force")]
    force: bool,

    /// Keep the source file (default)
    #[arg(short = 'k', long = "keep", overrides_with = "rm")]
    keep: bool,

    /// Remove the source file after successful decompression
    #[arg(long = "rm", overrides_with = "keep")]
    rm: bool,

    /// Test integrity: decode and discard the output
    #[arg(short = 't', long = "test")]
    test: bool,

    /// List header and size information for each file
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Treat every argument as an input file
    #[arg(short = 'm', long = "multiple")]
    multiple: bool,

    /// Descend into directories (implies -m)
    #[cfg(feature = "recursive")]
    #[arg(short = 'r', long = "recursive")]
    recursive: bool,

    /// Number of worker threads for multiple files (0 = auto)
    #[arg(short = 'T', long = "threads", value_name = "N")]
    threads: Option<usize>,

    /// Always write zero runs as holes in the output file
    #[arg(long = "sparse", overrides_with = "no_sparse")]
    sparse: bool,

    /// Never write holes in the output file
    #[arg(long = "no-sparse", overrides_with = "sparse")]
    no_sparse: bool,

    /// Do not copy time stamps, permissions and ownership to the output
    #[arg(long = "no-keep-stat")]
    no_keep_stat: bool,

    /// Copy input that is not in .Z format unchanged
    #[arg(long = "pass-through")]
    pass_through: bool,

    /// Suppress warnings; twice for silence
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    quiet: u8,

    /// More messages; repeat for more
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// INPUT [OUTPUT], or several inputs with -m
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

/// Options and file names after parsing.
#[derive(Debug)]
pub struct ParsedArgs {
    pub prefs: Prefs,
    pub op_mode: OpMode,
    /// Write to stdout even when it is a terminal.
    pub force_stdout: bool,
    /// `-f` was given.
    pub force_overwrite: bool,
    pub multiple_inputs: bool,
    /// Display level after `-q`/`-v`; also stored in `DISPLAY_LEVEL`.
    pub display_level: u32,
    /// Worker count requested (0 = auto).
    pub nb_workers: usize,
    pub input_filename: Option<String>,
    pub output_filename: Option<String>,
    /// Inputs in multiple-input mode.
    pub in_file_names: Vec<String>,
    #[cfg(feature = "recursive")]
    pub recursive: bool,
    /// `--help` or `--version` was handled; exit 0 without doing anything.
    pub exit_early: bool,
    pub exe_name: String,
}

/// Parses `std::env::args()` on top of `init`.
pub fn parse_args(init: CliInit) -> anyhow::Result<ParsedArgs> {
    let mut args = std::env::args();
    let exe_name = args.next().unwrap_or_else(|| PROGRAM_NAME.to_owned());
    let argv: Vec<String> = args.collect();
    parse_args_from(init, &exe_name, &argv)
}

/// Usage line for error messages.
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Parses `argv` (without the program name) on top of `init`.
pub fn parse_args_from(
    init: CliInit,
    exe_name: &str,
    argv: &[String],
) -> anyhow::Result<ParsedArgs> {
    let full_argv = std::iter::once(PROGRAM_NAME.to_owned()).chain(argv.iter().cloned());
    let cli = match Cli::try_parse_from(full_argv) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Ok(early_exit(init, exe_name));
        }
        Err(e) => {
            let msg = e.to_string();
            let first = msg.lines().next().unwrap_or_default();
            return Err(anyhow!(
                "bad usage: {}",
                first.trim_start_matches("error: ")
            ));
        }
    };

    let CliInit {
        mut prefs,
        mut op_mode,
        mut multiple_inputs,
        nb_workers: init_nb_workers,
        mut force_stdout,
        mut output_filename,
        display_level_override,
    } = init;

    let base_level = display_level_override.unwrap_or(DEFAULT_DISPLAY_LEVEL) as i64;
    let level = (base_level + cli.verbose as i64 - cli.quiet as i64).max(0) as u32;
    set_display_level(level);

    if cli.decompress {
        op_mode = OpMode::Decompress;
    }
    if cli.test {
        op_mode = OpMode::Test;
    }
    if cli.list {
        op_mode = OpMode::List;
    }

    if cli.stdout {
        force_stdout = true;
        output_filename = Some(STDOUT_MARK.to_owned());
    }
    if cli.force {
        prefs.set_overwrite(true);
    }
    if cli.rm {
        prefs.set_remove_src_file(true);
    } else if cli.keep {
        prefs.set_remove_src_file(false);
    }
    if cli.sparse {
        prefs.set_sparse_file(2);
    } else if cli.no_sparse {
        prefs.set_sparse_file(0);
    }
    if cli.no_keep_stat {
        prefs.set_keep_stat(false);
    }
    if cli.pass_through {
        prefs.set_pass_through(true);
    }

    #[cfg(feature = "recursive")]
    let recursive = cli.recursive;
    #[cfg(feature = "recursive")]
    if recursive {
        multiple_inputs = true;
    }
    if cli.multiple {
        multiple_inputs = true;
    }

    let nb_workers = cli.threads.unwrap_or(init_nb_workers);

    let mut input_filename = None;
    let mut in_file_names = Vec::new();
    if multiple_inputs {
        in_file_names = cli.files;
    } else {
        let mut files = cli.files.into_iter();
        input_filename = files.next();
        if let Some(out) = files.next() {
            if output_filename.is_some() {
                return Err(anyhow!("bad usage: output file given together with -c"));
            }
            output_filename = Some(out);
        }
        let extra: Vec<String> = files.collect();
        if !extra.is_empty() {
            return Err(anyhow!(
                "bad usage: too many file names ({} unused); use -m for several inputs",
                extra.len()
            ));
        }
    }

    Ok(ParsedArgs {
        prefs,
        op_mode,
        force_stdout,
        force_overwrite: cli.force,
        multiple_inputs,
        display_level: level,
        nb_workers,
        input_filename,
        output_filename,
        in_file_names,
        #[cfg(feature = "recursive")]
        recursive,
        exit_early: false,
        exe_name: exe_name.to_owned(),
    })
}

fn early_exit(init: CliInit, exe_name: &str) -> ParsedArgs {
    ParsedArgs {
        prefs: init.prefs,
        op_mode: init.op_mode,
        force_stdout: init.force_stdout,
        force_overwrite: false,
        multiple_inputs: init.multiple_inputs,
        display_level: init.display_level_override.unwrap_or(DEFAULT_DISPLAY_LEVEL),
        nb_workers: init.nb_workers,
        input_filename: None,
        output_filename: init.output_filename,
        in_file_names: Vec::new(),
        #[cfg(feature = "recursive")]
        recursive: false,
        exit_early: true,
        exe_name: exe_name.to_owned(),
    }
}
