//! Binary entry point for the `unlzw` command-line tool.
//!
//! 1. [`detect_alias`] picks defaults from `argv[0]` (`uncompress`, `lzwcat`).
//! 2. [`parse_args`] layers the command-line options on top.
//! 3. [`run`] resolves file names and dispatches to the I/O layer.

use std::io::IsTerminal;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use unlzw::cli::args::{parse_args, usage, ParsedArgs};
use unlzw::cli::constants::{display_level, set_display_level, IO_MT, PROGRAM_NAME, Z_EXTENSION};
use unlzw::cli::init::detect_alias;
use unlzw::cli::op_mode::OpMode;
use unlzw::config::{MULTITHREAD, NB_WORKERS_MAX};
use unlzw::displaylevel;
use unlzw::util::get_total_file_size;
use unlzw::io::{
    decompress_filename, decompress_multiple_filenames, default_nb_workers,
    display_compressed_files_info, set_notification_level, NUL_MARK, STDIN_MARK, STDOUT_MARK,
};

/// Installs the `tracing` subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows the display level.
fn init_tracing(level: u32) {
    let default_level = match level {
        0..=2 => "warn",
        3 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `-` on the command line names the standard streams.
fn normalize_name(name: String, mark: &str) -> String {
    if name == "-" {
        mark.to_owned()
    } else {
        name
    }
}

/// Runs the operation selected by `args` and returns the exit code.
fn run(args: ParsedArgs) -> i32 {
    let mut prefs = args.prefs;
    let op_mode = args.op_mode;
    let force_stdout = args.force_stdout;
    let mut multiple_inputs = args.multiple_inputs;
    let in_file_names: Vec<String> = args
        .in_file_names
        .into_iter()
        .map(|n| normalize_name(n, STDIN_MARK))
        .collect();
    let mut output_filename = args.output_filename.map(|n| normalize_name(n, STDOUT_MARK));
    let input_filename = args.input_filename.map(|n| normalize_name(n, STDIN_MARK));

    displaylevel!(
        3,
        "*** {} v{} {}-bit {} ***\n",
        PROGRAM_NAME,
        unlzw::version_string(),
        std::mem::size_of::<*const ()>() * 8,
        IO_MT
    );

    if !MULTITHREAD && args.nb_workers > 1 {
        displaylevel!(2, "warning: this executable doesn't support multithreading \n");
    }

    #[cfg(feature = "recursive")]
    let in_file_names = if args.recursive {
        let paths: Vec<&Path> = in_file_names.iter().map(Path::new).collect();
        match unlzw::util::create_file_list(&paths, Some(Z_EXTENSION)) {
            Ok(list) => {
                for (u, p) in list.iter().enumerate() {
                    displaylevel!(4, "{} {}\n", u, p.display());
                }
                list.into_iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            }
            Err(e) => {
                displaylevel!(1, "{}: {}\n", PROGRAM_NAME, e);
                return 1;
            }
        }
    } else {
        in_file_names
    };

    if op_mode == OpMode::Test {
        prefs.set_test_mode(true);
        output_filename = Some(NUL_MARK.to_owned());
    }

    // No file arguments at all: filter stdin.
    if multiple_inputs && in_file_names.is_empty() {
        multiple_inputs = false;
    }
    let input_filename = if multiple_inputs {
        None
    } else {
        Some(input_filename.unwrap_or_else(|| STDIN_MARK.to_owned()))
    };

    let reads_stdin = match &input_filename {
        Some(name) => name == STDIN_MARK,
        None => in_file_names.iter().any(|n| n == STDIN_MARK),
    };
    if reads_stdin && std::io::stdin().is_terminal() && !args.force_overwrite {
        displaylevel!(1, "{}: refusing to read compressed data from a console\n", PROGRAM_NAME);
        return 1;
    }

    if op_mode == OpMode::List {
        let srcs: Vec<&str> = match &input_filename {
            Some(name) => vec![name.as_str()],
            None => in_file_names.iter().map(String::as_str).collect(),
        };
        set_notification_level(display_level() as i32);
        return match display_compressed_files_info(&srcs) {
            Ok(()) => 0,
            Err(_) => 1,
        };
    }

    if let Some(input) = &input_filename {
        if input == STDIN_MARK && output_filename.is_none() {
            output_filename = Some(STDOUT_MARK.to_owned());
        }
        if output_filename.is_none() {
            match input.strip_suffix(Z_EXTENSION).filter(|base| !base.is_empty()) {
                Some(base) => {
                    displaylevel!(4, "Decoding file {} \n", base);
                    output_filename = Some(base.to_owned());
                }
                None => {
                    displaylevel!(
                        1,
                        "{}: {}: cannot determine an output filename\n{}\n",
                        PROGRAM_NAME,
                        input,
                        usage()
                    );
                    return 1;
                }
            }
        }
    }

    let to_stdout = output_filename.as_deref() == Some(STDOUT_MARK);
    if to_stdout && std::io::stdout().is_terminal() && !force_stdout {
        displaylevel!(1, "{}: refusing to write to console without -c \n", PROGRAM_NAME);
        return 1;
    }

    if (to_stdout || multiple_inputs) && display_level() == 2 {
        set_display_level(1);
    }
    set_notification_level(display_level() as i32);

    let nb_workers = match args.nb_workers {
        0 => default_nb_workers(),
        n if n > NB_WORKERS_MAX => {
            displaylevel!(
                3,
                "Requested {} threads too large => automatically reduced to {} \n",
                n,
                NB_WORKERS_MAX
            );
            NB_WORKERS_MAX
        }
        n => n,
    };
    prefs.set_nb_workers(nb_workers);

    match input_filename {
        None => {
            let suffix = match output_filename.as_deref() {
                Some(STDOUT_MARK) => STDOUT_MARK,
                Some(NUL_MARK) => NUL_MARK,
                _ => Z_EXTENSION,
            };
            let srcs: Vec<&str> = in_file_names.iter().map(String::as_str).collect();
            if display_level() >= 3 {
                let paths: Vec<&Path> = srcs.iter().map(Path::new).collect();
                displaylevel!(
                    3,
                    "{} files, {} compressed bytes, {} worker(s)\n",
                    srcs.len(),
                    get_total_file_size(&paths),
                    prefs.nb_workers
                );
            }
            match decompress_multiple_filenames(&srcs, suffix, &prefs) {
                Ok(()) => 0,
                Err(e) => {
                    displaylevel!(2, "{}: {}\n", PROGRAM_NAME, e);
                    1
                }
            }
        }
        Some(input) => {
            let output = output_filename.unwrap_or_else(|| STDOUT_MARK.to_owned());
            match decompress_filename(&input, &output, &prefs) {
                Ok(stats) => {
                    if op_mode == OpMode::Test {
                        displaylevel!(2, "{}: OK\n", input);
                    }
                    tracing::debug!(bytes = stats.decompressed_bytes, "done");
                    0
                }
                Err(e) => {
                    displaylevel!(1, "{}: {}: {}\n", PROGRAM_NAME, input, e);
                    1
                }
            }
        }
    }
}

fn main() {
    let argv0 = std::env::args().next().unwrap_or_else(|| PROGRAM_NAME.to_owned());
    let init = detect_alias(&argv0);

    let args = match parse_args(init) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}: {}", PROGRAM_NAME, e);
            eprintln!("{}", usage());
            std::process::exit(1);
        }
    };

    if args.exit_early {
        std::process::exit(0);
    }

    init_tracing(args.display_level);
    std::process::exit(run(args));
}
