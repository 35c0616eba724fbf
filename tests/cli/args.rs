// Option parsing through the public entry point.

use unlzw::cli::args::{parse_args_from, usage};
use unlzw::cli::init::detect_alias;
use unlzw::cli::op_mode::OpMode;

fn parse(args: &[&str]) -> anyhow::Result<unlzw::cli::args::ParsedArgs> {
    let argv: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    parse_args_from(detect_alias("unlzw"), "unlzw", &argv)
}

#[test]
fn defaults() {
    let p = parse(&["in.Z"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Decompress);
    assert_eq!(p.input_filename.as_deref(), Some("in.Z"));
    assert!(p.output_filename.is_none());
    assert!(!p.prefs.overwrite);
    assert!(!p.prefs.remove_src_file);
    assert!(p.prefs.keep_stat);
    assert_eq!(p.display_level, 2);
    assert!(!p.exit_early);
}

#[test]
fn long_and_short_forms_agree() {
    let a = parse(&["-c", "-f", "-t", "x.Z"]).unwrap();
    let b = parse(&["--stdout", "--force", "--test", "x.Z"]).unwrap();
    assert_eq!(a.output_filename, b.output_filename);
    assert_eq!(a.prefs.overwrite, b.prefs.overwrite);
    assert_eq!(a.op_mode, b.op_mode);
}

#[test]
fn list_wins_over_test() {
    assert_eq!(parse(&["-t", "-l", "x.Z"]).unwrap().op_mode, OpMode::List);
}

#[test]
fn quiet_floors_at_zero() {
    assert_eq!(parse(&["-qqqq", "x.Z"]).unwrap().display_level, 0);
}

#[test]
fn file_options() {
    let p = parse(&["--rm", "--no-sparse", "--no-keep-stat", "--pass-through", "x.Z"]).unwrap();
    assert!(p.prefs.remove_src_file);
    assert_eq!(p.prefs.sparse_file_support, 0);
    assert!(!p.prefs.keep_stat);
    assert!(p.prefs.pass_through);
}

#[test]
fn worker_count() {
    assert_eq!(parse(&["-m", "-T", "3", "a.Z", "b.Z"]).unwrap().nb_workers, 3);
    assert_eq!(parse(&["--threads=0", "a.Z"]).unwrap().nb_workers, 0);
}

#[test]
fn bad_usage_messages() {
    let err = parse(&["-T", "many", "a.Z"]).unwrap_err();
    assert!(err.to_string().starts_with("bad usage: "), "{err}");
    let err = parse(&["a.Z", "b", "c"]).unwrap_err();
    assert!(err.to_string().contains("too many file names"), "{err}");
}

#[test]
fn usage_line() {
    assert!(usage().contains("unlzw"));
}
