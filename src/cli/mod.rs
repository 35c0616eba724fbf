//! Command-line interface for the `unlzw` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program names, the display level and `displaylevel!`. |
//! | [`arg_utils`] | Path basename, executable-name matching, integer parsing. |
//! | [`op_mode`]   | `OpMode` and environment defaults. |
//! | [`init`]      | `CliInit` built from the binary name (`uncompress`, `lzwcat`). |
//! | [`args`]      | `ParsedArgs`: the clap parser layered over `CliInit`. |
//!
//! Typical call sequence: `detect_alias` → `parse_args` → dispatch to [`crate::io`].

pub mod arg_utils;
pub mod args;
pub mod constants;
pub mod init;
pub mod op_mode;
