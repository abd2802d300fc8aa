use std::ffi::OsString;

use clap::Parser;
use dlg_core::DialogueError;

mod check;
mod cli_args;
mod error_map;
mod play;

pub(crate) use cli_args::{CheckArgs, Cli, Mode, PlayArgs};
pub(crate) use error_map::{emit_error, map_cli_io, map_cli_state_read, map_cli_tree_read};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => return error.exit_code(),
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, DialogueError> {
    match cli.command {
        Mode::Play(args) => play::run_play(args),
        Mode::Check(args) => check::run_check(args),
    }
}

#[cfg(test)]
mod tests;
