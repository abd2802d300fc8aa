use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dlg-cli")]
#[command(about = "Dialogue tree line-mode player")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Play(PlayArgs),
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub(crate) struct PlayArgs {
    #[arg(long = "tree")]
    pub(crate) tree: String,
    #[arg(long = "state")]
    pub(crate) state: Option<String>,
    #[arg(long = "entry")]
    pub(crate) entry: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "tree")]
    pub(crate) tree: String,
    #[arg(long = "entry")]
    pub(crate) entry: Option<String>,
}
