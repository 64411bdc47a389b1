use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Package files to inspect
    #[arg(value_hint = ValueHint::FilePath)]
    pub packages: Vec<PathBuf>,
}
