use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

const AFTER_HELP: &str = "\
Zips two ledger files into one. All directives are moved to the beginning of
the merged file.

The source must resume somewhere inside the master's history: the last master
transaction whose code matches the source's first transaction is where the two
are aligned. Past the shared history, transactions are interleaved by date.

Transactions on the same date are ordered by their ID, RID, or FITID keys. Give
every transaction a unique ID key; without one, partial files cannot be synced
and full files cannot be ordered deterministically. An ambiguous order is an
error and no output is written.";

#[derive(Parser, Debug)]
#[command(
    name = "zipper",
    about = "Merge a master ledger with a partially overlapping source ledger",
    version,
    after_long_help = AFTER_HELP,
)]
pub struct Cli {
    /// File to write the merged ledger to
    pub dest: PathBuf,
    /// Authoritative ledger whose history wins through the overlap
    pub master: PathBuf,
    /// Ledger to fold into the master
    pub source: PathBuf,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// `zipper help ...` asks for usage rather than naming a destination.
    pub fn usage_requested(&self) -> bool {
        self.dest.as_os_str() == "help"
    }
}

pub fn print_usage() -> anyhow::Result<()> {
    Cli::command().print_long_help()?;
    Ok(())
}

/// Help requests and missing arguments print usage and succeed; other
/// argument errors exit through clap.
pub fn handle_parse_error(err: clap::Error) -> anyhow::Result<()> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::MissingRequiredArgument => print_usage(),
        ErrorKind::DisplayVersion => {
            print!("{err}");
            Ok(())
        }
        _ => err.exit(),
    }
}
