use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "docnav")]
#[command(about = "Replay navigation against documentation sidebars")]
pub(crate) struct Args {
    /// JSON array of sidebars to seed the store with
    #[arg(long, value_name = "FILE")]
    pub(crate) seed: PathBuf,

    /// JSON file with sidebar options
    #[arg(long, value_name = "FILE")]
    pub(crate) options: Option<PathBuf>,

    /// JSON array of steps to replay; prints the initial state when absent
    #[arg(long, value_name = "FILE")]
    pub(crate) script: Option<PathBuf>,

    /// Key/value storage file, defaults to the user config directory
    #[arg(long, value_name = "FILE")]
    pub(crate) storage: Option<PathBuf>,

    /// Override the project used to namespace persisted state
    #[arg(long, value_name = "NAME")]
    pub(crate) project: Option<String>,
}
