//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the cart demo
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Script fixture to replay against the cart
    #[clap(short, long, default_value = "checkout")]
    pub script: String,

    /// Directory the cart is persisted in; in-memory storage if omitted
    #[clap(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Cart configuration file (YAML)
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Clear any persisted cart before replaying the script
    #[clap(long)]
    pub fresh: bool,
}
