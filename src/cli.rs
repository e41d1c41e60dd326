use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    about = concat!(env!("CARGO_CRATE_NAME"), " - minimalistic social feed client"),
)]
pub struct Flags {
    /// load session fixtures from a JSON file instead of the built-in seed
    #[arg(short, long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

impl Flags {
    /// Parse from `std::env::args_os()`, exit on error.
    // Wraps `clap::Parser` logic without direct trait imports
    pub fn from_args() -> Self {
        Self::parse()
    }
}
