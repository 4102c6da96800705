//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "steam-appmanifest")]
#[command(version)]
#[command(about = "Queue owned Steam games for download by writing app manifests")]
pub struct Args {
    /// Profile vanity name, SteamID64 or profile URL (falls back to the config file)
    pub profile: Option<String>,

    /// Only consider games whose title contains this text (case-insensitive)
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Toggle the selection of this app id (repeatable)
    #[arg(short, long = "app", value_name = "APPID")]
    pub apps: Vec<String>,

    /// Select every game matching --search
    #[arg(long)]
    pub all: bool,

    /// Steam library directory (the `steamapps` folder) to write into
    #[arg(short, long, value_name = "PATH")]
    pub library: Option<PathBuf>,

    /// List matching games and exit without writing anything
    #[arg(long)]
    pub list: bool,

    /// Print detected Steam libraries and exit
    #[arg(long)]
    pub list_libraries: bool,

    /// Feed request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
