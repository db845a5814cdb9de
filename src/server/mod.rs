use clap::Parser;

pub mod config;
pub mod http;
pub mod main;

/// Picture frame web server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Listen address, overrides the configuration (e.g. 0.0.0.0:8010)
    #[arg(short, long)]
    pub listen: Option<String>,
}
