use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "ferroftpd", about = "A small FTP server written in Rust.")]
pub struct Cli {
    /// File the server appends its log to
    pub log_file: String,

    /// Port for the control-channel listener
    pub port: u16,

    /// Path to the accounts file (defaults to `accounts`)
    #[arg(short, long)]
    pub accounts: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}
