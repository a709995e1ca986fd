mod config;
mod constants;
mod core_auth;
mod core_cli;
mod core_dtp;
mod core_ftpcommand;
mod core_log;
mod core_net;
mod core_vfs;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // startup failures report on stdout and exit cleanly; once the server is
    // up, everything goes through the log file
    if let Err(e) = run(args).await {
        println!("{:#}", e);
    }
    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    core_log::init(&args.log_file)?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    config.server.listen_port = args.port;
    if let Some(accounts) = args.accounts {
        config.server.accounts_file = accounts;
    }

    server::run(Arc::new(config)).await
}
