use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::Write;

/// Initializes the logger with a `[timestamp] [LEVEL] message` line format,
/// appending to the log file named on the command line. The filter defaults
/// to `info` and follows `RUST_LOG` as usual.
pub fn init(log_file: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Cannot open file {}", log_file))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
