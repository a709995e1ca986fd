use crate::config::Config;
use crate::constants::LINE_MAX;
use crate::core_dtp::Dtp;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::handlers::dispatch_command;
use crate::core_ftpcommand::replies;
use crate::core_net::{Endpoint, NetError};
use crate::core_vfs;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

/// One FTP session: the protocol interpreter state for a single accepted
/// control connection. The owning task is the only task that ever touches
/// it, so control-channel replies are naturally serialized.
pub struct Session {
    pub control: Endpoint,
    pub config: Arc<Config>,
    pub accounts_path: PathBuf,
    pub username: String,
    /// Host-filesystem path acting as the session's virtual root; empty
    /// until login succeeds.
    pub user_native_home: String,
    /// Virtual working directory relative to the home, always in
    /// `normalize` form; empty means the virtual root.
    pub user_working_dir: String,
    /// Set by `EPSV ALL`, never cleared: PORT, EPRT and PASV are refused
    /// for the rest of the session.
    pub epsv_exclusive: bool,
    pub logged_in: bool,
    pub quit: bool,
    pub dtp: Dtp,
}

impl Session {
    pub fn new(control: Endpoint, config: Arc<Config>) -> Self {
        let accounts_path = PathBuf::from(&config.server.accounts_file);
        Self {
            control,
            config,
            accounts_path,
            username: String::new(),
            user_native_home: String::new(),
            user_working_dir: String::new(),
            epsv_exclusive: false,
            logged_in: false,
            quit: false,
            dtp: Dtp::new(),
        }
    }

    /// The PI command loop: greet, then read-dispatch-reply until QUIT,
    /// idle timeout, clean EOF, or a control-channel failure.
    pub async fn run(&mut self) -> Result<(), NetError> {
        self.write_ctrl(replies::SERVICE_READY, "Service ready").await?;

        let idle_timeout_ms = self.config.server.idle_timeout_ms;
        let mut line = Vec::with_capacity(LINE_MAX);

        loop {
            match self.control.poll_readable(idle_timeout_ms).await {
                Ok(true) => {}
                Ok(false) | Err(_) => {
                    info!("session idle timeout");
                    let _ = self
                        .write_ctrl(replies::SERVICE_UNAVAILABLE, "Time out")
                        .await;
                    break;
                }
            }

            let n = self.control.read_line(&mut line, LINE_MAX).await?;
            if n == 0 {
                info!("control connection closed by peer");
                break;
            }
            if n == LINE_MAX && line.last() != Some(&b'\n') {
                self.drain_overlong_line().await?;
                self.write_ctrl(replies::COMMAND_NOT_RECOGNIZED, "Command too long")
                    .await?;
                continue;
            }

            let raw = String::from_utf8_lossy(&line);
            let trimmed = raw
                .strip_suffix('\n')
                .map(|t| t.strip_suffix('\r').unwrap_or(t))
                .unwrap_or(&raw)
                .trim_end();
            if trimmed.is_empty() {
                self.write_ctrl(replies::COMMAND_NOT_RECOGNIZED, "Command empty")
                    .await?;
                continue;
            }

            let (verb, arg) = match trimmed.split_once(' ') {
                Some((verb, rest)) => (verb, rest.trim()),
                None => (trimmed, ""),
            };
            let verb = verb.to_ascii_uppercase();
            debug!(
                "<- {} {}",
                verb,
                if verb == "PASS" { "****" } else { arg }
            );

            match FtpCommand::from_str(&verb) {
                Some(command) if command.is_login() || self.logged_in => {
                    dispatch_command(self, command, arg).await?;
                }
                Some(_) => {
                    self.write_ctrl(replies::USER_NOT_LOGGED_IN, "Not logged in")
                        .await?;
                }
                None => {
                    self.write_ctrl(replies::COMMAND_NOT_RECOGNIZED, "Unrecognized command")
                        .await?;
                }
            }

            if self.quit {
                break;
            }
        }

        Ok(())
    }

    /// Single-line reply: `<code> SP <text> CRLF`.
    pub async fn write_ctrl(&mut self, code: u16, text: &str) -> Result<(), NetError> {
        let reply = format!("{} {}\r\n", code, text);
        debug!("-> {}", reply.trim_end());
        self.control.write(reply.as_bytes()).await
    }

    /// Maps a client path onto the host filesystem, anchored under the
    /// session's native home.
    pub fn resolve_virtual(&self, virtual_path: &str) -> String {
        core_vfs::resolve(&self.user_native_home, &self.user_working_dir, virtual_path)
    }

    pub fn pasv_port_range(&self) -> (u16, u16) {
        (
            self.config.server.pasv_port_min,
            self.config.server.pasv_port_max,
        )
    }

    /// Eats the remainder of a line that blew the cap, so the next
    /// `read_line` starts on a fresh command.
    async fn drain_overlong_line(&mut self) -> Result<(), NetError> {
        let mut rest = Vec::with_capacity(LINE_MAX);
        loop {
            let n = self.control.read_line(&mut rest, LINE_MAX).await?;
            if n == 0 || rest.last() == Some(&b'\n') {
                return Ok(());
            }
        }
    }
}
