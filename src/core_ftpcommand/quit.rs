use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::session::Session;
use log::info;

/// Marks the session for exit; the command loop stops after the reply is
/// flushed.
pub async fn handle_quit_command(session: &mut Session, _arg: &str) -> Result<(), NetError> {
    info!("session quitting");
    session.quit = true;
    session.write_ctrl(replies::SERVICE_CLOSING, "Goodbye").await
}
