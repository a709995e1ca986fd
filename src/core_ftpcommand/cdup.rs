use crate::core_ftpcommand::cwd::handle_cwd_command;
use crate::core_net::NetError;
use crate::session::Session;

/// CDUP is CWD to the parent of the working directory.
pub async fn handle_cdup_command(session: &mut Session, _arg: &str) -> Result<(), NetError> {
    handle_cwd_command(session, "..").await
}
