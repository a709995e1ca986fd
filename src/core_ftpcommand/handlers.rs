use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::{
    cdup, cwd, eprt, epsv, list, pass, pasv, port, pwd, quit, retr, stor, type_, user,
};
use crate::core_net::NetError;
use crate::session::Session;

/// Routes a parsed verb to its handler. The caller has already enforced the
/// login gate; an error from here means the control channel itself failed.
pub async fn dispatch_command(
    session: &mut Session,
    command: FtpCommand,
    arg: &str,
) -> Result<(), NetError> {
    match command {
        FtpCommand::USER => user::handle_user_command(session, arg).await,
        FtpCommand::PASS => pass::handle_pass_command(session, arg).await,
        FtpCommand::QUIT => quit::handle_quit_command(session, arg).await,
        FtpCommand::TYPE => type_::handle_type_command(session, arg).await,
        FtpCommand::PWD => pwd::handle_pwd_command(session, arg).await,
        FtpCommand::CWD => cwd::handle_cwd_command(session, arg).await,
        FtpCommand::CDUP => cdup::handle_cdup_command(session, arg).await,
        FtpCommand::PORT => port::handle_port_command(session, arg).await,
        FtpCommand::EPRT => eprt::handle_eprt_command(session, arg).await,
        FtpCommand::PASV => pasv::handle_pasv_command(session, arg).await,
        FtpCommand::EPSV => epsv::handle_epsv_command(session, arg).await,
        FtpCommand::LIST => list::handle_list_command(session, arg).await,
        FtpCommand::RETR => retr::handle_retr_command(session, arg).await,
        FtpCommand::STOR => stor::handle_stor_command(session, arg).await,
    }
}
