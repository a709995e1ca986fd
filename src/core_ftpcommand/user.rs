use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::session::Session;
use log::info;

pub async fn handle_user_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    if !session.logged_in {
        session.username = arg.to_string();
        session
            .write_ctrl(replies::NEED_PASSWORD, "Please specify the password")
            .await
    } else if session.username == arg {
        session
            .write_ctrl(replies::NEED_PASSWORD, "Any password will do")
            .await
    } else {
        info!(
            "user {} attempted to relogin as {}",
            session.username, arg
        );
        session
            .write_ctrl(replies::USER_NOT_LOGGED_IN, "Can't change to another user")
            .await
    }
}
