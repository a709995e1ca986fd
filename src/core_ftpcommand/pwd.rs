use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::session::Session;

pub async fn handle_pwd_command(session: &mut Session, _arg: &str) -> Result<(), NetError> {
    let text = format!(
        "\"/{}\" is the current directory",
        session.user_working_dir
    );
    session.write_ctrl(replies::PATHNAME_CREATED, &text).await
}
