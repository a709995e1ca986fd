use crate::core_dtp::TransferMode;
use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::session::Session;
use log::debug;

/// Handles the TYPE command. Only ASCII (`a`/`A`) and BINARY (`i`/`I`) are
/// supported; EBCDIC and local byte-size modes are not offered.
pub async fn handle_type_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    if arg.is_empty() {
        return session
            .write_ctrl(
                replies::COMMAND_ARGS_NOT_RECOGNIZED,
                "Cannot recognize code type",
            )
            .await;
    }

    match arg {
        "a" | "A" => {
            session.dtp.set_mode(TransferMode::Ascii);
            debug!("transfer mode now {:?}", session.dtp.mode());
            session
                .write_ctrl(replies::COMMAND_OK, "Switch to ASCII mode")
                .await
        }
        "i" | "I" => {
            session.dtp.set_mode(TransferMode::Binary);
            debug!("transfer mode now {:?}", session.dtp.mode());
            session
                .write_ctrl(replies::COMMAND_OK, "Switch to BINARY mode")
                .await
        }
        other => {
            session
                .write_ctrl(
                    replies::COMMAND_NOT_IMPLEMENTED_FOR_ARGS,
                    &format!("Type {} not implemented", other),
                )
                .await
        }
    }
}
