use crate::core_ftpcommand::replies;
use crate::core_net::{NetError, NetFamily};
use crate::session::Session;
use log::{info, warn};

/// Handles the EPSV command (RFC 2428). `EPSV ALL` locks the session into
/// extended passive mode for its remaining lifetime; `EPSV 1`/`EPSV 2`
/// allocate a listener for the requested family.
pub async fn handle_epsv_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    if arg.is_empty() {
        return session
            .write_ctrl(
                replies::COMMAND_ARGS_NOT_RECOGNIZED,
                "EPSV command args not recognized",
            )
            .await;
    }

    let family = match arg {
        "ALL" => {
            info!("session locked to EPSV");
            session.epsv_exclusive = true;
            return session
                .write_ctrl(replies::ENTERING_EXTENDED_PASSIVE_MODE, "EPSV ALL ok")
                .await;
        }
        "1" => NetFamily::V4,
        "2" => NetFamily::V6,
        _ => {
            return session
                .write_ctrl(
                    replies::PROTOCOL_NOT_SUPPORTED,
                    "Protocol not supported. use (1,2)",
                )
                .await;
        }
    };

    let (min, max) = session.pasv_port_range();
    match session.dtp.setup_passive_scan(min, max, family) {
        Ok(port) => {
            info!("EPSV listener on port {} ({:?})", port, family);
            let text = format!("Entering extended passive mode (|||{}|)", port);
            session
                .write_ctrl(replies::ENTERING_EXTENDED_PASSIVE_MODE, &text)
                .await
        }
        Err(e) => {
            warn!("EPSV port scan failed: {}", e);
            session
                .write_ctrl(
                    replies::CANNOT_OPEN_DATA_CONNECTION,
                    "Failed open data connection",
                )
                .await
        }
    }
}
