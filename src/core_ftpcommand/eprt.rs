use crate::core_ftpcommand::replies;
use crate::core_net::{NetError, NetFamily};
use crate::session::Session;
use log::info;

/// Handles the EPRT command (`|proto|addr|port|`, RFC 2428): like PORT but
/// carrying an explicit protocol family and a literal address.
pub async fn handle_eprt_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    if session.epsv_exclusive {
        return session
            .write_ctrl(replies::FILE_UNAVAILABLE, "Can only accept EPSV")
            .await;
    }

    let Some(fields) = split_eprt_fields(arg) else {
        return session
            .write_ctrl(
                replies::COMMAND_ARGS_NOT_RECOGNIZED,
                "EPRT command args not recognized",
            )
            .await;
    };

    let family = match fields[0] {
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

    let Ok(port) = fields[2].parse::<u16>() else {
        return session
            .write_ctrl(
                replies::COMMAND_ARGS_NOT_RECOGNIZED,
                "EPRT command args not recognized",
            )
            .await;
    };

    info!("EPRT receiver {}:{} ({:?})", fields[1], port, family);
    session.dtp.setup_active(fields[1], port, family);
    session
        .write_ctrl(
            replies::COMMAND_OK,
            "EPRT Command successful. Consider using EPSV",
        )
        .await
}

/// The argument must be delimited by `|` on both ends and carry exactly
/// three fields in between.
fn split_eprt_fields(arg: &str) -> Option<[&str; 3]> {
    if arg.len() < 2 || !arg.starts_with('|') || !arg.ends_with('|') {
        return None;
    }

    let mut fields = arg[1..arg.len() - 1].split('|');
    let proto = fields.next()?;
    let addr = fields.next()?;
    let port = fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some([proto, addr, port])
}
