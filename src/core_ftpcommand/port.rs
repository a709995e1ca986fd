use crate::core_ftpcommand::replies;
use crate::core_net::{NetError, NetFamily};
use crate::session::Session;
use log::info;

/// Handles the PORT command: six decimal bytes `h1,h2,h3,h4,p1,p2` naming
/// the IPv4 receiver the server will dial for the next transfer.
pub async fn handle_port_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    if session.epsv_exclusive {
        return session
            .write_ctrl(replies::FILE_UNAVAILABLE, "Can only accept EPSV")
            .await;
    }

    let Some((receiver_ip, port)) = parse_host_port(arg) else {
        return session
            .write_ctrl(
                replies::COMMAND_ARGS_NOT_RECOGNIZED,
                "Cannot recognize IP address and port number",
            )
            .await;
    };

    info!("PORT receiver {}:{}", receiver_ip, port);
    session.dtp.setup_active(&receiver_ip, port, NetFamily::V4);
    session
        .write_ctrl(
            replies::COMMAND_OK,
            "PORT Command successful. Consider using PASV",
        )
        .await
}

/// `h1,h2,h3,h4,p1,p2` with every field in 0..=255; the port is
/// `p1 * 256 + p2`.
fn parse_host_port(arg: &str) -> Option<(String, u16)> {
    let fields: Vec<&str> = arg.split(',').collect();
    if fields.len() != 6 {
        return None;
    }

    let mut bytes = [0u8; 6];
    for (i, field) in fields.iter().enumerate() {
        bytes[i] = field.parse::<u8>().ok()?;
    }

    let receiver_ip = format!("{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3]);
    let port = u16::from(bytes[4]) << 8 | u16::from(bytes[5]);
    Some((receiver_ip, port))
}
