use crate::core_ftpcommand::replies;
use crate::core_net::{NetError, NetFamily};
use crate::session::Session;
use log::{info, warn};
use std::net::Ipv4Addr;

/// Handles the PASV command: allocate a listener by walking the configured
/// port range downward and report the control socket's local IPv4 address
/// together with the chosen port as `h1,h2,h3,h4,p1,p2`.
pub async fn handle_pasv_command(session: &mut Session, _arg: &str) -> Result<(), NetError> {
    if session.epsv_exclusive {
        return session
            .write_ctrl(replies::FILE_UNAVAILABLE, "Can only accept EPSV")
            .await;
    }

    let local_ip = session.control.local_ip()?;
    let Ok(v4) = local_ip.parse::<Ipv4Addr>() else {
        warn!("PASV refused, control address {} is not IPv4", local_ip);
        return session
            .write_ctrl(
                replies::CANNOT_OPEN_DATA_CONNECTION,
                "Failed open data connection",
            )
            .await;
    };

    let (min, max) = session.pasv_port_range();
    match session.dtp.setup_passive_scan(min, max, NetFamily::V4) {
        Ok(port) => {
            info!("PASV listener on {}:{}", v4, port);
            let [h1, h2, h3, h4] = v4.octets();
            let text = format!(
                "Entering passive mode ({},{},{},{},{},{})",
                h1,
                h2,
                h3,
                h4,
                port >> 8,
                port & 0xFF
            );
            session
                .write_ctrl(replies::ENTERING_PASSIVE_MODE, &text)
                .await
        }
        Err(e) => {
            warn!("PASV port scan failed: {}", e);
            session
                .write_ctrl(
                    replies::CANNOT_OPEN_DATA_CONNECTION,
                    "Failed open data connection",
                )
                .await
        }
    }
}
