use crate::core_ftpcommand::replies;
use crate::core_ftpcommand::utils::receive_over_data_channel;
use crate::core_net::NetError;
use crate::session::Session;
use log::{info, warn};
use tokio::fs::File;

/// Handles the STOR command: create (or truncate) the target and fill it
/// from the data channel. Uploads are stored byte-verbatim regardless of the
/// transfer mode.
pub async fn handle_stor_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    let native_path = session.resolve_virtual(arg);

    let file = match File::create(&native_path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("STOR cannot create {:?}: {}", native_path, e);
            return session
                .write_ctrl(replies::LOCAL_ERROR, "Failed to create file")
                .await;
        }
    };

    info!("receiving file {:?}", native_path);
    receive_over_data_channel(
        session,
        "Open data connection for file transfer",
        "Data connection close file sent OK",
        file,
    )
    .await
}
