use crate::core_ftpcommand::replies;
use crate::core_ftpcommand::utils::send_over_data_channel;
use crate::core_net::NetError;
use crate::core_vfs;
use crate::session::Session;
use log::{info, warn};
use tokio::fs::File;

/// Handles the RETR command: stream a regular file to the client through
/// the DTP in the current transfer mode.
pub async fn handle_retr_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    let native_path = session.resolve_virtual(arg);

    if !core_vfs::is_regular_file(&native_path).await {
        warn!("RETR refused, {:?} is not a regular file", native_path);
        return session
            .write_ctrl(replies::FILE_UNAVAILABLE, "Failed to open file")
            .await;
    }

    let file = match File::open(&native_path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("RETR cannot open {:?}: {}", native_path, e);
            return session
                .write_ctrl(replies::FILE_UNAVAILABLE, "Failed to open file")
                .await;
        }
    };

    info!("sending file {:?}", native_path);
    send_over_data_channel(
        session,
        "Open data connection for file transfer",
        "Data connection close file sent OK",
        file,
    )
    .await
}
