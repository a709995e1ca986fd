use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::core_vfs;
use crate::session::Session;
use log::debug;

pub async fn handle_cwd_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    let candidate = if arg.is_empty() {
        String::new()
    } else if arg.starts_with('/') {
        core_vfs::normalize(arg)
    } else {
        core_vfs::normalize(&format!("{}/{}", session.user_working_dir, arg))
    };

    let host_path = format!("/{}/{}", session.user_native_home, candidate);
    if core_vfs::is_directory(&host_path).await {
        debug!("working directory now {:?}", candidate);
        session.user_working_dir = candidate;
        session
            .write_ctrl(replies::FILE_ACTION_COMPLETED, "Directory change okay")
            .await
    } else {
        session
            .write_ctrl(replies::FILE_UNAVAILABLE, "Failed to change directory")
            .await
    }
}
