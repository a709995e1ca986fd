use crate::core_auth::{AccountStore, AuthError};
use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::core_vfs;
use crate::session::Session;
use log::{info, warn};

pub async fn handle_pass_command(session: &mut Session, arg: &str) -> Result<(), NetError> {
    if session.logged_in {
        return session
            .write_ctrl(replies::USER_LOGGED_IN, "Already logged in")
            .await;
    }
    if session.username.is_empty() {
        return session
            .write_ctrl(replies::BAD_SEQUENCE, "Login with USER first")
            .await;
    }

    let store = AccountStore::new(&session.accounts_path);
    match store.authenticate(&session.username, arg).await {
        Ok(account) => {
            session.logged_in = true;
            session.user_native_home = core_vfs::normalize(&account.home_dir);
            session.user_working_dir.clear();
            info!(
                "user {} logged in, home {:?}",
                account.username, session.user_native_home
            );
            session
                .write_ctrl(replies::USER_LOGGED_IN, "User logged in, proceed")
                .await
        }
        Err(AuthError::StoreUnavailable(_)) => {
            session
                .write_ctrl(replies::USER_NOT_LOGGED_IN, "Accounts file not found")
                .await
        }
        Err(AuthError::BadCredentials(_)) => {
            warn!("failed login for user {}", session.username);
            session.logged_in = false;
            session.username.clear();
            session
                .write_ctrl(replies::USER_NOT_LOGGED_IN, "Login incorrect")
                .await
        }
    }
}
