use crate::config::Config;
use crate::core_net::{self, NetFamily};
use crate::session::Session;
use anyhow::{Context, Result};
use log::{error, info, warn};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Binds the control listener and fans accepted connections out to session
/// tasks. Sessions are registered in a [`JoinSet`] so finished tasks are
/// reaped as the loop runs and outstanding ones can be awaited on shutdown.
pub async fn run(config: Arc<Config>) -> Result<()> {
    let port = config.server.listen_port;
    let listener = core_net::listen(port, config.server.backlog, NetFamily::Unspecified)
        .with_context(|| format!("failed to bind control listener on port {}", port))?;
    info!(
        "server listening on {} ({:?})",
        listener.local_addr()?,
        listener.family()
    );

    let mut sessions = JoinSet::new();
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(endpoint) => {
                    if let Ok(peer) = endpoint.peer_addr() {
                        info!("new connection from {} ({:?})", peer, endpoint.family());
                    }
                    let config = Arc::clone(&config);
                    sessions.spawn(async move {
                        let mut session = Session::new(endpoint, config);
                        if let Err(e) = session.run().await {
                            warn!("session ended with error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("accept failed: {}", e);
                }
            },
            Some(finished) = sessions.join_next() => {
                if let Err(e) = finished {
                    error!("session task failed: {}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(
                    "shutdown requested, waiting for {} active session(s)",
                    sessions.len()
                );
                break;
            }
        }
    }

    while let Some(finished) = sessions.join_next().await {
        if let Err(e) = finished {
            error!("session task failed: {}", e);
        }
    }
    info!("server stopped");
    Ok(())
}
