use crate::core_dtp::TransferError;
use crate::core_ftpcommand::replies;
use crate::core_net::NetError;
use crate::session::Session;
use log::{error, info};
use tokio::io::{AsyncRead, AsyncWrite};

/// Runs a download-direction transfer over the DTP: check the configuration,
/// open the data channel, announce with 150, stream `src`, close, confirm
/// with 226. Data-socket failures map to 426, local ones to 451.
///
/// The 150 reply always precedes the first data byte and the 226 reply
/// always follows the data-channel close.
pub async fn send_over_data_channel<R>(
    session: &mut Session,
    opening: &str,
    closing: &str,
    src: R,
) -> Result<(), NetError>
where
    R: AsyncRead + Unpin,
{
    if !open_data_channel(session).await? {
        return Ok(());
    }

    session.write_ctrl(replies::FILE_STATUS_OK, opening).await?;
    let result = session.dtp.write_from(src).await;
    session.dtp.close();
    finish_transfer(session, closing, result.map(|_| ())).await
}

/// Upload-direction counterpart of [`send_over_data_channel`]: receives the
/// data channel into `dst` byte-verbatim.
pub async fn receive_over_data_channel<W>(
    session: &mut Session,
    opening: &str,
    closing: &str,
    dst: W,
) -> Result<(), NetError>
where
    W: AsyncWrite + Unpin,
{
    if !open_data_channel(session).await? {
        return Ok(());
    }

    session.write_ctrl(replies::FILE_STATUS_OK, opening).await?;
    let result = session.dtp.read_into(dst).await;
    session.dtp.close();
    finish_transfer(session, closing, result.map(|_| ())).await
}

/// Returns false (after replying 425) when no data connection can be
/// established.
async fn open_data_channel(session: &mut Session) -> Result<bool, NetError> {
    if !session.dtp.is_configured() {
        session.dtp.close();
        session
            .write_ctrl(
                replies::CANNOT_OPEN_DATA_CONNECTION,
                "Failed open data connection",
            )
            .await?;
        return Ok(false);
    }

    if let Err(e) = session.dtp.open().await {
        error!("data connection open failed: {}", e);
        session.dtp.close();
        session
            .write_ctrl(
                replies::CANNOT_OPEN_DATA_CONNECTION,
                "Failed open data connection",
            )
            .await?;
        return Ok(false);
    }

    Ok(true)
}

async fn finish_transfer(
    session: &mut Session,
    closing: &str,
    result: Result<(), TransferError>,
) -> Result<(), NetError> {
    match result {
        Ok(()) => {
            info!("transfer finished");
            session
                .write_ctrl(replies::CLOSING_DATA_CONNECTION, closing)
                .await
        }
        Err(TransferError::Data(e)) => {
            error!("data connection dropped mid-transfer: {}", e);
            session
                .write_ctrl(
                    replies::TRANSFER_ABORTED,
                    "Data connection close transfer abort",
                )
                .await
        }
        Err(TransferError::Local(e)) => {
            error!("local I/O failed mid-transfer: {}", e);
            session
                .write_ctrl(replies::LOCAL_ERROR, "Data connection close local error")
                .await
        }
    }
}
