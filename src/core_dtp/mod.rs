use crate::constants::{DATA_CHUNK, PASSIVE_BACKLOG};
use crate::core_net::{self, Endpoint, Listener, NetError, NetFamily};
use log::{debug, info};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Transfer mode negotiated with TYPE. The default is ASCII per RFC 959.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    #[default]
    Ascii,
    Binary,
}

/// Partition of data-transfer failures: `Data` is the data socket (maps to
/// 426 mid-transfer), `Local` is the file side (maps to 451).
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("data channel failed: {0}")]
    Data(#[from] NetError),

    #[error("local I/O failed: {0}")]
    Local(#[from] std::io::Error),
}

/// The Data Transfer Process: holds the data-channel configuration (active
/// receiver or passive listener), the transfer mode, and the open data
/// socket. Life cycle is Idle -> Configured -> Open -> Idle (on close);
/// `close` releases every owned endpoint and leaves only the mode behind.
#[derive(Debug, Default)]
pub struct Dtp {
    mode: TransferMode,
    configured: bool,
    active: bool,
    receiver_ip: String,
    port: u16,
    family: NetFamily,
    passive_listener: Option<Listener>,
    data_socket: Option<Endpoint>,
}

impl Dtp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Records the receiver the server will dial on `open` (PORT/EPRT).
    pub fn setup_active(&mut self, receiver_ip: &str, port: u16, family: NetFamily) {
        self.passive_listener = None;
        self.receiver_ip = receiver_ip.to_string();
        self.port = port;
        self.family = family;
        self.active = true;
        self.configured = true;
        debug!("DTP configured active towards {}:{}", receiver_ip, port);
    }

    /// Opens a listener on `port` that the client will dial (PASV/EPSV).
    pub fn setup_passive(&mut self, port: u16, family: NetFamily) -> Result<(), NetError> {
        let listener = core_net::listen(port, PASSIVE_BACKLOG, family)?;
        self.passive_listener = Some(listener);
        self.receiver_ip.clear();
        self.port = port;
        self.family = family;
        self.active = false;
        self.configured = true;
        debug!("DTP listening passively on port {}", port);
        Ok(())
    }

    /// Walks `max` down to `min` and keeps the first port that binds.
    /// Returns the chosen port.
    pub fn setup_passive_scan(
        &mut self,
        min: u16,
        max: u16,
        family: NetFamily,
    ) -> Result<u16, NetError> {
        for port in (min..=max).rev() {
            if self.setup_passive(port, family).is_ok() {
                return Ok(port);
            }
        }
        Err(NetError::NoUsablePort { min, max })
    }

    /// Establishes the data socket: dial the recorded receiver in active
    /// mode, accept one connection on the listener in passive mode.
    pub async fn open(&mut self) -> Result<(), NetError> {
        let socket = if self.active {
            Endpoint::connect(&self.receiver_ip, self.port).await?
        } else {
            let listener = self.passive_listener.as_ref().ok_or(NetError::NotOpen)?;
            listener.accept().await?
        };
        self.data_socket = Some(socket);
        Ok(())
    }

    /// Drops the listener and the data socket and clears the configuration.
    /// The transfer mode survives.
    pub fn close(&mut self) {
        self.passive_listener = None;
        self.data_socket = None;
        self.receiver_ip.clear();
        self.port = 0;
        self.family = NetFamily::Unspecified;
        self.active = false;
        self.configured = false;
    }

    /// Streams `src` to the data socket in the current transfer mode.
    /// Returns the number of bytes put on the wire.
    pub async fn write_from<R>(&mut self, src: R) -> Result<u64, TransferError>
    where
        R: AsyncRead + Unpin,
    {
        let socket = self.data_socket.as_mut().ok_or(NetError::NotOpen)?;
        let written = match self.mode {
            TransferMode::Binary => pump_binary(src, socket).await?,
            TransferMode::Ascii => pump_ascii(src, socket).await?,
        };
        info!("data channel: sent {} bytes", written);
        Ok(written)
    }

    /// Copies the data socket into `dst` until EOF, byte-verbatim.
    pub async fn read_into<W>(&mut self, dst: W) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Unpin,
    {
        let socket = self.data_socket.as_mut().ok_or(NetError::NotOpen)?;
        let read = pump_into(socket, dst).await?;
        info!("data channel: received {} bytes", read);
        Ok(read)
    }
}

/// Raw copy in fixed-size chunks until EOF on `src`.
async fn pump_binary<R>(mut src: R, dst: &mut Endpoint) -> Result<u64, TransferError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; DATA_CHUNK];
    let mut written = 0u64;
    loop {
        let n = src.read(&mut buf).await.map_err(TransferError::Local)?;
        if n == 0 {
            return Ok(written);
        }
        dst.write(&buf[..n]).await.map_err(TransferError::Data)?;
        written += n as u64;
    }
}

/// Line-oriented copy: the source is read as LF- or CRLF-delimited text and
/// every line goes on the wire terminated by exactly `\r\n`.
async fn pump_ascii<R>(src: R, dst: &mut Endpoint) -> Result<u64, TransferError>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(src);
    let mut line = Vec::with_capacity(DATA_CHUNK);
    let mut written = 0u64;
    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(TransferError::Local)?;
        if n == 0 {
            return Ok(written);
        }

        while line.last() == Some(&b'\n') || line.last() == Some(&b'\r') {
            line.pop();
        }
        line.extend_from_slice(b"\r\n");

        dst.write(&line).await.map_err(TransferError::Data)?;
        written += line.len() as u64;
    }
}

async fn pump_into<W>(src: &mut Endpoint, mut dst: W) -> Result<u64, TransferError>
where
    W: AsyncWrite + Unpin,
{
    let mut buf = [0u8; DATA_CHUNK];
    let mut read = 0u64;
    loop {
        let n = src.read(&mut buf).await.map_err(TransferError::Data)?;
        if n == 0 {
            dst.flush().await.map_err(TransferError::Local)?;
            return Ok(read);
        }
        dst.write_all(&buf[..n]).await.map_err(TransferError::Local)?;
        read += n as u64;
    }
}
