use thiserror::Error;

/// Failures surfaced by the stream-endpoint layer. Command handlers translate
/// these into FTP reply codes; only control-channel failures end a session.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("socket I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot resolve {host}:{port}")]
    Resolve { host: String, port: u16 },

    #[error("cannot connect to {host}:{port}")]
    Connect { host: String, port: u16 },

    #[error("no bindable address for port {port}")]
    Bind { port: u16 },

    #[error("no usable port in {min}..={max}")]
    NoUsablePort { min: u16, max: u16 },

    #[error("data channel is not open")]
    NotOpen,
}
