use crate::core_net::NetError;
use log::debug;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpListener, TcpSocket, TcpStream};

/// Network family of a stream endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetFamily {
    #[default]
    Unspecified,
    V4,
    V6,
}

/// An owned, connected TCP endpoint tagged with its network family.
///
/// Ownership is unique-move: dropping the endpoint closes the descriptor.
#[derive(Debug)]
pub struct Endpoint {
    stream: TcpStream,
    family: NetFamily,
}

/// An owned listening socket produced by [`listen`].
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    family: NetFamily,
}

/// Binds a passive (any-address) listener for the requested family, with
/// address reuse enabled. `Unspecified` tries IPv6 dual-stack first, then
/// falls back to IPv4.
pub fn listen(port: u16, backlog: u32, family: NetFamily) -> Result<Listener, NetError> {
    let candidates: Vec<SocketAddr> = match family {
        NetFamily::V4 => vec![(Ipv4Addr::UNSPECIFIED, port).into()],
        NetFamily::V6 => vec![(Ipv6Addr::UNSPECIFIED, port).into()],
        NetFamily::Unspecified => vec![
            (Ipv6Addr::UNSPECIFIED, port).into(),
            (Ipv4Addr::UNSPECIFIED, port).into(),
        ],
    };

    for addr in candidates {
        let socket = match if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        } {
            Ok(socket) => socket,
            Err(_) => continue,
        };

        let usable = socket.set_reuseaddr(true).is_ok() && socket.bind(addr).is_ok();
        if !usable {
            continue;
        }

        match socket.listen(backlog) {
            Ok(inner) => {
                let family = if addr.is_ipv4() {
                    NetFamily::V4
                } else {
                    NetFamily::V6
                };
                return Ok(Listener { inner, family });
            }
            Err(_) => continue,
        }
    }

    Err(NetError::Bind { port })
}

impl Listener {
    /// Waits for an inbound connection. The returned endpoint's family is
    /// IPv4 iff the peer address is IPv4.
    pub async fn accept(&self) -> Result<Endpoint, NetError> {
        let (stream, peer) = self.inner.accept().await?;
        debug!("accepted connection from {}", peer);
        let family = if peer.is_ipv4() {
            NetFamily::V4
        } else {
            NetFamily::V6
        };
        Ok(Endpoint { stream, family })
    }

    pub fn family(&self) -> NetFamily {
        self.family
    }

    pub fn local_addr(&self) -> Result<SocketAddr, NetError> {
        Ok(self.inner.local_addr()?)
    }
}

impl Endpoint {
    /// Resolves `host:port` for both families and connects to the first
    /// address that answers.
    pub async fn connect(host: &str, port: u16) -> Result<Endpoint, NetError> {
        let addrs = lookup_host((host, port)).await.map_err(|_| NetError::Resolve {
            host: host.to_string(),
            port,
        })?;

        for addr in addrs {
            if let Ok(stream) = TcpStream::connect(addr).await {
                let family = if addr.is_ipv4() {
                    NetFamily::V4
                } else {
                    NetFamily::V6
                };
                return Ok(Endpoint { stream, family });
            }
        }

        Err(NetError::Connect {
            host: host.to_string(),
            port,
        })
    }

    pub fn family(&self) -> NetFamily {
        self.family
    }

    pub fn peer_addr(&self) -> Result<SocketAddr, NetError> {
        Ok(self.stream.peer_addr()?)
    }

    /// Printable local IP of this endpoint. A v4-mapped address on a v6
    /// socket is unwrapped to its IPv4 form.
    pub fn local_ip(&self) -> Result<String, NetError> {
        let addr = self.stream.local_addr()?;
        let ip = match addr.ip() {
            IpAddr::V6(v6) => v6
                .to_ipv4_mapped()
                .map(IpAddr::V4)
                .unwrap_or(IpAddr::V6(v6)),
            v4 => v4,
        };
        Ok(ip.to_string())
    }

    /// Writes the whole buffer, looping over partial writes. A broken pipe
    /// surfaces as an error rather than a signal.
    pub async fn write(&mut self, buf: &[u8]) -> Result<(), NetError> {
        self.stream.write_all(buf).await?;
        Ok(())
    }

    /// Reads until `buf` is full or EOF, returning the byte count (0 on
    /// clean EOF).
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, NetError> {
        let mut read_so_far = 0;
        while read_so_far < buf.len() {
            let n = self.stream.read(&mut buf[read_so_far..]).await?;
            if n == 0 {
                break;
            }
            read_so_far += n;
        }
        Ok(read_so_far)
    }

    /// Reads one byte at a time into `buf` until a newline, `cap` bytes, or
    /// EOF. Returns the count including the newline when present.
    pub async fn read_line(&mut self, buf: &mut Vec<u8>, cap: usize) -> Result<usize, NetError> {
        buf.clear();
        let mut byte = [0u8; 1];
        while buf.len() < cap {
            let n = self.stream.read(&mut byte).await?;
            if n == 0 {
                break;
            }
            buf.push(byte[0]);
            if byte[0] == b'\n' {
                break;
            }
        }
        Ok(buf.len())
    }

    /// Waits up to `timeout_ms` for the endpoint to become readable.
    /// `Ok(true)` means readable, `Ok(false)` means the timeout expired.
    pub async fn poll_readable(&self, timeout_ms: u64) -> Result<bool, NetError> {
        match tokio::time::timeout(Duration::from_millis(timeout_ms), self.stream.readable()).await
        {
            Ok(Ok(())) => Ok(true),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Ok(false),
        }
    }
}
