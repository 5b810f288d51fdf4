//! Viewer Connection
//!
//! Owns the TCP socket to the viewer and pushes raw bytes through it.

use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{RewindError, Result};

/// Raw byte sink for finished envelopes.
///
/// Implementations do not retry or buffer; a failed write is final.
pub trait Transport {
    /// Write `bytes` in full
    fn send_raw(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).send_raw(bytes)
    }
}

/// Persistent TCP connection to the viewer
#[derive(Debug)]
pub struct Connection {
    /// Unbuffered stream; every envelope is a single write
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Open a blocking connection to `config.host:config.port`
    ///
    /// Tries every resolved address in turn and reports the last failure.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;
        let addr = config.addr();

        let addrs: Vec<SocketAddr> = addr
            .to_socket_addrs()
            .map_err(|source| RewindError::Connect {
                addr: addr.clone(),
                source,
            })?
            .collect();

        let mut last_err = std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            "host resolved to no addresses",
        );

        for sock_addr in addrs {
            let attempt = if config.connect_timeout_ms > 0 {
                TcpStream::connect_timeout(
                    &sock_addr,
                    Duration::from_millis(config.connect_timeout_ms),
                )
            } else {
                TcpStream::connect(sock_addr)
            };

            match attempt {
                Ok(stream) => return Self::from_stream(stream, config),
                Err(e) => {
                    tracing::debug!("Connect attempt to {} failed: {}", sock_addr, e);
                    last_err = e;
                }
            }
        }

        Err(RewindError::Connect {
            addr,
            source: last_err,
        })
    }

    /// Wrap an already-connected stream and apply socket options
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        tracing::info!("Connected to viewer at {}", peer_addr);

        Ok(Self { stream, peer_addr })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for Connection {
    fn send_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes).map_err(RewindError::Write)?;
        self.stream.flush().map_err(RewindError::Write)?;
        tracing::trace!("Sent {} bytes to {}", bytes.len(), self.peer_addr);
        Ok(())
    }
}
