use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::ConnectionError;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// One-shot TCP payload sender. Every call opens its own connection,
/// writes the payload in full, and closes the stream on every exit
/// path; connections are never pooled or reused.
#[derive(Debug, Clone)]
pub struct TcpSender {
    connect_timeout: Duration,
}

/// Outcome of a successful send: every payload byte was accepted by
/// the transport. There is no application-level acknowledgment, so
/// this does not confirm remote processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub bytes_sent: usize,
}

impl Default for TcpSender {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl TcpSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_timeout(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Delivers `payload` over exactly one TCP connection attempt.
    ///
    /// Establishment failures surface as `Resolve`/`Connect`; failures
    /// after the stream is up surface as `Transfer` with the number of
    /// bytes the transport had accepted. No retry happens here.
    pub fn send(&self, endpoint: &Endpoint, payload: &[u8]) -> Result<Delivery, ConnectionError> {
        let addr = resolve(endpoint)?;
        let mut stream = TcpStream::connect_timeout(&addr, self.connect_timeout).map_err(
            |source| ConnectionError::Connect {
                endpoint: endpoint.to_string(),
                source,
            },
        )?;
        debug!(%endpoint, bytes = payload.len(), "connection established");

        let mut written = 0;
        while written < payload.len() {
            match stream.write(&payload[written..]) {
                Ok(0) => {
                    return Err(transfer_error(
                        endpoint,
                        written,
                        io::Error::new(
                            io::ErrorKind::WriteZero,
                            "connection closed before the payload was fully written",
                        ),
                    ));
                }
                Ok(n) => written += n,
                Err(source) if source.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(transfer_error(endpoint, written, source)),
            }
        }

        stream
            .flush()
            .and_then(|()| stream.shutdown(Shutdown::Write))
            .map_err(|source| transfer_error(endpoint, written, source))?;

        debug!(%endpoint, bytes = written, "payload delivered");
        Ok(Delivery {
            bytes_sent: written,
        })
    }
}

fn resolve(endpoint: &Endpoint) -> Result<SocketAddr, ConnectionError> {
    let mut addrs =
        (endpoint.host(), endpoint.port())
            .to_socket_addrs()
            .map_err(|source| ConnectionError::Resolve {
                endpoint: endpoint.to_string(),
                source,
            })?;
    addrs.next().ok_or_else(|| ConnectionError::Resolve {
        endpoint: endpoint.to_string(),
        source: io::Error::new(
            io::ErrorKind::NotFound,
            "host resolved to no addresses",
        ),
    })
}

fn transfer_error(endpoint: &Endpoint, bytes_sent: usize, source: io::Error) -> ConnectionError {
    ConnectionError::Transfer {
        endpoint: endpoint.to_string(),
        bytes_sent,
        source,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use super::*;

    fn local_endpoint(port: u16) -> Endpoint {
        Endpoint::new("127.0.0.1", port).expect("endpoint")
    }

    #[test]
    fn delivers_full_payload_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        let (tx, rx) = mpsc::channel();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut received = Vec::new();
            stream.read_to_end(&mut received).expect("read");
            tx.send(received).expect("send received bytes");
        });

        let payload = b"[{\"pais\":\"Brazil\"}]";
        let delivery = TcpSender::new()
            .send(&local_endpoint(port), payload)
            .expect("send failed");

        assert_eq!(delivery.bytes_sent, payload.len());
        assert_eq!(rx.recv().expect("receive"), payload);
        server.join().expect("server thread");
    }

    #[test]
    fn nothing_listening_is_an_establishment_failure() {
        // Bind then drop to obtain a local port with no listener.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };

        let err = TcpSender::with_connect_timeout(Duration::from_secs(2))
            .send(&local_endpoint(port), b"payload")
            .expect_err("send must fail");

        assert!(err.is_establishment_failure(), "unexpected error: {err:?}");
        assert!(matches!(err, ConnectionError::Connect { .. }));
    }

    #[test]
    fn peer_closing_mid_transfer_is_a_transfer_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();

        let server = thread::spawn(move || {
            // Accept and immediately drop the stream; the unread bytes
            // already in flight make the kernel reset the connection.
            let (stream, _) = listener.accept().expect("accept");
            drop(stream);
        });

        // Large enough that the socket buffers cannot absorb it all.
        let payload = vec![b'x'; 8 * 1024 * 1024];
        let err = TcpSender::new()
            .send(&local_endpoint(port), &payload)
            .expect_err("send must fail");

        assert!(!err.is_establishment_failure(), "unexpected error: {err:?}");
        assert!(matches!(err, ConnectionError::Transfer { .. }));
        server.join().expect("server thread");
    }
}
