//! TCP connect probing.
//!
//! A probe is a full three-way handshake against `(host, port)`. Name
//! resolution and the connect run as one operation bounded by the probe
//! timeout, so a slow resolver counts against the same budget as a slow SYN.

use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use sweep_common::network::probe::ProbeResult;
use tokio::net::{self, TcpStream};
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::Prober;

/// Production [`Prober`] backed by tokio's `TcpStream`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeResult {
        handshake_probe(host, port, timeout).await
    }
}

/// Why a connect attempt did not produce a stream.
#[derive(Debug)]
enum ConnectError {
    /// `connect()` itself failed: refused, unreachable, filtered and so on.
    Connection(io::Error),
    /// The attempt never reached the wire: resolution or local resources.
    Fault(String),
}

impl From<io::Error> for ConnectError {
    fn from(e: io::Error) -> Self {
        if is_local_fault(&e) {
            ConnectError::Fault(e.to_string())
        } else {
            ConnectError::Connection(e)
        }
    }
}

/// Attempts one handshake and classifies the outcome.
///
/// Connection-layer failures and timeouts are both reported as closed.
/// The socket is closed before this returns on every path.
pub async fn handshake_probe(host: &str, port: u16, probe_timeout: Duration) -> ProbeResult {
    let start = Instant::now();
    let attempt = timeout(probe_timeout, connect(host, port)).await;
    let elapsed = start.elapsed();

    match attempt {
        Ok(Ok(stream)) => {
            drop(stream);
            ProbeResult::open(port, elapsed)
        }
        Ok(Err(ConnectError::Connection(e))) => {
            trace!(port, error = %e, "connection failed");
            ProbeResult::closed(port, elapsed)
        }
        Ok(Err(ConnectError::Fault(detail))) => ProbeResult::error(port, detail),
        Err(_elapsed) => {
            trace!(port, "connect timed out");
            ProbeResult::closed(port, elapsed)
        }
    }
}

async fn connect(host: &str, port: u16) -> Result<TcpStream, ConnectError> {
    let addr = resolve(host, port).await?;
    Ok(TcpStream::connect(addr).await?)
}

/// Resolves `host`, preferring an IPv4 address when both families are offered.
async fn resolve(host: &str, port: u16) -> Result<SocketAddr, ConnectError> {
    let addrs: Vec<SocketAddr> = net::lookup_host((host, port))
        .await
        .map_err(|e| ConnectError::Fault(format!("failed to resolve {host}: {e}")))?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| ConnectError::Fault(format!("no address found for {host}")))
}

/// `ENFILE` and `EMFILE`: no descriptor left to open the socket with.
#[cfg(unix)]
const DESCRIPTOR_EXHAUSTION: &[i32] = &[23, 24];
/// `WSAEMFILE`.
#[cfg(windows)]
const DESCRIPTOR_EXHAUSTION: &[i32] = &[10024];
#[cfg(not(any(unix, windows)))]
const DESCRIPTOR_EXHAUSTION: &[i32] = &[];

/// Errors raised on this host before a SYN could be sent.
///
/// Everything else `connect()` reports is a connection-layer failure.
fn is_local_fault(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::AddrNotAvailable | ErrorKind::OutOfMemory | ErrorKind::Other
    ) || e
        .raw_os_error()
        .is_some_and(|code| DESCRIPTOR_EXHAUSTION.contains(&code))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use sweep_common::network::probe::PortStatus;
    use tokio::net::TcpListener;

    const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

    /// Returns a loopback port that nothing listens on.
    async fn unused_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn handshake_probe_should_report_listening_port_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let result = handshake_probe("127.0.0.1", port, PROBE_TIMEOUT).await;

        assert_eq!(result.port, port);
        assert_eq!(result.status, PortStatus::Open);
        assert!(result.response_time.unwrap() >= 0.0);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn handshake_probe_should_report_unbound_port_closed() {
        let port = unused_port().await;

        let result = handshake_probe("127.0.0.1", port, PROBE_TIMEOUT).await;

        assert_eq!(result.status, PortStatus::Closed);
        assert!(result.response_time.is_some());
    }

    #[tokio::test]
    async fn tcp_prober_delegates_to_handshake() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let result = TcpProber.probe("localhost", port, PROBE_TIMEOUT).await;
        assert!(result.is_open());
    }

    fn is_closed(e: io::Error) -> bool {
        matches!(ConnectError::from(e), ConnectError::Connection(_))
    }

    #[test]
    fn io_errors_are_split_by_layer() {
        for kind in [
            ErrorKind::ConnectionRefused,
            ErrorKind::ConnectionReset,
            ErrorKind::HostUnreachable,
            ErrorKind::NetworkUnreachable,
            ErrorKind::NetworkDown,
            ErrorKind::PermissionDenied,
            ErrorKind::TimedOut,
        ] {
            assert!(is_closed(io::Error::from(kind)), "{kind:?}");
        }

        assert!(!is_closed(io::Error::other("too many open files")));
        assert!(!is_closed(io::Error::from(ErrorKind::AddrNotAvailable)));
        assert!(!is_closed(io::Error::from(ErrorKind::OutOfMemory)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn every_connect_errno_is_closed_except_local_exhaustion() {
        // EPERM, EACCES, ENETDOWN, ENETRESET, EHOSTDOWN
        for errno in [1, 13, 100, 102, 112] {
            assert!(is_closed(io::Error::from_raw_os_error(errno)), "errno {errno}");
        }
        // ENFILE, EMFILE, EADDRNOTAVAIL
        for errno in [23, 24, 99] {
            assert!(!is_closed(io::Error::from_raw_os_error(errno)), "errno {errno}");
        }
    }

    #[tokio::test]
    #[ignore]
    async fn handshake_probe_should_flag_unresolvable_host() {
        let result = handshake_probe("host.invalid", 80, Duration::from_secs(5)).await;
        assert_eq!(result.status, PortStatus::Error);
        assert!(result.error.unwrap().contains("host.invalid"));
    }
}
