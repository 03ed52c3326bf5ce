use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::recognize::{classify_banner, classify_http_reply};
use crate::types::{Protocol, TcpState};

const BANNER_BUF_LEN: usize = 512;
const HTTP_PROBE: &[u8] = b"GET / HTTP/1.1\r\n\r\n";

/// Connect to the port and opportunistically identify the service behind it.
/// Mail-family servers greet on connect; HTTP servers stay silent until
/// asked, so a quiet connection gets one synthetic request before we give up.
pub async fn tcp_probe(addr: IpAddr, port: u16, timeout_ms: u64) -> (TcpState, Option<Protocol>) {
    let target = SocketAddr::new(addr, port);
    let window = Duration::from_millis(timeout_ms);

    let mut stream = match timeout(window, TcpStream::connect(target)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            debug!(port, error = %e, "tcp connect failed");
            return (TcpState::Closed, None);
        }
        Err(_) => return (TcpState::Closed, None),
    };

    let mut buf = [0u8; BANNER_BUF_LEN];
    match timeout(window, stream.read(&mut buf)).await {
        Ok(Ok(n)) if n > 0 => {
            let banner = String::from_utf8_lossy(&buf[..n]);
            (TcpState::Open, classify_banner(&banner))
        }
        Ok(Ok(_)) => (TcpState::Open, None),
        Ok(Err(e)) => {
            debug!(port, error = %e, "banner read failed");
            (TcpState::Open, None)
        }
        Err(_) => {
            // No greeting within the window; it may still be HTTP.
            if stream.write_all(HTTP_PROBE).await.is_err() {
                return (TcpState::Open, None);
            }
            match timeout(window, stream.read(&mut buf)).await {
                Ok(Ok(n)) if n > 0 => {
                    let reply = String::from_utf8_lossy(&buf[..n]);
                    (TcpState::Open, classify_http_reply(&reply))
                }
                _ => (TcpState::Open, None),
            }
        }
    }
}
