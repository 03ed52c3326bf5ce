use std::net::{IpAddr, SocketAddr};
use std::sync::Once;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::icmp::{IcmpCapability, IcmpListener, Unreachable};
use super::recognize::recognize_datagram;
use crate::codec;
use crate::types::{Protocol, UdpState};

const REPLY_BUF_LEN: usize = 1024;

static ICMP_DENIED: Once = Once::new();

/// Probe the port with an SNTP datagram and interpret whichever signal
/// arrives first: an ICMP rejection on the raw side channel, an application
/// reply on the UDP socket, or silence. UDP has no handshake, so silence on
/// the ICMP side is taken as evidence the port is open; a firewall that
/// drops instead of rejecting is indistinguishable from a listener.
pub async fn udp_probe(addr: IpAddr, port: u16, timeout_ms: u64) -> (UdpState, Option<Protocol>) {
    let listener = match IcmpListener::open() {
        IcmpCapability::Capable(listener) => listener,
        IcmpCapability::Denied => {
            ICMP_DENIED.call_once(|| {
                warn!("permission denied for raw ICMP socket, UDP information is unavailable");
            });
            return (UdpState::Unknown, None);
        }
    };

    let socket = match UdpSocket::bind("0.0.0.0:0").await {
        Ok(socket) => socket,
        Err(e) => {
            debug!(port, error = %e, "udp bind failed");
            return (UdpState::Unknown, None);
        }
    };

    let target = SocketAddr::new(addr, port);
    let request = codec::encode_sntp_request();
    if let Err(e) = socket.send_to(&request, target).await {
        debug!(port, error = %e, "udp send failed");
        return (UdpState::Closed, None);
    }

    match listener.recv_unreachable(timeout_ms).await {
        Ok(Some(Unreachable::Port)) => return (UdpState::Closed, None),
        Ok(Some(Unreachable::Other)) => return (UdpState::Filtered, None),
        Ok(None) => {}
        Err(e) => {
            debug!(port, error = %e, "icmp read failed");
            return (UdpState::Closed, None);
        }
    }
    // No rejection observed within the window. The raw socket is done;
    // release it before the application-layer read.
    drop(listener);

    let mut buf = [0u8; REPLY_BUF_LEN];
    let protocol = match timeout(Duration::from_millis(timeout_ms), socket.recv_from(&mut buf)).await
    {
        Ok(Ok((n, _))) => recognize_datagram(&buf[..n], &request),
        Ok(Err(e)) => {
            debug!(port, error = %e, "udp recv failed");
            None
        }
        Err(_) => probe_dns(&socket, target, timeout_ms).await,
    };

    (UdpState::Open, protocol)
}

/// Secondary liveness probe: a server that ignored the SNTP datagram may
/// still be a resolver.
async fn probe_dns(socket: &UdpSocket, target: SocketAddr, timeout_ms: u64) -> Option<Protocol> {
    let query = codec::encode_dns_probe();
    socket.send_to(&query, target).await.ok()?;

    let mut buf = [0u8; REPLY_BUF_LEN];
    match timeout(Duration::from_millis(timeout_ms), socket.recv_from(&mut buf)).await {
        Ok(Ok((n, _))) => recognize_datagram(&buf[..n], &query),
        _ => None,
    }
}
