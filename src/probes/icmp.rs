//! Raw ICMP side-channel for the UDP prober. A UDP probe against a closed
//! port provokes a destination-unreachable datagram; intercepting it is the
//! only reliable negative signal UDP gives us.

use std::io;
use std::mem::MaybeUninit;
use std::time::Duration;

use pnet::packet::icmp::destination_unreachable::IcmpCodes;
use pnet::packet::icmp::{IcmpPacket, IcmpTypes};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::time::{sleep, timeout};
use tracing::debug;

/// Outcome of the privilege check for the raw socket. Opening one requires
/// CAP_NET_RAW or root; without it UDP probing degrades to Unknown.
pub enum IcmpCapability {
    Capable(IcmpListener),
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unreachable {
    Port,
    Other,
}

pub struct IcmpListener {
    socket: Socket,
}

impl IcmpListener {
    pub fn open() -> IcmpCapability {
        let socket = match Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4)) {
            Ok(s) => s,
            Err(e) => {
                if e.kind() != io::ErrorKind::PermissionDenied {
                    debug!(error = %e, "raw ICMP socket unavailable");
                }
                return IcmpCapability::Denied;
            }
        };
        if let Err(e) = socket.set_nonblocking(true) {
            debug!(error = %e, "cannot make raw ICMP socket non-blocking");
            return IcmpCapability::Denied;
        }
        IcmpCapability::Capable(IcmpListener { socket })
    }

    /// Wait up to `timeout_ms` for a destination-unreachable message,
    /// skipping unrelated ICMP traffic. `Ok(None)` means the window expired
    /// without an active rejection.
    pub async fn recv_unreachable(&self, timeout_ms: u64) -> io::Result<Option<Unreachable>> {
        let wait = timeout(Duration::from_millis(timeout_ms), async {
            let mut buf = vec![MaybeUninit::new(0u8); 1024];
            loop {
                match self.socket.recv(&mut buf) {
                    Ok(n) => {
                        let datagram: Vec<u8> = buf[..n]
                            .iter()
                            .map(|b| unsafe { b.assume_init() })
                            .collect();
                        if let Some(verdict) = parse_unreachable(&datagram) {
                            return Ok(verdict);
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                        sleep(Duration::from_millis(1)).await;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
        .await;

        match wait {
            Ok(Ok(verdict)) => Ok(Some(verdict)),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }
}

// The raw socket hands us the full IP datagram; walk past the variable-length
// header before reading the ICMP type and code.
fn parse_unreachable(datagram: &[u8]) -> Option<Unreachable> {
    let ip = Ipv4Packet::new(datagram)?;
    if ip.get_next_level_protocol() != IpNextHeaderProtocols::Icmp {
        return None;
    }
    let offset = ip.get_header_length() as usize * 4;
    let icmp = IcmpPacket::new(datagram.get(offset..)?)?;
    if icmp.get_icmp_type() != IcmpTypes::DestinationUnreachable {
        return None;
    }
    if icmp.get_icmp_code() == IcmpCodes::DestinationPortUnreachable {
        Some(Unreachable::Port)
    } else {
        Some(Unreachable::Other)
    }
}
