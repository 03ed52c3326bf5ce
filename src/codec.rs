//! Wire formats for the UDP probes: the 48-byte SNTP client request/reply
//! and the fixed DNS liveness query. Pure byte work, no sockets.

pub const SNTP_PACKET_LEN: usize = 48;

// Leap indicator 0, version and client mode packed into the first byte.
const SNTP_CLIENT_FLAGS: u8 = (2 << 3) | 3;

// Transmit timestamp starts at byte 40; its first four bytes are the
// whole-seconds word.
const TRANSMIT_SECS_RANGE: std::ops::Range<usize> = 40..44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SntpReply {
    pub transmit_secs: u32,
}

/// Client request: flags byte set, every other field zero.
pub fn encode_sntp_request() -> [u8; SNTP_PACKET_LEN] {
    let mut packet = [0u8; SNTP_PACKET_LEN];
    packet[0] = SNTP_CLIENT_FLAGS;
    packet
}

/// Accepts only exactly 48-byte payloads and extracts the transmit
/// timestamp's whole-seconds word.
pub fn decode_sntp_reply(payload: &[u8]) -> Option<SntpReply> {
    if payload.len() != SNTP_PACKET_LEN {
        return None;
    }
    let secs = payload[TRANSMIT_SECS_RANGE].try_into().ok()?;
    Some(SntpReply {
        transmit_secs: u32::from_be_bytes(secs),
    })
}

/// Fixed A-record query for anytask.urgu.org, sent as a secondary liveness
/// probe when the SNTP probe elicits no reply. The bytes are part of the
/// tool's wire contract and must not change.
pub fn encode_dns_probe() -> Vec<u8> {
    // Transaction ID
    let mut packet = vec![0x00, 0x01];
    // Flags: standard query, recursion desired
    packet.extend_from_slice(&[0x01, 0x00]);
    // QDCOUNT = 1
    packet.extend_from_slice(&[0x00, 0x01]);
    // ANCOUNT, NSCOUNT, ARCOUNT = 0
    packet.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

    for label in ["anytask", "urgu", "org"] {
        packet.push(label.len() as u8);
        packet.extend_from_slice(label.as_bytes());
    }
    packet.push(0x00); // end of QNAME

    // QTYPE = A
    packet.extend_from_slice(&[0x00, 0x01]);
    // QCLASS = IN
    packet.extend_from_slice(&[0x00, 0x01]);

    packet
}

/// A reply counts as DNS when it echoes our transaction id and carries a
/// response code nibble in the defined 0..=9 range.
pub fn match_dns_reply(sent: &[u8], received: &[u8]) -> bool {
    if sent.len() < 2 || received.len() <= 3 {
        return false;
    }
    received[..2] == sent[..2] && (received[3] & 0x0F) <= 9
}
