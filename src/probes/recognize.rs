//! Pure protocol classifiers. Each probe stage hands its bytes here and
//! gets back at most one recognized protocol, so the heuristics stay
//! testable without sockets.

use chrono::{Datelike, Utc};

use crate::codec;
use crate::types::Protocol;

// Whole-seconds-per-year approximation used by the NTP year check. It
// ignores leap years and drifts near year boundaries; the check is a coarse
// sanity filter, not a date comparison.
const SECS_PER_YEAR: u32 = 31_536_000;

/// Mail-family services greet unsolicited; the greeting is enough to tell
/// them apart.
pub fn classify_banner(banner: &str) -> Option<Protocol> {
    if banner.starts_with("220") {
        let banner = banner.to_lowercase();
        if banner.contains("smtp") {
            return Some(Protocol::Smtp);
        }
        if banner.contains("ftp") {
            return Some(Protocol::Ftp);
        }
        None
    } else if banner.starts_with("+OK") {
        Some(Protocol::Pop3)
    } else {
        None
    }
}

pub fn classify_http_reply(reply: &str) -> Option<Protocol> {
    reply.starts_with("HTTP").then_some(Protocol::Http)
}

/// Classify a UDP reply against the request that provoked it. An SNTP-shaped
/// payload whose transmit timestamp lands in the current calendar year reads
/// as NTP; a reply echoing our transaction id with a valid response code
/// reads as DNS. The DNS check runs second and wins if both fire.
pub fn recognize_datagram(payload: &[u8], sent: &[u8]) -> Option<Protocol> {
    let mut protocol = None;

    if let Some(reply) = codec::decode_sntp_reply(payload) {
        let year = (reply.transmit_secs / SECS_PER_YEAR + 1900) as i32;
        if year == Utc::now().year() {
            protocol = Some(Protocol::Ntp);
        }
    }

    if codec::match_dns_reply(sent, payload) {
        protocol = Some(Protocol::Dns);
    }

    protocol
}
