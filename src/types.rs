use std::fmt;

pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_WORKERS: usize = 20;

/// Knobs threaded from the orchestrator into every prober.
#[derive(Debug, Clone, Copy)]
pub struct ScanConfig {
    pub timeout_ms: u64,
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            concurrency: DEFAULT_WORKERS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TcpState {
    #[default]
    Unknown,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UdpState {
    #[default]
    Unknown,
    Open,
    Closed,
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Unknown,
    Ntp,
    Dns,
    Smtp,
    Ftp,
    Pop3,
    Http,
}

impl fmt::Display for TcpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TcpState::Unknown => "?",
            TcpState::Open => "+",
            TcpState::Closed => "-",
        })
    }
}

impl fmt::Display for UdpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UdpState::Unknown => "?",
            UdpState::Open => "+",
            UdpState::Closed => "-",
            UdpState::Filtered => "f",
        })
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Protocol::Unknown => "?",
            Protocol::Ntp => "NTP",
            Protocol::Dns => "DNS",
            Protocol::Smtp => "SMTP",
            Protocol::Ftp => "FTP",
            Protocol::Pop3 => "POP3",
            Protocol::Http => "HTTP",
        })
    }
}

/// One row of the final report. Populated exclusively by the port's own
/// analysis task; the TCP pass runs before the UDP pass, and the UDP pass
/// may overwrite the recognized protocol.
#[derive(Debug, Clone, Copy)]
pub struct PortResult {
    pub port: u16,
    pub tcp: TcpState,
    pub udp: UdpState,
    pub protocol: Protocol,
}

impl PortResult {
    pub fn new(port: u16) -> Self {
        Self {
            port,
            tcp: TcpState::Unknown,
            udp: UdpState::Unknown,
            protocol: Protocol::Unknown,
        }
    }
}
