use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "portprobe",
    about = "Recognizes opened TCP and UDP ports on a host. A protocol on a port \
             can also be recognized if it is one of NTP, DNS, SMTP, FTP, POP3, HTTP. \
             Notations: \"+\" opened, \"-\" closed, \"f\" filtering UDP ports, \"?\" unknown."
)]
pub struct Cli {
    /// Host address to scan
    pub host: String,

    /// Ports to scan (0-65535); values outside the range are skipped with a warning
    #[arg(value_name = "PORT", allow_negative_numbers = true)]
    pub ports: Vec<i64>,
}

impl Cli {
    pub fn parse() -> Self {
        Parser::parse()
    }
}
