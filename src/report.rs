use colored::Colorize;

use crate::types::PortResult;

/// Operator-facing table, one row per requested port in input order.
/// The cell notation (`+`, `-`, `f`, `?`) is a fixed contract; only the
/// header is styled.
pub fn print_table(host: &str, results: &[PortResult]) {
    println!();
    println!("\tPorts of {}", host.bold());
    println!("--------------------------------");
    println!("Port\tTCP\tUDP\tProtocol");

    for result in results {
        println!(
            "{}\t{}\t{}\t{}",
            result.port, result.tcp, result.udp, result.protocol
        );
    }
}
