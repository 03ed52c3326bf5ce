use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::net::lookup_host;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::probes::{tcp_probe, udp_probe};
use crate::report;
use crate::types::{PortResult, ScanConfig};

pub async fn run(cli: Cli) -> Result<()> {
    println!("Analysing...");
    let results = scan_host(&cli.host, &cli.ports, &ScanConfig::default()).await?;
    report::print_table(&cli.host, &results);
    Ok(())
}

/// Fan the requested ports out over a bounded worker budget and collect the
/// finished records in the order the ports were supplied. Each port gets its
/// own task and its own sockets; the join below is the only synchronization.
pub async fn scan_host(host: &str, ports: &[i64], config: &ScanConfig) -> Result<Vec<PortResult>> {
    let addr = resolve_ipv4(host).await?;

    let valid: Vec<u16> = ports
        .iter()
        .filter_map(|&requested| match u16::try_from(requested) {
            Ok(port) => Some(port),
            Err(_) => {
                warn!(port = requested, "incorrect port, skipping");
                None
            }
        })
        .collect();

    let semaphore = Arc::new(Semaphore::new(config.concurrency));
    let progress = ProgressBar::new(valid.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut handles = Vec::with_capacity(valid.len());
    for &port in &valid {
        let semaphore = semaphore.clone();
        let progress = progress.clone();
        let timeout_ms = config.timeout_ms;
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("scan semaphore closed");
            let result = analyze_port(addr, port, timeout_ms).await;
            progress.inc(1);
            result
        }));
    }

    let mut results = Vec::with_capacity(valid.len());
    for (joined, port) in join_all(handles).await.into_iter().zip(valid) {
        match joined {
            Ok(result) => results.push(result),
            Err(e) => {
                debug!(port, error = %e, "port analysis task failed");
                results.push(PortResult::new(port));
            }
        }
    }
    progress.finish_and_clear();

    Ok(results)
}

/// One port's analysis unit: TCP pass, then UDP pass, sequentially. The
/// probes use different socket families, so ordering only affects latency.
pub async fn analyze_port(addr: IpAddr, port: u16, timeout_ms: u64) -> PortResult {
    let mut result = PortResult::new(port);

    let (tcp, protocol) = tcp_probe(addr, port, timeout_ms).await;
    result.tcp = tcp;
    if let Some(protocol) = protocol {
        result.protocol = protocol;
    }

    let (udp, protocol) = udp_probe(addr, port, timeout_ms).await;
    result.udp = udp;
    if let Some(protocol) = protocol {
        result.protocol = protocol;
    }

    result
}

async fn resolve_ipv4(host: &str) -> Result<IpAddr> {
    let addrs = lookup_host((host, 0u16))
        .await
        .with_context(|| format!("cannot resolve host {host}"))?;
    addrs
        .map(|sa| sa.ip())
        .find(|ip| ip.is_ipv4())
        .with_context(|| format!("no IPv4 address found for {host}"))
}
