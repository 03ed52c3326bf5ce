use std::net::IpAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use portprobe::probes::tcp_probe;
use portprobe::types::{Protocol, TcpState};

fn localhost() -> IpAddr {
    "127.0.0.1".parse().unwrap()
}

#[tokio::test]
async fn silent_server_answering_get_is_http() {
    // HTTP servers send no greeting; the prober must fall back to a
    // synthetic GET after the banner window expires.
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 512];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n")
                .await;
        }
    });

    let (state, protocol) = tcp_probe(localhost(), port, 300).await;
    assert_eq!(state, TcpState::Open);
    assert_eq!(protocol, Some(Protocol::Http));
}

#[tokio::test]
async fn fully_silent_server_stays_unknown() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((_socket, _)) = listener.accept().await {
            // Accept and say nothing until the prober gives up.
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
    });

    let (state, protocol) = tcp_probe(localhost(), port, 300).await;
    assert_eq!(state, TcpState::Open);
    assert_eq!(protocol, None);
}

#[tokio::test]
async fn non_http_reply_to_get_stays_unknown() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 512];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(b"begone\r\n").await;
        }
    });

    let (state, protocol) = tcp_probe(localhost(), port, 300).await;
    assert_eq!(state, TcpState::Open);
    assert_eq!(protocol, None);
}
