use portprobe::codec::{
    decode_sntp_reply, encode_dns_probe, encode_sntp_request, match_dns_reply, SNTP_PACKET_LEN,
};

#[test]
fn sntp_request_layout() {
    let packet = encode_sntp_request();
    assert_eq!(packet.len(), SNTP_PACKET_LEN);
    assert_eq!(packet[0], (2 << 3) | 3);
    assert!(packet[1..].iter().all(|&b| b == 0));
}

#[test]
fn sntp_reply_rejects_wrong_length() {
    assert!(decode_sntp_reply(&[]).is_none());
    assert!(decode_sntp_reply(&[0u8; 47]).is_none());
    assert!(decode_sntp_reply(&[0u8; 49]).is_none());
}

#[test]
fn sntp_reply_extracts_transmit_seconds() {
    let mut payload = [0u8; 48];
    payload[40..44].copy_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
    let reply = decode_sntp_reply(&payload).unwrap();
    assert_eq!(reply.transmit_secs, 0xDEAD_BEEF);
}

#[test]
fn dns_probe_bytes_are_fixed() {
    let expected: &[u8] = &[
        0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, b'a', b'n',
        b'y', b't', b'a', b's', b'k', 0x04, b'u', b'r', b'g', b'u', 0x03, b'o', b'r', b'g', 0x00,
        0x00, 0x01, 0x00, 0x01,
    ];
    assert_eq!(encode_dns_probe(), expected);
}

#[test]
fn dns_reply_matching() {
    let sent = encode_dns_probe();

    // Echoed transaction id, response code 0
    let reply = [0x00, 0x01, 0x81, 0x80, 0x00, 0x01];
    assert!(match_dns_reply(&sent, &reply));

    // Response code 9 is still within the defined range
    let reply = [0x00, 0x01, 0x81, 0x89];
    assert!(match_dns_reply(&sent, &reply));

    // Mismatched transaction id
    let reply = [0x00, 0x02, 0x81, 0x80];
    assert!(!match_dns_reply(&sent, &reply));

    // Response code nibble out of range
    let reply = [0x00, 0x01, 0x81, 0x8A];
    assert!(!match_dns_reply(&sent, &reply));

    // Too short to carry a response code
    let reply = [0x00, 0x01, 0x81];
    assert!(!match_dns_reply(&sent, &reply));
}
