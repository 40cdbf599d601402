//! Local IP discovery for startup logs and status payloads.

use std::net::UdpSocket;

/// Best-effort local IP detection. Connecting a UDP socket to a public
/// address picks the outbound interface without sending any packets.
/// Falls back to "localhost" when the machine has no route.
pub fn detect_local_ip() -> String {
    if let Ok(socket) = UdpSocket::bind("0.0.0.0:0") {
        if socket.connect("8.8.8.8:80").is_ok() {
            if let Ok(addr) = socket.local_addr() {
                return addr.ip().to_string();
            }
        }
    }
    "localhost".to_string()
}
