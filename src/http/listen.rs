//! Listen address resolution

use std::io;
use std::net::IpAddr;
use tokio::net::UdpSocket;
use tracing::warn;

/// Public address used only to pick a route; nothing is sent to it
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:80";

/// Address bound when detection fails
pub const FALLBACK_HOST: &str = "0.0.0.0";

/// Preferred outbound IP of this machine
///
/// Connecting a UDP socket selects the outgoing interface without sending
/// any packet.
pub async fn outbound_ip() -> io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(ROUTE_PROBE_ADDR).await?;
    Ok(socket.local_addr()?.ip())
}

/// Host to bind: the configured one, else the outbound IP, else all interfaces
pub async fn resolve_host(configured: Option<&str>) -> String {
    if let Some(host) = configured {
        return host.to_string();
    }

    match outbound_ip().await {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            warn!("Could not detect outbound IP ({}), binding {}", e, FALLBACK_HOST);
            FALLBACK_HOST.to_string()
        }
    }
}
