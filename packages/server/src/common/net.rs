use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};

/// Well-known external address used only to pick an outbound route.
const PROBE_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 80);

/// Best-effort discovery of this host's outbound-routable address.
///
/// Connecting a UDP socket sends no packets; it only makes the OS choose a
/// local address for the route. Falls back to loopback when no route exists.
pub fn outbound_local_ip() -> IpAddr {
    probe_local_ip(PROBE_ADDR).unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn probe_local_ip(target: SocketAddr) -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.connect(target)?;
    Ok(socket.local_addr()?.ip())
}
