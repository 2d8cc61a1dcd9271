//! Builds the identity this instance reports to callers

use std::net::{IpAddr, UdpSocket};

use tracing::warn;

use crate::config::AppSettings;
use crate::domain::AppIdentity;

const UNKNOWN_ADDRESS: &str = "[unknown]";

/// Identity from settings, detecting the local address unless an identifier is configured
pub fn resolve_identity(settings: &AppSettings) -> AppIdentity {
    let identifier = settings.identifier.clone().unwrap_or_else(|| {
        let address = local_address()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());
        format!("{} running at {}", settings.name, address)
    });

    AppIdentity::new(&settings.version, identifier, &settings.pod_name)
}

/// Address of the interface holding the default route; connecting a UDP socket sends nothing
fn local_address() -> Option<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;

    match socket.connect("10.255.255.255:1").and_then(|_| socket.local_addr()) {
        Ok(addr) if !addr.ip().is_unspecified() => Some(addr.ip()),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "Cannot detect local address");
            None
        }
    }
}
