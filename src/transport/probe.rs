//! Proxy reachability probe.

use std::time::Duration;

use tokio::net::TcpStream;

use crate::error_handling::ProbeError;

/// Attempts a bare TCP connect to `proxy_addr`, bounded by `timeout`.
///
/// No SOCKS or HTTP traffic is exchanged; the connection is closed as soon
/// as it is established.
///
/// # Errors
///
/// Returns [`ProbeError::Unreachable`] if the connect fails and
/// [`ProbeError::Timeout`] if it does not complete in time.
pub async fn check_proxy_reachable(proxy_addr: &str, timeout: Duration) -> Result<(), ProbeError> {
    match tokio::time::timeout(timeout, TcpStream::connect(proxy_addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            log::debug!("Proxy at {} is accepting connections", proxy_addr);
            Ok(())
        }
        Ok(Err(source)) => Err(ProbeError::Unreachable {
            addr: proxy_addr.to_string(),
            source,
        }),
        Err(_) => Err(ProbeError::Timeout {
            addr: proxy_addr.to_string(),
            timeout,
        }),
    }
}
