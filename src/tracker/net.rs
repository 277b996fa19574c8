use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::lookup_host;
use tokio::time::timeout;

use super::error::TrackerError;

/// Awaits `fut`, bounded by `limit` when one is configured.
pub(crate) async fn timed<F, T>(
    limit: Option<Duration>,
    phase: &'static str,
    fut: F,
) -> Result<T, TrackerError>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(limit) => timeout(limit, fut)
            .await
            .map_err(|_| TrackerError::Timeout(phase))?
            .map_err(TrackerError::Io),
        None => fut.await.map_err(TrackerError::Io),
    }
}

/// Resolves `host:port` to the first address the resolver returns.
pub(crate) async fn resolve_addr(
    host: &str,
    port: u16,
    limit: Option<Duration>,
) -> Result<SocketAddr, TrackerError> {
    let mut addrs = match timed(limit, "name resolution", lookup_host((host, port))).await {
        Ok(addrs) => addrs,
        Err(TrackerError::Io(e)) => return Err(TrackerError::Resolve(format!("{host}: {e}"))),
        Err(e) => return Err(e),
    };

    addrs
        .next()
        .ok_or_else(|| TrackerError::Resolve(host.to_string()))
}
