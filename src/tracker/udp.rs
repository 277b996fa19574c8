use std::net::SocketAddr;
use std::time::Duration;

use rand::Rng as _;
use tokio::net::UdpSocket;
use tracing::{debug, trace};

use super::endpoint::{Endpoint, Transport};
use super::error::TrackerError;
use super::net::{resolve_addr, timed};
use super::packet::{
    error_message, ConnectRequest, ConnectResponse, ResponseHeader, ScrapeRequest, ScrapeResponse,
};
use super::response::ScrapeResult;
use crate::config::ScrapeConfig;
use crate::constants::{UDP_ACTION_CONNECT, UDP_ACTION_ERROR, UDP_ACTION_SCRAPE, UDP_RECV_BUFFER_SIZE};
use crate::metainfo::InfoHash;

/// One UDP association with a tracker.
///
/// Each request is sent once; a timeout on either round trip ends the
/// attempt.
pub struct UdpTracker {
    socket: UdpSocket,
    addr: SocketAddr,
    timeout: Option<Duration>,
}

impl UdpTracker {
    pub async fn bind(addr: SocketAddr, timeout: Option<Duration>) -> Result<Self, TrackerError> {
        let local = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(addr).await?;

        Ok(Self {
            socket,
            addr,
            timeout,
        })
    }

    /// Performs the connect handshake and returns the server-issued
    /// connection id.
    pub async fn connect(&self) -> Result<u64, TrackerError> {
        let transaction_id: u32 = rand::rng().random();
        let request = ConnectRequest { transaction_id };

        let response = self.round_trip(&request.encode(), "connect").await?;

        check_error_action(&response, transaction_id)?;
        let reply = ConnectResponse::decode(&response).ok_or_else(|| {
            TrackerError::BadConnectResponse(format!("short reply of {} bytes", response.len()))
        })?;

        if reply.action != UDP_ACTION_CONNECT || reply.transaction_id != transaction_id {
            return Err(TrackerError::BadConnectResponse(format!(
                "transaction_id={:x}, expected={:x}, action={}",
                reply.transaction_id, transaction_id, reply.action
            )));
        }

        Ok(reply.connection_id)
    }

    pub async fn scrape(
        &self,
        connection_id: u64,
        info_hash: &InfoHash,
    ) -> Result<ScrapeResult, TrackerError> {
        let transaction_id: u32 = rand::rng().random();
        let request = ScrapeRequest {
            connection_id,
            transaction_id,
            info_hash: *info_hash.as_bytes(),
        };

        let response = self.round_trip(&request.encode(), "scrape").await?;

        check_error_action(&response, transaction_id)?;
        let reply = ScrapeResponse::decode(&response).ok_or_else(|| {
            TrackerError::BadScrapeResponse(format!("short reply of {} bytes", response.len()))
        })?;

        if reply.action != UDP_ACTION_SCRAPE || reply.transaction_id != transaction_id {
            return Err(TrackerError::BadScrapeResponse(format!(
                "transaction_id={:x}, expected={:x}, action={}",
                reply.transaction_id, transaction_id, reply.action
            )));
        }

        Ok(ScrapeResult {
            seeders: reply.seeders,
            completed: reply.completed,
            leechers: reply.leechers,
        })
    }

    async fn round_trip(&self, request: &[u8], phase: &'static str) -> Result<Vec<u8>, TrackerError> {
        timed(self.timeout, phase, self.socket.send(request)).await?;

        let mut buf = vec![0u8; UDP_RECV_BUFFER_SIZE];
        let n = timed(self.timeout, phase, self.socket.recv(&mut buf)).await?;
        buf.truncate(n);
        trace!(phase, sent = request.len(), received = n, "udp round trip");

        Ok(buf)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// Turns a matching error-action reply into [`TrackerError::TrackerFailure`].
fn check_error_action(response: &[u8], transaction_id: u32) -> Result<(), TrackerError> {
    match ResponseHeader::decode(response) {
        Some(header)
            if header.action == UDP_ACTION_ERROR && header.transaction_id == transaction_id =>
        {
            Err(TrackerError::TrackerFailure(error_message(response)))
        }
        _ => Ok(()),
    }
}

/// Scrapes one info hash from a UDP tracker: connect, then scrape, over a
/// single socket.
pub async fn scrape_udp(
    endpoint: &Endpoint,
    info_hash: &InfoHash,
    config: &ScrapeConfig,
) -> Result<ScrapeResult, TrackerError> {
    if endpoint.transport != Transport::Udp {
        return Err(TrackerError::UnsupportedProtocol(endpoint.to_string()));
    }

    let addr = resolve_addr(&endpoint.host, endpoint.port, config.timeout).await?;
    let tracker = UdpTracker::bind(addr, config.timeout).await?;

    let connection_id = tracker.connect().await?;
    debug!(%addr, connection_id, "udp tracker connected");

    tracker.scrape(connection_id, info_hash).await
}
