use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use super::endpoint::{Endpoint, Transport};
use super::error::TrackerError;
use super::net::{resolve_addr, timed};
use super::response::ScrapeResult;
use crate::bencode::{decode_prefix, Value};
use crate::config::ScrapeConfig;
use crate::metainfo::InfoHash;

/// Scrapes one info hash from an HTTP tracker.
///
/// Sends a single `HTTP/1.0` GET with `Connection: close`, buffers the reply
/// until the tracker closes the connection, and reads the counts from the
/// bencoded body.
pub async fn scrape_http(
    endpoint: &Endpoint,
    info_hash: &InfoHash,
    config: &ScrapeConfig,
) -> Result<ScrapeResult, TrackerError> {
    if endpoint.transport != Transport::Http {
        return Err(TrackerError::UnsupportedProtocol(endpoint.to_string()));
    }
    if endpoint.secure {
        return Err(TrackerError::UnsupportedProtocol("https".into()));
    }

    let addr = resolve_addr(&endpoint.host, endpoint.port, config.timeout).await?;
    debug!(%addr, path = %endpoint.path, "http scrape");

    let mut stream = timed(config.timeout, "connect", TcpStream::connect(addr)).await?;

    let request = build_request(endpoint, info_hash, &config.user_agent);
    timed(config.timeout, "send", stream.write_all(request.as_bytes())).await?;

    let response = read_to_close(&mut stream, config).await?;
    trace!(bytes = response.len(), "http scrape response");

    parse_response(&response, info_hash)
}

/// Formats the scrape request, info hash percent-encoded into the query.
pub fn build_request(endpoint: &Endpoint, info_hash: &InfoHash, user_agent: &str) -> String {
    let separator = if endpoint.path.contains('?') { '&' } else { '?' };
    format!(
        "GET {}{}info_hash={} HTTP/1.0\r\n\
         Accept: */*\r\n\
         Connection: close\r\n\
         User-Agent: {}\r\n\
         Host: {}\r\n\r\n",
        endpoint.path,
        separator,
        urlencoding::encode_binary(info_hash.as_bytes()),
        user_agent,
        endpoint.authority(),
    )
}

async fn read_to_close(
    stream: &mut TcpStream,
    config: &ScrapeConfig,
) -> Result<Vec<u8>, TrackerError> {
    let mut response = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = timed(config.timeout, "receive", stream.read(&mut chunk)).await?;
        if n == 0 {
            return Ok(response);
        }
        response.extend_from_slice(&chunk[..n]);
        if response.len() > config.max_http_response {
            return Err(TrackerError::ResponseTooLarge(config.max_http_response));
        }
    }
}

/// Extracts scrape counts from a raw HTTP response.
///
/// The status line must be `HTTP/1.0 200` or `HTTP/1.1 200`. The body starts
/// after the first blank line (`\r\n\r\n`, or a bare `\n\n`) and must be a
/// bencoded dictionary of the form
/// `{"files": {<info hash>: {"complete", "downloaded", "incomplete"}}}`.
pub fn parse_response(response: &[u8], info_hash: &InfoHash) -> Result<ScrapeResult, TrackerError> {
    if !(response.starts_with(b"HTTP/1.0 200") || response.starts_with(b"HTTP/1.1 200")) {
        let status_line = response.split(|&b| b == b'\n').next().unwrap_or_default();
        return Err(TrackerError::BadStatus(
            String::from_utf8_lossy(status_line).trim_end().to_string(),
        ));
    }

    let body = find(response, b"\r\n\r\n")
        .map(|i| &response[i + 4..])
        .or_else(|| find(response, b"\n\n").map(|i| &response[i + 2..]))
        .ok_or_else(|| TrackerError::InvalidScrapeResponse("no end of headers".into()))?;

    let (root, _) = decode_prefix(body)
        .map_err(|e| TrackerError::InvalidScrapeResponse(format!("body: {e}")))?;

    if !root.is_dict() {
        return Err(TrackerError::InvalidScrapeResponse(format!(
            "body is a {}, expected dictionary",
            root.kind()
        )));
    }

    if let Some(reason) = root.get(b"failure reason") {
        let reason = reason
            .as_bytes()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .unwrap_or_default();
        return Err(TrackerError::TrackerFailure(reason));
    }

    let files = root
        .get(b"files")
        .filter(|f| f.is_dict())
        .ok_or_else(|| TrackerError::InvalidScrapeResponse("missing files dictionary".into()))?;

    let stats = files.get(info_hash.as_bytes()).ok_or_else(|| {
        TrackerError::InvalidScrapeResponse(format!("no entry for {info_hash}"))
    })?;

    Ok(ScrapeResult {
        seeders: count(stats, "complete")?,
        completed: count(stats, "downloaded")?,
        leechers: count(stats, "incomplete")?,
    })
}

fn count(stats: &Value, field: &'static str) -> Result<u32, TrackerError> {
    let value = stats
        .get(field.as_bytes())
        .and_then(Value::as_integer)
        .ok_or_else(|| TrackerError::InvalidScrapeResponse(format!("missing {field}")))?;

    u32::try_from(value)
        .map_err(|_| TrackerError::InvalidScrapeResponse(format!("{field} out of range: {value}")))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
