use std::fmt;

use super::error::TrackerError;
use crate::constants::{DEFAULT_HTTPS_PORT, DEFAULT_HTTP_PORT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Udp,
}

/// A tracker address derived from an announce URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub transport: Transport,
    /// `https://` URL; only meaningful for [`Transport::Http`].
    pub secure: bool,
    /// Host name or address, without IPv6 brackets.
    pub host: String,
    pub port: u16,
    /// Scrape path including any query string. Empty for UDP.
    pub path: String,
}

impl Endpoint {
    /// Resolves an announce URL into a scrape endpoint.
    ///
    /// For HTTP(S) the last path segment must begin with `announce`, which is
    /// rewritten to `scrape` ([BEP-48]), or already begin with `scrape`.
    /// UDP URLs must carry an explicit port.
    ///
    /// # Examples
    ///
    /// ```
    /// use rscrape::tracker::{Endpoint, Transport};
    ///
    /// let ep = Endpoint::resolve("http://tracker.example/announce").unwrap();
    /// assert_eq!(ep.transport, Transport::Http);
    /// assert_eq!(ep.port, 80);
    /// assert_eq!(ep.path, "/scrape");
    ///
    /// let ep = Endpoint::resolve("udp://tracker.example:6969/announce").unwrap();
    /// assert_eq!(ep.transport, Transport::Udp);
    /// assert!(Endpoint::resolve("udp://tracker.example/announce").is_err());
    /// ```
    ///
    /// [BEP-48]: http://bittorrent.org/beps/bep_0048.html
    pub fn resolve(url: &str) -> Result<Self, TrackerError> {
        let (transport, secure, rest) = if let Some(rest) = url.strip_prefix("http://") {
            (Transport::Http, false, rest)
        } else if let Some(rest) = url.strip_prefix("https://") {
            (Transport::Http, true, rest)
        } else if let Some(rest) = url.strip_prefix("udp://") {
            (Transport::Udp, false, rest)
        } else {
            return Err(TrackerError::UnsupportedProtocol(url.to_string()));
        };

        let (authority, path) = match rest.find(['/', '?']) {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        if authority.contains('@') {
            return Err(TrackerError::CredentialsInUrl(url.to_string()));
        }

        let (host, port) = split_host_port(authority, url)?;
        if host.is_empty() {
            return Err(TrackerError::InvalidUrl(url.to_string()));
        }

        let (port, path) = match transport {
            Transport::Http => {
                let default = if secure {
                    DEFAULT_HTTPS_PORT
                } else {
                    DEFAULT_HTTP_PORT
                };
                (port.unwrap_or(default), scrape_path(path)?)
            }
            Transport::Udp => (
                port.ok_or_else(|| TrackerError::MissingPort(url.to_string()))?,
                String::new(),
            ),
        };

        Ok(Self {
            transport,
            secure,
            host: host.to_string(),
            port,
            path,
        })
    }

    /// `host:port` as sent in the HTTP `Host` header.
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = match (self.transport, self.secure) {
            (Transport::Udp, _) => "udp",
            (Transport::Http, false) => "http",
            (Transport::Http, true) => "https",
        };
        write!(f, "{}://{}{}", scheme, self.authority(), self.path)
    }
}

fn split_host_port<'a>(
    authority: &'a str,
    url: &str,
) -> Result<(&'a str, Option<u16>), TrackerError> {
    let (host, port) = if let Some(bracketed) = authority.strip_prefix('[') {
        let (host, after) = bracketed
            .split_once(']')
            .ok_or_else(|| TrackerError::InvalidUrl(url.to_string()))?;
        match after {
            "" => (host, None),
            _ => match after.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => return Err(TrackerError::InvalidUrl(url.to_string())),
            },
        }
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    let port = match port {
        Some(text) => match text.parse::<u16>() {
            Ok(p) if p > 0 => Some(p),
            _ => return Err(TrackerError::InvalidPort(url.to_string())),
        },
        None => None,
    };

    Ok((host, port))
}

/// Rewrites `.../announce[suffix][?query]` to `.../scrape[suffix][?query]`.
fn scrape_path(path: &str) -> Result<String, TrackerError> {
    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };

    let slash = path
        .rfind('/')
        .ok_or_else(|| TrackerError::UnsupportedPath(path.to_string()))?;
    let (dir, segment) = path.split_at(slash + 1);

    let segment = if segment.starts_with("scrape") {
        segment.to_string()
    } else if let Some(suffix) = segment.strip_prefix("announce") {
        format!("scrape{suffix}")
    } else {
        return Err(TrackerError::UnsupportedPath(format!("/{segment}")));
    };

    let mut out = format!("{dir}{segment}");
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    Ok(out)
}
