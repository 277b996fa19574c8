use std::future::Future;

use tracing::{debug, warn};

use super::endpoint::{Endpoint, Transport};
use super::error::TrackerError;
use super::http::scrape_http;
use super::response::ScrapeResult;
use super::tiers::TrackerList;
use super::udp::scrape_udp;
use crate::config::ScrapeConfig;
use crate::metainfo::{InfoHash, Torrent};

/// Scrapes `info_hash` from the tracker at `url`, picking the client by
/// scheme.
///
/// # Examples
///
/// ```no_run
/// use rscrape::{scrape, InfoHash, ScrapeConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let hash: InfoHash = "c12fe1c06bba254a9dc9f519b335aa7c1367a88a".parse()?;
/// let config = ScrapeConfig::default().with_timeout_secs(10);
/// let counts = scrape("udp://tracker.example:6969/announce", &hash, &config).await?;
/// println!("{counts}");
/// # Ok(())
/// # }
/// ```
pub async fn scrape(
    url: &str,
    info_hash: &InfoHash,
    config: &ScrapeConfig,
) -> Result<ScrapeResult, TrackerError> {
    let endpoint = Endpoint::resolve(url)?;
    debug!(%endpoint, %info_hash, "scraping");

    match endpoint.transport {
        Transport::Http => scrape_http(&endpoint, info_hash, config).await,
        Transport::Udp => scrape_udp(&endpoint, info_hash, config).await,
    }
}

/// Runs `attempt` on each URL in order and stops at the first success.
///
/// Returns the winning URL with its result. When every attempt fails the
/// last error is returned; an empty list yields
/// [`TrackerError::NoTrackersAvailable`].
pub async fn scrape_first<F, Fut>(
    urls: &[String],
    mut attempt: F,
) -> Result<(String, ScrapeResult), TrackerError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ScrapeResult, TrackerError>>,
{
    let mut last_error = None;

    for url in urls {
        match attempt(url.clone()).await {
            Ok(result) => return Ok((url.clone(), result)),
            Err(e) => {
                warn!(url = %url, error = %e, "tracker attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(TrackerError::NoTrackersAvailable))
}

/// Builds the attempt list for `torrent` and scrapes until one tracker
/// answers.
pub async fn scrape_torrent(
    torrent: &Torrent<'_>,
    config: &ScrapeConfig,
) -> Result<(String, ScrapeResult), TrackerError> {
    let info_hash = torrent.info_hash()?;
    let trackers = TrackerList::from_torrent(torrent, config.max_trackers, &mut rand::rng());
    debug!(count = trackers.len(), %info_hash, "tracker list built");

    let info_hash = &info_hash;
    scrape_first(trackers.urls(), move |url| async move {
        scrape(&url, info_hash, config).await
    })
    .await
}

/// Scrapes every URL in turn, keeping each outcome.
pub async fn scrape_all(
    urls: &[String],
    info_hash: &InfoHash,
    config: &ScrapeConfig,
) -> Vec<(String, Result<ScrapeResult, TrackerError>)> {
    let mut outcomes = Vec::with_capacity(urls.len());
    for url in urls {
        let result = scrape(url, info_hash, config).await;
        if let Err(e) = &result {
            warn!(url = %url, error = %e, "tracker attempt failed");
        }
        outcomes.push((url.clone(), result));
    }
    outcomes
}

/// Sums the successful outcomes of [`scrape_all`], returning the number of
/// trackers that answered alongside the totals.
pub fn total<'a, I>(outcomes: I) -> (usize, ScrapeResult)
where
    I: IntoIterator<Item = &'a (String, Result<ScrapeResult, TrackerError>)>,
{
    outcomes
        .into_iter()
        .filter_map(|(_, result)| result.as_ref().ok())
        .fold((0, ScrapeResult::default()), |(n, mut sum), r| {
            sum += *r;
            (n + 1, sum)
        })
}
