//! Tracker scrape protocol (BEP-15, BEP-48)
//!
//! Resolves announce URLs to scrape endpoints and asks HTTP or UDP trackers
//! for the seeder, completed and leecher counts of one info hash. The
//! orchestrator walks a torrent's announce tiers and stops at the first
//! tracker that answers.

mod endpoint;
mod error;
mod http;
mod net;
pub mod packet;
mod response;
mod scrape;
mod tiers;
mod udp;

pub use endpoint::{Endpoint, Transport};
pub use error::{ErrorKind, TrackerError};
pub use http::{build_request, parse_response, scrape_http};
pub use response::ScrapeResult;
pub use scrape::{scrape, scrape_all, scrape_first, scrape_torrent, total};
pub use tiers::TrackerList;
pub use udp::{scrape_udp, UdpTracker};
