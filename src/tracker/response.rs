use std::fmt;
use std::ops::AddAssign;

/// Aggregate counts a tracker reports for one info hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeResult {
    /// Peers holding the complete content (`complete`).
    pub seeders: u32,
    /// Number of finished downloads ever reported (`downloaded`).
    pub completed: u32,
    /// Peers still downloading (`incomplete`).
    pub leechers: u32,
}

impl ScrapeResult {
    pub fn new(seeders: u32, completed: u32, leechers: u32) -> Self {
        Self {
            seeders,
            completed,
            leechers,
        }
    }
}

impl AddAssign for ScrapeResult {
    fn add_assign(&mut self, other: Self) {
        self.seeders = self.seeders.saturating_add(other.seeders);
        self.completed = self.completed.saturating_add(other.completed);
        self.leechers = self.leechers.saturating_add(other.leechers);
    }
}

impl fmt::Display for ScrapeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seeders={}, completed={}, leechers={}",
            self.seeders, self.completed, self.leechers
        )
    }
}
