use rand::Rng;

use crate::metainfo::Torrent;

/// Ordered list of tracker URLs to attempt for one torrent.
///
/// Built from `announce-list` when present, each tier shuffled in place as
/// its URLs are appended; otherwise the single `announce` URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerList {
    urls: Vec<String>,
}

impl TrackerList {
    pub fn from_torrent<R: Rng + ?Sized>(torrent: &Torrent<'_>, max: usize, rng: &mut R) -> Self {
        match torrent.announce_list() {
            Some(tiers) => Self::from_tiers(&tiers, max, rng),
            None => Self {
                urls: torrent
                    .announce()
                    .map(|url| vec![url.to_string()])
                    .unwrap_or_default(),
            },
        }
    }

    /// Appends every tier in order, stopping once `max` URLs are collected.
    ///
    /// After each URL beyond a tier's first is appended, it is swapped with
    /// a uniformly chosen position among the URLs added so far in that tier.
    pub fn from_tiers<S, R>(tiers: &[Vec<S>], max: usize, rng: &mut R) -> Self
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let mut urls: Vec<String> = Vec::new();

        'tiers: for tier in tiers {
            let mut added = 0usize;
            for url in tier {
                if urls.len() >= max {
                    break 'tiers;
                }
                urls.push(url.as_ref().to_string());
                added += 1;
                if added >= 2 {
                    let last = urls.len() - 1;
                    let r = rng.random_range(0..added);
                    urls.swap(last, last - r);
                }
            }
        }

        Self { urls }
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl IntoIterator for TrackerList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.into_iter()
    }
}
