use super::error::MetainfoError;
use super::info_hash::InfoHash;

/// The parts of a magnet URI needed to scrape its trackers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    pub info_hash: InfoHash,
    pub display_name: Option<String>,
    pub trackers: Vec<String>,
}

impl MagnetLink {
    /// Parses a `magnet:?` URI.
    ///
    /// Parameters are `&`-separated `key=value` pairs; a parameter without
    /// `=` is rejected. `xt` must be `urn:btih:` followed by 40 hex or 32
    /// base32 characters. `dn` and every `tr` are percent-decoded, with `+`
    /// read as a space. Unknown keys are ignored.
    ///
    /// ```
    /// use rscrape::metainfo::MagnetLink;
    ///
    /// let magnet = MagnetLink::parse(
    ///     "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a\
    ///      &dn=Example+File&tr=udp%3A%2F%2Ftracker.example%3A1337",
    /// ).unwrap();
    /// assert_eq!(magnet.display_name.as_deref(), Some("Example File"));
    /// assert_eq!(magnet.trackers, ["udp://tracker.example:1337"]);
    /// ```
    pub fn parse(uri: &str) -> Result<Self, MetainfoError> {
        let query = uri.strip_prefix("magnet:?").ok_or_else(|| {
            MetainfoError::InvalidMagnetLink(format!("not a magnet URI: {uri}"))
        })?;

        let mut info_hash = None;
        let mut display_name = None;
        let mut trackers = Vec::new();

        for param in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = param.split_once('=').ok_or_else(|| {
                MetainfoError::InvalidMagnetLink(format!("malformed param: {param}"))
            })?;

            match key {
                "xt" if info_hash.is_none() => {
                    if let Some(hash) = value.strip_prefix("urn:btih:") {
                        info_hash = Some(parse_btih(hash)?);
                    }
                }
                "dn" => display_name = Some(url_decode(value)),
                "tr" => trackers.push(url_decode(value)),
                _ => {}
            }
        }

        let info_hash = info_hash.ok_or_else(|| {
            MetainfoError::InvalidMagnetLink("missing xt=urn:btih parameter".into())
        })?;

        Ok(Self {
            info_hash,
            display_name,
            trackers,
        })
    }
}

/// Reports whether `s` looks like a magnet URI.
pub fn is_magnet_uri(s: &str) -> bool {
    s.starts_with("magnet:?")
}

fn parse_btih(hash: &str) -> Result<InfoHash, MetainfoError> {
    match hash.len() {
        40 => InfoHash::from_hex(hash),
        32 => {
            let decoded = base32_decode(hash)
                .ok_or_else(|| MetainfoError::InvalidMagnetLink("invalid base32".into()))?;
            InfoHash::from_bytes(&decoded)
        }
        n => Err(MetainfoError::InvalidMagnetLink(format!(
            "invalid info hash length {n}"
        ))),
    }
}

fn url_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

fn base32_decode(input: &str) -> Option<Vec<u8>> {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

    let input = input.to_uppercase();
    let input = input.trim_end_matches('=');

    let mut output = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for c in input.bytes() {
        let value = ALPHABET.iter().position(|&x| x == c)? as u64;
        buffer = (buffer << 5) | value;
        bits_in_buffer += 5;

        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            output.push((buffer >> bits_in_buffer) as u8);
            buffer &= (1 << bits_in_buffer) - 1;
        }
    }

    Some(output)
}
