use super::error::MetainfoError;
use super::info_hash::InfoHash;
use crate::bencode::Value;

const TRACKER_SCHEMES: [&str; 3] = ["http://", "https://", "udp://"];

/// A read-only view over a decoded torrent document.
///
/// The view borrows the decoded tree; nothing is copied out until an
/// accessor is called. Accessors are lenient (a field of the wrong type reads
/// as absent); [`Torrent::validate`] performs the strict structural check.
///
/// # Examples
///
/// ```
/// use rscrape::bencode::decode;
/// use rscrape::metainfo::Torrent;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = decode(
///     b"d8:announce31:http://tracker.example/announce\
///       4:infod6:lengthi5e4:name5:a.txt12:piece lengthi16384eee",
/// )?;
/// let torrent = Torrent::new(&root)?;
/// torrent.validate()?;
///
/// assert_eq!(torrent.announce(), Some("http://tracker.example/announce"));
/// assert_eq!(torrent.name(), Some("a.txt"));
/// assert_eq!(torrent.total_length(), Some(5));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Torrent<'a> {
    root: &'a Value,
}

/// One file of a torrent, path components joined with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub length: i64,
}

impl<'a> Torrent<'a> {
    pub fn new(root: &'a Value) -> Result<Self, MetainfoError> {
        if !root.is_dict() {
            return Err(MetainfoError::NotADictionary);
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn announce(&self) -> Option<&'a str> {
        self.root.get(b"announce").and_then(Value::as_str)
    }

    /// Returns `announce-list` tiers, or `None` if the field is absent.
    ///
    /// Entries that are not strings are skipped; a tier that is not a list
    /// reads as empty.
    pub fn announce_list(&self) -> Option<Vec<Vec<&'a str>>> {
        let tiers = self.root.get(b"announce-list")?.as_list()?;
        Some(
            tiers
                .iter()
                .map(|tier| {
                    tier.as_list()
                        .unwrap_or_default()
                        .iter()
                        .filter_map(Value::as_str)
                        .collect()
                })
                .collect(),
        )
    }

    pub fn info(&self) -> Option<&'a Value> {
        self.root.get(b"info").filter(|v| v.is_dict())
    }

    /// Hashes the `info` dictionary as stored.
    pub fn info_hash(&self) -> Result<InfoHash, MetainfoError> {
        self.info()
            .map(InfoHash::of)
            .ok_or(MetainfoError::MissingField("info"))
    }

    pub fn name(&self) -> Option<&'a str> {
        self.info_field(b"name").and_then(Value::as_str)
    }

    pub fn piece_length(&self) -> Option<i64> {
        self.info_field(b"piece length").and_then(Value::as_integer)
    }

    /// Total payload size: `info.length`, or the sum over `info.files`.
    ///
    /// `None` when a length is missing or the sum overflows `i64`.
    pub fn total_length(&self) -> Option<i64> {
        if let Some(length) = self.info_field(b"length").and_then(Value::as_integer) {
            return Some(length);
        }
        let files = self.info_field(b"files")?.as_list()?;
        files.iter().try_fold(0i64, |total, f| {
            total.checked_add(f.get(b"length").and_then(Value::as_integer)?)
        })
    }

    /// Lists the payload files. A single-file torrent yields its name.
    pub fn files(&self) -> Vec<FileEntry> {
        if let Some(length) = self.info_field(b"length").and_then(Value::as_integer) {
            return self
                .name()
                .map(|name| {
                    vec![FileEntry {
                        path: name.to_string(),
                        length,
                    }]
                })
                .unwrap_or_default();
        }

        self.info_field(b"files")
            .and_then(Value::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|file| {
                let length = file.get(b"length")?.as_integer()?;
                let path = file
                    .get(b"path")?
                    .as_list()?
                    .iter()
                    .map(|p| p.as_bytes().map(|b| String::from_utf8_lossy(b).into_owned()))
                    .collect::<Option<Vec<_>>>()?
                    .join("/");
                Some(FileEntry { path, length })
            })
            .collect()
    }

    pub fn creation_date(&self) -> Option<i64> {
        self.root.get(b"creation date").and_then(Value::as_integer)
    }

    pub fn comment(&self) -> Option<&'a str> {
        self.root.get(b"comment").and_then(Value::as_str)
    }

    pub fn created_by(&self) -> Option<&'a str> {
        self.root.get(b"created by").and_then(Value::as_str)
    }

    pub fn encoding(&self) -> Option<&'a str> {
        self.root.get(b"encoding").and_then(Value::as_str)
    }

    pub fn publisher(&self) -> Option<&'a str> {
        self.info_field(b"publisher").and_then(Value::as_str)
    }

    pub fn publisher_url(&self) -> Option<&'a str> {
        self.info_field(b"publisher-url").and_then(Value::as_str)
    }

    pub fn is_private(&self) -> bool {
        self.info_field(b"private")
            .and_then(Value::as_integer)
            .is_some_and(|p| p != 0)
    }

    /// DHT bootstrap nodes as `(host, port)` pairs.
    pub fn nodes(&self) -> Vec<(&'a str, i64)> {
        self.root
            .get(b"nodes")
            .and_then(Value::as_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|node| match node.as_list()? {
                [host, port, ..] => Some((host.as_str()?, port.as_integer()?)),
                _ => None,
            })
            .collect()
    }

    /// Checks the fields a well-formed torrent must carry.
    ///
    /// Requires a tracker `announce` URL and an `info` dictionary with
    /// `name`, `piece length`, and either a positive `length` or a non-empty
    /// `files` list whose entries each have a non-negative `length` and a
    /// non-empty `path` of strings.
    pub fn validate(&self) -> Result<(), MetainfoError> {
        let announce = self
            .root
            .get(b"announce")
            .and_then(Value::as_bytes)
            .ok_or(MetainfoError::MissingField("announce"))?;
        if !TRACKER_SCHEMES
            .iter()
            .any(|scheme| announce.starts_with(scheme.as_bytes()))
        {
            return Err(MetainfoError::InvalidAnnounceUrl(
                String::from_utf8_lossy(announce).into_owned(),
            ));
        }

        let info = self.info().ok_or(MetainfoError::MissingField("info"))?;

        if info.get(b"name").and_then(Value::as_bytes).is_none() {
            return Err(MetainfoError::MissingField("info.name"));
        }
        if info.get(b"piece length").and_then(Value::as_integer).is_none() {
            return Err(MetainfoError::MissingField("info.piece length"));
        }

        if let Some(length) = info.get(b"length") {
            return match length.as_integer() {
                Some(n) if n > 0 => Ok(()),
                _ => Err(MetainfoError::InvalidField("info.length")),
            };
        }

        let files = info
            .get(b"files")
            .and_then(Value::as_list)
            .filter(|files| !files.is_empty())
            .ok_or(MetainfoError::MissingField("info.length or info.files"))?;

        for file in files {
            if !file.is_dict() {
                return Err(MetainfoError::InvalidField("info.files entry"));
            }
            match file.get(b"length").and_then(Value::as_integer) {
                Some(n) if n >= 0 => {}
                _ => return Err(MetainfoError::InvalidField("info.files length")),
            }
            let path = file
                .get(b"path")
                .and_then(Value::as_list)
                .filter(|path| !path.is_empty())
                .ok_or(MetainfoError::MissingField("info.files path"))?;
            if path.iter().any(|p| p.as_bytes().is_none()) {
                return Err(MetainfoError::InvalidField("info.files path element"));
            }
        }

        Ok(())
    }

    fn info_field(&self, key: &[u8]) -> Option<&'a Value> {
        self.info()?.get(key)
    }
}
