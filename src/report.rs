//! Human-readable torrent reports.
//!
//! Every report writes to an [`io::Write`] so the binary can stream to
//! stdout and tests can capture into a `Vec<u8>`.

use std::io::{self, Write};

use chrono::DateTime;

use crate::bencode::Value;
use crate::metainfo::{MagnetLink, MetainfoError, Torrent};

/// Column where report values start.
const INDENT: &str = "                ";

const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];

/// Field names accepted by [`write_field`].
pub const FIELDS: [&str; 13] = [
    "name",
    "size",
    "announce",
    "info-hash",
    "piece-length",
    "creation-date",
    "comment",
    "created-by",
    "encoding",
    "publisher",
    "publisher-url",
    "private",
    "files",
];

/// How much of a torrent [`write_info`] shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    /// Name, size, announce URL and files.
    Default,
    /// Everything: hash, piece length, optional metadata, tiers, nodes.
    Full,
}

/// Formats a byte count as `N (x.xxU)`, scaling by 1024 while the value
/// exceeds 1024.
///
/// ```
/// use rscrape::report::human_size;
///
/// assert_eq!(human_size(5), "5 (5B)");
/// assert_eq!(human_size(1536), "1536 (1.5K)");
/// assert_eq!(human_size(16384), "16384 (16K)");
/// ```
pub fn human_size(n: u64) -> String {
    let mut scaled = n as f64;
    let mut unit = 0;
    while scaled > 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    format!("{n} ({}{})", significant(scaled), UNITS[unit])
}

/// Three significant digits without trailing zeros.
fn significant(x: f64) -> String {
    let decimals = if x < 10.0 {
        2
    } else if x < 100.0 {
        1
    } else {
        0
    };
    let s = format!("{x:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn size_of(length: i64) -> String {
    human_size(u64::try_from(length).unwrap_or(0))
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%a %b %e %H:%M:%S %Y UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// The fields every report needs, or the first one missing.
struct Summary<'a> {
    name: &'a str,
    announce: &'a str,
    piece_length: i64,
    total_length: i64,
}

impl<'a> Summary<'a> {
    fn of(torrent: &Torrent<'a>) -> Result<Self, MetainfoError> {
        let announce = torrent
            .announce()
            .ok_or(MetainfoError::MissingField("announce"))?;
        torrent.info().ok_or(MetainfoError::MissingField("info"))?;
        let name = torrent
            .name()
            .ok_or(MetainfoError::MissingField("info.name"))?;
        let piece_length = torrent
            .piece_length()
            .ok_or(MetainfoError::MissingField("info.piece length"))?;
        let total_length = torrent
            .total_length()
            .ok_or(MetainfoError::MissingField("info.length or info.files"))?;

        Ok(Self {
            name,
            announce,
            piece_length,
            total_length,
        })
    }
}

/// Errors from report writers: the torrent lacks a field, or the sink failed.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Metainfo(#[from] MetainfoError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// One line: `<size>, <name>`.
pub fn write_brief<W: Write>(out: &mut W, torrent: &Torrent<'_>) -> Result<(), ReportError> {
    let summary = Summary::of(torrent)?;
    writeln!(out, "{}, {}", size_of(summary.total_length), summary.name)?;
    Ok(())
}

/// Multi-line report with labelled fields and an aligned file list.
pub fn write_info<W: Write>(
    out: &mut W,
    torrent: &Torrent<'_>,
    detail: Detail,
) -> Result<(), ReportError> {
    let summary = Summary::of(torrent)?;

    writeln!(out, "Name:           {}", summary.name)?;
    writeln!(out, "Size:           {}", size_of(summary.total_length))?;
    writeln!(out, "Announce:       {}", summary.announce)?;

    if detail == Detail::Full {
        writeln!(out, "Info Hash:      {}", torrent.info_hash()?)?;
        writeln!(out, "Piece Length:   {}", size_of(summary.piece_length))?;
        if let Some(date) = torrent.creation_date() {
            writeln!(out, "Creation Date:  {}", format_date(date))?;
        }
        let optional = [
            ("Comment:        ", torrent.comment()),
            ("Publisher:      ", torrent.publisher()),
            ("Publisher URL:  ", torrent.publisher_url()),
            ("Created By:     ", torrent.created_by()),
            ("Encoding:       ", torrent.encoding()),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                writeln!(out, "{label}{value}")?;
            }
        }
        if torrent.is_private() {
            writeln!(out, "Private:        yes")?;
        }
    }

    writeln!(out, "Files:")?;
    let files = torrent.files();
    let width = files.iter().map(|f| f.path.len()).max().unwrap_or(0);
    for file in &files {
        writeln!(
            out,
            "{INDENT}{:<width$} {}",
            file.path,
            size_of(file.length),
        )?;
    }

    if detail == Detail::Full {
        if let Some(tiers) = torrent.announce_list() {
            writeln!(out, "Announce List:")?;
            for tier in tiers {
                writeln!(out, "{INDENT}{}", tier.join(", "))?;
            }
        }
        let nodes = torrent.nodes();
        if !nodes.is_empty() {
            writeln!(out, "Nodes:")?;
            for (host, port) in nodes {
                writeln!(out, "{INDENT}{host}:{port}")?;
            }
        }
    }

    Ok(())
}

/// Writes one named field, or an empty line when the torrent lacks it.
///
/// `files` prints one path per line. Unknown names also print an empty line;
/// callers check against [`FIELDS`] first.
pub fn write_field<W: Write>(out: &mut W, torrent: &Torrent<'_>, field: &str) -> io::Result<()> {
    let value = match field {
        "name" => torrent.name().map(str::to_string),
        "size" => torrent.total_length().map(|n| n.to_string()),
        "announce" => torrent.announce().map(str::to_string),
        "info-hash" => torrent.info_hash().ok().map(|h| h.to_hex()),
        "piece-length" => torrent.piece_length().map(|n| n.to_string()),
        "creation-date" => torrent.creation_date().map(format_date),
        "comment" => torrent.comment().map(str::to_string),
        "created-by" => torrent.created_by().map(str::to_string),
        "encoding" => torrent.encoding().map(str::to_string),
        "publisher" => torrent.publisher().map(str::to_string),
        "publisher-url" => torrent.publisher_url().map(str::to_string),
        "private" => Some(if torrent.is_private() { "yes" } else { "no" }.to_string()),
        "files" => Some(
            torrent
                .files()
                .into_iter()
                .map(|f| f.path)
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => None,
    };
    writeln!(out, "{}", value.unwrap_or_default())
}

/// Raw hierarchical dump: one entity per line, children indented by four
/// spaces, dictionary keys and values on consecutive lines.
pub fn write_dump<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    dump_at(out, value, 0)
}

fn dump_at<W: Write>(out: &mut W, value: &Value, depth: usize) -> io::Result<()> {
    write!(out, "{:depth$}", "")?;
    match value {
        Value::Integer(n) => writeln!(out, "{n}"),
        Value::Bytes(bytes) => {
            if bytes.iter().all(|&b| b != 0 && b.is_ascii()) {
                out.write_all(bytes)?;
                writeln!(out)
            } else {
                writeln!(out, "<string of length {}>", bytes.len())
            }
        }
        Value::List(items) => {
            writeln!(out, "<list>")?;
            for item in items {
                dump_at(out, item, depth + 4)?;
            }
            Ok(())
        }
        Value::Dict(entries) => {
            writeln!(out, "<dictionary>")?;
            for (key, value) in entries {
                dump_at(out, key, depth + 4)?;
                dump_at(out, value, depth + 4)?;
            }
            Ok(())
        }
    }
}

/// Header block for a magnet link, before any scrape results.
pub fn write_magnet<W: Write>(out: &mut W, uri: &str, magnet: &MagnetLink) -> io::Result<()> {
    if let Some(name) = &magnet.display_name {
        writeln!(out, "Name:           {name}")?;
    }
    writeln!(out, "Magnet URI:     {uri}")?;
    writeln!(out, "Info Hash:      {}", magnet.info_hash)?;
    if !magnet.trackers.is_empty() {
        writeln!(out, "Announce List:")?;
        for tracker in &magnet.trackers {
            writeln!(out, "{INDENT}{tracker}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
