use super::*;
use crate::bencode::decode;

const SINGLE: &[u8] =
    b"d8:announce31:http://tracker.example/announce4:infod6:lengthi5e4:name5:a.txt12:piece lengthi16384eee";

const MULTI: &[u8] = b"d8:announce13:udp://t.ex:8013:announce-listll13:udp://t.ex:80el15:http://b/scrape13:udp://c.ex:80ee7:comment5:hello13:creation datei0e5:nodesll9:127.0.0.1i6881eee4:infod5:filesld6:lengthi1536e4:pathl1:a5:b.bineed6:lengthi10e4:pathl3:doceee4:name3:dir12:piece lengthi16384e7:privatei1eee";

fn render<F>(doc: &[u8], f: F) -> String
where
    F: FnOnce(&mut Vec<u8>, &Torrent<'_>),
{
    let root = decode(doc).unwrap();
    let torrent = Torrent::new(&root).unwrap();
    let mut out = Vec::new();
    f(&mut out, &torrent);
    String::from_utf8(out).unwrap()
}

#[test]
fn test_human_size() {
    assert_eq!(human_size(0), "0 (0B)");
    assert_eq!(human_size(1024), "1024 (1024B)");
    assert_eq!(human_size(1546), "1546 (1.51K)");
    assert_eq!(human_size(1_000_000), "1000000 (977K)");
    assert_eq!(human_size(123_456_789), "123456789 (118M)");
    assert_eq!(human_size(5 * 1024 * 1024 * 1024), "5368709120 (5G)");
    assert_eq!(human_size(u64::MAX), "18446744073709551615 (16777216T)");
}

#[test]
fn test_brief() {
    let out = render(SINGLE, |out, t| write_brief(out, t).unwrap());
    assert_eq!(out, "5 (5B), a.txt\n");

    let out = render(MULTI, |out, t| write_brief(out, t).unwrap());
    assert_eq!(out, "1546 (1.51K), dir\n");
}

#[test]
fn test_default_info() {
    let out = render(SINGLE, |out, t| write_info(out, t, Detail::Default).unwrap());
    assert_eq!(
        out,
        "Name:           a.txt\n\
         Size:           5 (5B)\n\
         Announce:       http://tracker.example/announce\n\
         Files:\n                a.txt 5 (5B)\n"
    );
}

#[test]
fn test_files_are_aligned() {
    let out = render(MULTI, |out, t| write_info(out, t, Detail::Default).unwrap());
    assert!(out.contains("\n                a/b.bin 1536 (1.5K)\n"));
    assert!(out.contains("\n                doc     10 (10B)\n"));
    assert!(!out.contains("Announce List:"));
}

#[test]
fn test_full_info() {
    let out = render(MULTI, |out, t| write_info(out, t, Detail::Full).unwrap());
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Name:           dir");
    assert_eq!(lines[2], "Announce:       udp://t.ex:80");
    assert!(lines[3].starts_with("Info Hash:      "));
    assert_eq!(lines[3].len(), 16 + 40);
    assert_eq!(lines[4], "Piece Length:   16384 (16K)");
    assert_eq!(lines[5], "Creation Date:  Thu Jan  1 00:00:00 1970 UTC");
    assert_eq!(lines[6], "Comment:        hello");
    assert_eq!(lines[7], "Private:        yes");
    assert_eq!(lines[8], "Files:");

    let tail = &lines[lines.len() - 5..];
    assert_eq!(
        tail,
        [
            "Announce List:",
            "                udp://t.ex:80",
            "                http://b/scrape, udp://c.ex:80",
            "Nodes:",
            "                127.0.0.1:6881",
        ]
    );
}

#[test]
fn test_info_missing_field() {
    let doc = b"d4:infod4:name1:x12:piece lengthi1e6:lengthi1eee";
    let root = decode(doc).unwrap();
    let torrent = Torrent::new(&root).unwrap();
    let err = write_info(&mut Vec::new(), &torrent, Detail::Default).unwrap_err();
    assert!(matches!(
        err,
        ReportError::Metainfo(MetainfoError::MissingField("announce"))
    ));
}

#[test]
fn test_fields() {
    let field = |name: &str| render(MULTI, |out, t| write_field(out, t, name).unwrap());

    assert_eq!(field("name"), "dir\n");
    assert_eq!(field("size"), "1546\n");
    assert_eq!(field("piece-length"), "16384\n");
    assert_eq!(field("private"), "yes\n");
    assert_eq!(field("files"), "a/b.bin\ndoc\n");
    assert_eq!(field("encoding"), "\n");
    assert_eq!(field("bogus"), "\n");
    assert_eq!(field("info-hash").trim_end().len(), 40);

    for name in FIELDS {
        let _ = field(name);
    }
}

#[test]
fn test_dump() {
    let value = decode(b"d3:cow3:moo4:spaml1:ai1eee").unwrap();
    let mut out = Vec::new();
    write_dump(&mut out, &value).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "<dictionary>\n    cow\n    moo\n    spam\n    <list>\n        a\n        1\n"
    );
}

#[test]
fn test_dump_binary_strings() {
    let value = decode(b"l2:\xff\x010:e").unwrap();
    let mut out = Vec::new();
    write_dump(&mut out, &value).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "<list>\n    <string of length 2>\n    \n"
    );
}

#[test]
fn test_magnet_header() {
    let uri = "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a&dn=Example&tr=udp%3A%2F%2Ft.ex%3A80";
    let magnet = MagnetLink::parse(uri).unwrap();
    let mut out = Vec::new();
    write_magnet(&mut out, uri, &magnet).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!(
            "Name:           Example\n\
             Magnet URI:     {uri}\n\
             Info Hash:      c12fe1c06bba254a9dc9f519b335aa7c1367a88a\n\
             Announce List:\n                udp://t.ex:80\n"
        )
    );
}
