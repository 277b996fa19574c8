//! rscrape - inspect torrent files and scrape their trackers

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use rscrape::bencode::{decode_file, decode_reader};
use rscrape::metainfo::is_magnet_uri;
use rscrape::report::{self, Detail};
use rscrape::tracker::{scrape_all, scrape_first, total, TrackerList};
use rscrape::{scrape, InfoHash, MagnetLink, ScrapeConfig, Torrent, Value};

#[derive(Parser)]
#[command(name = "rscrape", version)]
#[command(about = "Dump torrent file information and scrape trackers")]
#[command(group(ArgGroup::new("mode").args(["test", "brief", "full", "dump", "scrape_torrents", "field"])))]
struct Cli {
    /// Validate torrent files only; exit status is the number of failures
    #[arg(short = 't')]
    test: bool,

    /// One line per torrent: size and name
    #[arg(short = 'b')]
    brief: bool,

    /// Full dump including info hash, metadata, tiers and nodes
    #[arg(short = 'v')]
    full: bool,

    /// Raw hierarchical dump of the bencoded document
    #[arg(short = 'd')]
    dump: bool,

    /// Scrape each torrent's trackers until one answers
    #[arg(short = 's')]
    scrape_torrents: bool,

    /// Print a single field per file (see --help for names)
    #[arg(short = 'f', value_name = "FIELD", value_parser = clap::builder::PossibleValuesParser::new(report::FIELDS))]
    field: Option<String>,

    /// Network timeout in seconds, 0 for none
    #[arg(short = 'w', value_name = "SECS", default_value_t = 0)]
    timeout: u64,

    /// Scrape one info hash (40 hex characters) from one tracker
    #[arg(long, num_args = 2, value_names = ["URL", "INFOHASH"], conflicts_with_all = ["mode", "magnet", "files"])]
    scrape: Option<Vec<String>>,

    /// Show a magnet URI and scrape every tracker it lists
    #[arg(long, value_name = "URI", conflicts_with_all = ["mode", "files"])]
    magnet: Option<String>,

    /// Torrent files, magnet URIs, or `-` for standard input
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Test,
    Brief,
    Info(Detail),
    Dump,
    Scrape,
    Field,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.test {
            Mode::Test
        } else if self.brief {
            Mode::Brief
        } else if self.full {
            Mode::Info(Detail::Full)
        } else if self.dump {
            Mode::Dump
        } else if self.scrape_torrents {
            Mode::Scrape
        } else if self.field.is_some() {
            Mode::Field
        } else {
            Mode::Info(Detail::Default)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            e.print().context("writing usage error")?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            e.print().context("writing help")?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let config = ScrapeConfig::default().with_timeout_secs(cli.timeout);
    let mut out = io::stdout();

    if let Some(uri) = &cli.magnet {
        return match MagnetLink::parse(uri) {
            Ok(magnet) => {
                show_magnet(&mut out, uri, &magnet, &config).await?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Magnet parse error: {e}");
                Ok(ExitCode::from(1))
            }
        };
    }

    if let Some(args) = &cli.scrape {
        return scrape_one(&args[0], &args[1], &config).await;
    }

    if cli.files.is_empty() {
        println!("No .torrent file specified.");
        Cli::command().print_help().context("writing help")?;
        return Ok(ExitCode::from(1));
    }

    let failures = run(&mut out, &cli, &config).await?;
    Ok(ExitCode::from(u8::try_from(failures).unwrap_or(u8::MAX)))
}

async fn scrape_one(url: &str, hash: &str, config: &ScrapeConfig) -> anyhow::Result<ExitCode> {
    let info_hash: InfoHash = match hash.parse() {
        Ok(h) => h,
        Err(_) => {
            println!("invalid infohash value (non-hex). Must be 40 hex characters.");
            return Ok(ExitCode::from(1));
        }
    };

    match scrape(url, &info_hash, config).await {
        Ok(result) => {
            println!("{result}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{e}");
            Ok(ExitCode::from(1))
        }
    }
}

/// Processes every input end to end, one at a time. Returns the number of
/// inputs that failed in test mode.
async fn run<W: Write>(out: &mut W, cli: &Cli, config: &ScrapeConfig) -> anyhow::Result<usize> {
    let mode = cli.mode();
    let mut failures = 0;

    for path in &cli.files {
        let name = path.display().to_string();

        if is_magnet_uri(&name) {
            match MagnetLink::parse(&name) {
                Err(e) => {
                    writeln!(out, "{name}: {e}")?;
                    failures += 1;
                }
                Ok(magnet) if magnet.trackers.is_empty() => {
                    writeln!(out, "{name}: no tracker found in magnet URI")?;
                }
                Ok(magnet) => {
                    writeln!(out, "{name}:")?;
                    show_magnet(out, &name, &magnet, config).await?;
                    writeln!(out)?;
                }
            }
            continue;
        }

        let root = if name == "-" {
            decode_reader(&mut io::stdin().lock())
        } else {
            decode_file(path)
        };

        match mode {
            Mode::Test => {
                let checked = root
                    .map_err(|e| e.to_string())
                    .and_then(|root| validate(&root).map_err(|e| e.to_string()));
                if let Err(e) = checked {
                    writeln!(out, "{name}: {e}")?;
                    failures += 1;
                }
            }
            Mode::Field => {
                let field = cli.field.as_deref().unwrap_or_default();
                match root.as_ref().ok().and_then(|r| Torrent::new(r).ok()) {
                    Some(torrent) => report::write_field(out, &torrent, field)?,
                    None => writeln!(out)?,
                }
            }
            Mode::Brief => match root {
                Err(e) => writeln!(out, "{name}: {e}")?,
                Ok(root) => {
                    write!(out, "{name}: ")?;
                    with_torrent(out, &root, |out, t| report::write_brief(out, t))?;
                }
            },
            Mode::Info(detail) => {
                writeln!(out, "{name}:")?;
                match root {
                    Err(e) => writeln!(out, "{e}")?,
                    Ok(root) => {
                        with_torrent(out, &root, |out, t| report::write_info(out, t, detail))?;
                        writeln!(out)?;
                    }
                }
            }
            Mode::Dump => {
                writeln!(out, "{name}:")?;
                match root {
                    Ok(root) => report::write_dump(out, &root)?,
                    Err(e) => writeln!(out, "{e}")?,
                }
                writeln!(out)?;
            }
            Mode::Scrape => {
                writeln!(out, "{name}:")?;
                match root {
                    Err(e) => writeln!(out, "{e}")?,
                    Ok(root) => {
                        out.flush()?;
                        scrape_verbose(&root, config).await;
                        println!();
                    }
                }
            }
        }
    }

    Ok(failures)
}

fn validate(root: &Value) -> Result<(), rscrape::MetainfoError> {
    Torrent::new(root)?.validate()
}

/// Runs a report against `root`, printing the reason instead when the
/// document is not a usable torrent.
fn with_torrent<W, F>(out: &mut W, root: &Value, render: F) -> anyhow::Result<()>
where
    W: Write,
    F: FnOnce(&mut W, &Torrent<'_>) -> Result<(), report::ReportError>,
{
    let torrent = match Torrent::new(root) {
        Ok(t) => t,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };
    match render(out, &torrent) {
        Ok(()) => Ok(()),
        Err(report::ReportError::Metainfo(e)) => {
            writeln!(out, "{e}")?;
            Ok(())
        }
        Err(report::ReportError::Io(e)) => Err(e.into()),
    }
}

/// Walks the torrent's tracker list, printing every attempt.
async fn scrape_verbose(root: &Value, config: &ScrapeConfig) {
    let Ok(torrent) = Torrent::new(root) else {
        println!("root is not a dictionary");
        return;
    };
    let info_hash = match torrent.info_hash() {
        Ok(h) => h,
        Err(_) => {
            println!("info entry not found");
            return;
        }
    };

    let trackers = TrackerList::from_torrent(&torrent, config.max_trackers, &mut rand::rng());
    if trackers.is_empty() {
        println!("announce entry not found");
        return;
    }

    let info_hash = &info_hash;
    let found = scrape_first(trackers.urls(), move |url| async move {
        println!("scraping {url} ...");
        let result = scrape(&url, info_hash, config).await;
        match &result {
            Ok(counts) => println!("{counts}"),
            Err(e) => println!("{e}"),
        }
        result
    })
    .await;

    if found.is_err() {
        println!("no more trackers to try.");
    }
}

/// Prints the magnet header, then scrapes every tracker and totals the
/// ones that answered.
async fn show_magnet<W: Write>(
    out: &mut W,
    uri: &str,
    magnet: &MagnetLink,
    config: &ScrapeConfig,
) -> anyhow::Result<()> {
    report::write_magnet(out, uri, magnet)?;
    writeln!(out)?;
    writeln!(out, "Scrape results:")?;

    let outcomes = scrape_all(&magnet.trackers, &magnet.info_hash, config).await;
    for (url, result) in &outcomes {
        match result {
            Ok(counts) => writeln!(out, "                {url}, ({counts})")?,
            Err(e) => writeln!(out, "  {url}: {e}")?,
        }
    }

    let (answered, sum) = total(&outcomes);
    if answered > 1 {
        writeln!(out, "Total (from {answered} trackers): {sum}")?;
    }
    Ok(())
}
