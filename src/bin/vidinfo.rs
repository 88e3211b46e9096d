//! Extract video metadata from a saved HTML page and print it as JSON.
//!
//! Reads the file given as the first argument, or stdin when none is given.
//! Logs go to stderr (`RUST_LOG` controls the level) so stdout stays JSON.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use vidinfo::{extract_bytes_with_options, DownloadRequest, Locale, Options, Result};

#[derive(Parser)]
#[clap(version, about = "Extract video metadata from an HTML page", long_about = None)]
struct Args {
    #[clap(long, short = 'u', help = "Address the page was loaded from")]
    url: String,

    #[clap(long = "generic-only", help = "Skip site overrides and mirror discovery")]
    generic_only: bool,

    #[clap(long = "max-title-chars", default_value_t = 100, help = "Clamp titles to this many characters")]
    max_title_chars: usize,

    #[clap(long, help = "Placeholder language for mirror descriptions (en, pl)")]
    locale: Option<Locale>,

    #[clap(long, help = "Pretty-print the JSON output")]
    pretty: bool,

    #[clap(
        long = "download-request",
        help = "Print a download request for the page (or the first mirror) instead"
    )]
    download_request: bool,

    #[clap(help = "HTML file to read; stdin when omitted", index = 1)]
    input: Option<PathBuf>,
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    vidinfo::url_utils::parse_address(&args.url)?;

    let html = read_input(args.input.as_ref())?;
    debug!(bytes = html.len(), "read input");

    let options = Options {
        max_title_chars: args.max_title_chars,
        enable_overrides: !args.generic_only,
        locale: args.locale,
        ..Options::default()
    };

    let info = extract_bytes_with_options(&html, &args.url, &options);
    info!(title = %info.title, mirrors = info.mirror_links.len(), site = ?info.site, "extracted");

    let output = if args.download_request {
        let request = match info.mirror_links.first() {
            Some(mirror) => DownloadRequest::from_mirror(&info, mirror),
            None => DownloadRequest::from_video_info(&info),
        };
        to_json(&request, args.pretty)?
    } else {
        to_json(&info, args.pretty)?
    };

    println!("{output}");
    Ok(())
}
