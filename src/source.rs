//! Feed source retrieval.
//!
//! The loader only ever sees raw delimited text; this module produces it
//! from one of three places — an HTTP URL (single blocking GET, no
//! retries), a local file, or stdin via the `-` path convention. Bytes are
//! decoded leniently: undecodable sequences become replacement characters
//! instead of failing the run, matching how spreadsheet exports are fetched
//! in practice.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::cli::SourceArgs;
use crate::error::FeedError;

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Reads the raw feed text described by the source arguments.
pub fn read(args: &SourceArgs) -> Result<String> {
    let encoding = resolve_encoding(args.input_encoding.as_deref())?;
    let bytes = match (&args.url, &args.input) {
        (Some(url), None) => fetch_url(url)?,
        (None, Some(path)) if is_dash(path) => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .context("Reading feed from stdin")?;
            buffer
        }
        (None, Some(path)) => std::fs::read(path)
            .with_context(|| format!("Reading feed file {path:?}"))?,
        _ => bail!("Either --url or --input must be provided"),
    };
    debug!("Read {} byte(s) of feed text", bytes.len());
    let (text, _, _) = encoding.decode(&bytes);
    Ok(text.into_owned())
}

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    debug!("Fetching feed from {url}");
    let response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(|err| FeedError::Fetch(err.to_string()))?;
    let bytes = response
        .bytes()
        .map_err(|err| FeedError::Fetch(err.to_string()))?;
    Ok(bytes.to_vec())
}
