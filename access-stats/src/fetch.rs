use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{AppError, Result};

/// Downloads `url` with a single GET and returns its body split into lines.
pub async fn fetch_lines(url: &str) -> Result<Vec<String>> {
    info!(%url, "fetching access log");
    let network = |source| AppError::Network {
        url: url.to_string(),
        source,
    };
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(network)?;
    let body = response.bytes().await.map_err(network)?;
    debug!(bytes = body.len(), "response received");
    let lines = decode_lines(url, body.to_vec())?;
    info!(lines = lines.len(), "access log downloaded");
    Ok(lines)
}

// `\r\n` first so it counts as one break. A lone `\r` and the other Unicode
// line separators also end a line.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c\x1d\x1e\x{85}\x{2028}\x{2029}]").expect("valid regex")
});

fn decode_lines(url: &str, body: Vec<u8>) -> Result<Vec<String>> {
    let text = String::from_utf8(body).map_err(|source| AppError::Decoding {
        url: url.to_string(),
        source,
    })?;
    Ok(split_lines(&text))
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = LINE_BREAK.split(text).map(str::to_string).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}
