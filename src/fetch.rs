//! Page fetching.
//!
//! Blocking HTTP client with per-request user-agent rotation and a small
//! jitter between requests. Redirects are followed; the final URL is what
//! extraction resolves against. Network and HTTP-status failures are hard
//! errors for the URL, reported to the caller untouched.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::encoding::{charset_from_content_type, decode_body};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::record::ParsedPage;
use crate::url_utils::is_valid_url;

/// Jitter range between requests, milliseconds.
const JITTER_MS: (u64, u64) = (150, 450);

/// Transport-level facts about a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Final URL after redirects.
    pub url: String,
    /// HTTP status code.
    pub status_code: u16,
    /// Encoding the body was decoded with.
    pub encoding: String,
    /// Body size in bytes.
    pub size_bytes: usize,
    /// Human-readable body size.
    pub size_readable: String,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
}

/// A fetched page: transport facts plus the UTF-8 body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Transport facts.
    pub info: PageInfo,
    /// Decoded HTML text.
    pub html: String,
}

/// Full scrape result at the output boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeOutput {
    /// Transport facts.
    pub page: PageInfo,
    /// Extracted content.
    pub content: ParsedPage,
}

/// Blocking page fetcher with a rotating user-agent pool.
#[derive(Debug)]
pub struct PageFetcher {
    client: reqwest::blocking::Client,
    user_agents: Vec<String>,
    requests_made: usize,
}

impl PageFetcher {
    /// Build a fetcher from the given options.
    pub fn new(options: &Options) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            client,
            user_agents: options.user_agent_pool(),
            requests_made: 0,
        })
    }

    /// Fetch one page.
    ///
    /// Sleeps a random 150–450 ms before every request after the first, picks
    /// a random user agent, follows redirects and fails on non-success
    /// status codes.
    pub fn fetch(&mut self, url: &str) -> Result<FetchedPage> {
        if !is_valid_url(url) {
            return Err(Error::InvalidUrl(url.to_string()));
        }
        let request_url = normalize_scheme(url);

        if self.requests_made > 0 {
            let mut rng = rand::thread_rng();
            let delay = rng.gen_range(JITTER_MS.0..=JITTER_MS.1);
            thread::sleep(Duration::from_millis(delay));
        }
        self.requests_made += 1;

        let user_agent = self.choose_user_agent();
        info!(url = request_url, "fetching page");

        let response = self
            .client
            .get(&request_url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()?
            .error_for_status()?;

        let final_url = response.url().to_string();
        let status_code = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            headers.insert(
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            );
        }
        let header_charset = headers
            .get("content-type")
            .and_then(|ct| charset_from_content_type(ct));

        let body = response.bytes()?;
        let (html, encoding) = decode_body(&body, header_charset.as_deref());
        debug!(
            url = final_url,
            status = status_code,
            bytes = body.len(),
            encoding,
            "page fetched"
        );

        Ok(FetchedPage {
            info: PageInfo {
                url: final_url,
                status_code,
                encoding: encoding.to_string(),
                size_bytes: body.len(),
                size_readable: format_size(body.len()),
                headers,
            },
            html,
        })
    }

    fn choose_user_agent(&self) -> String {
        let mut rng = rand::thread_rng();
        self.user_agents
            .choose(&mut rng)
            .cloned()
            .unwrap_or_default()
    }
}

/// Scheme-less input like `example.com/page` is fetched over https.
fn normalize_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Render a byte count as a human-readable size.
#[must_use]
pub fn format_size(size_bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let size = size_bytes as f64;
    if size < KB {
        format!("{size_bytes} bytes")
    } else if size < MB {
        format!("{:.1} KB", size / KB)
    } else {
        format!("{:.1} MB", size / MB)
    }
}
