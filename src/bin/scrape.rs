//! Batch scraping CLI.
//!
//! Fetches one or more URLs, extracts the main article from each and writes
//! the results as JSON. A failure on one URL is logged and the remaining
//! URLs are still processed; the exit status reports the aggregate outcome.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::LazyLock;
use std::time::Duration;

use clap::Parser;
use regex::Regex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use pressclip::fetch::PageFetcher;
use pressclip::output::{save_json, to_json};
use pressclip::url_utils::is_valid_url;
use pressclip::{extract, Options, ScrapeOutput};

#[derive(Debug, Parser)]
#[command(name = "scrape", about = "Extract main articles from web pages as JSON")]
struct Args {
    /// One or more page URLs to process.
    #[arg(required = true)]
    urls: Vec<String>,

    /// Output file path (single URL only).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for result files.
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,

    /// Disable pretty-printed JSON.
    #[arg(long)]
    no_pretty: bool,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Custom User-Agent header.
    #[arg(long)]
    user_agent: Option<String>,

    /// Print each result to stdout in addition to saving it.
    #[arg(long)]
    stdout: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let invalid: Vec<&String> = args.urls.iter().filter(|u| !is_valid_url(u)).collect();
    if !invalid.is_empty() {
        error!(?invalid, "invalid URLs");
        return ExitCode::from(2);
    }

    if args.urls.len() > 1 && args.output.is_some() {
        warn!("--output is ignored when multiple URLs are given; using the output directory");
    }

    let options = Options {
        timeout: Duration::from_secs(args.timeout),
        pretty_json: !args.no_pretty,
        ..Options::with_user_agent(args.user_agent.as_deref())
    };

    let mut fetcher = match PageFetcher::new(&options) {
        Ok(fetcher) => fetcher,
        Err(err) => {
            error!(%err, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let total = args.urls.len();
    let mut encountered_error = false;

    for (idx, url) in args.urls.iter().enumerate() {
        let index = idx + 1;
        info!("==> processing URL {index}/{total}: {url}");

        match process_url(&mut fetcher, url) {
            Ok(data) => {
                if args.stdout {
                    match to_json(&data, options.pretty_json) {
                        Ok(json) => println!("\n=== {url} ===\n{json}"),
                        Err(err) => error!(%err, url, "failed to render JSON"),
                    }
                }

                let custom = if total == 1 { args.output.as_deref() } else { None };
                let path = determine_output_path(custom, &args.output_dir, &data, url, index);
                match save_json(&data, &path, options.pretty_json) {
                    Ok(saved) => info!("result saved to: {}", saved.display()),
                    Err(err) => {
                        encountered_error = true;
                        error!(%err, url, "failed to save result");
                    }
                }
            }
            Err(err) => {
                encountered_error = true;
                error!(%err, url, "scraping failed");
            }
        }
    }

    if encountered_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn process_url(fetcher: &mut PageFetcher, url: &str) -> pressclip::Result<ScrapeOutput> {
    let fetched = fetcher.fetch(url)?;
    let content = extract(&fetched.html, &fetched.info.url)?;
    Ok(ScrapeOutput {
        page: fetched.info,
        content,
    })
}

fn determine_output_path(
    custom_output: Option<&Path>,
    output_dir: &Path,
    data: &ScrapeOutput,
    url: &str,
    index: usize,
) -> PathBuf {
    if let Some(path) = custom_output {
        return path.to_path_buf();
    }

    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let domain = if data.content.domain.is_empty() {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string))
            .unwrap_or_else(|| "output".to_string())
    } else {
        data.content.domain.clone()
    };
    let slug = Url::parse(url)
        .ok()
        .map(|u| sanitize_slug(u.path()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "page".to_string());

    let filename = format!("scrape_{}_{slug}_{ts}_{index}.json", sanitize_slug(&domain));
    output_dir.join(filename)
}

#[allow(clippy::expect_used)]
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid regex"));

fn sanitize_slug(value: &str) -> String {
    let trimmed = value.trim_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    SLUG_RE
        .replace_all(trimmed, "_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_sanitization() {
        assert_eq!(sanitize_slug("/news/2024/some title!/"), "news_2024_some_title");
        assert_eq!(sanitize_slug("///"), "");
        assert_eq!(sanitize_slug("plain"), "plain");
    }
}
