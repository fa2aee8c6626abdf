//! Blocking HTTP fetching with rotating user agents and bounded retry.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRY_ATTEMPTS: u32 = 3;

/// Common desktop browser strings, cycled per request so repeated fetches do
/// not present a single fingerprint.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.3 Safari/605.1.15",
];

pub struct HttpClient {
    client: Client,
    requests: usize,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            requests: 0,
        })
    }

    /// Fetches a page body, retrying transient failures with exponential
    /// backoff. Non-2xx responses count as failures.
    pub fn fetch(&mut self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url) {
                Ok(body) => return Ok(body),
                Err(error) if attempt + 1 < RETRY_ATTEMPTS => {
                    let delay = backoff(attempt);
                    warn!(url, attempt, %error, ?delay, "request failed, retrying");
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Best-effort variant used by the extractors: failures are logged and
    /// collapse to `None` so a dead page skips a field, not the run.
    pub fn fetch_ok(&mut self, url: &str) -> Option<String> {
        match self.fetch(url) {
            Ok(body) => Some(body),
            Err(error) => {
                debug!(url, %error, "page unavailable");
                None
            }
        }
    }

    fn try_fetch(&mut self, url: &str) -> reqwest::Result<String> {
        let agent = USER_AGENTS[self.requests % USER_AGENTS.len()];
        self.requests += 1;
        self.client
            .get(url)
            .header(reqwest::header::USER_AGENT, agent)
            .send()?
            .error_for_status()?
            .text()
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(2u64 << attempt)
}
