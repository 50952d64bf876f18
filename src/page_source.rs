use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};

use crate::http_client::http_client;

/// Timing bounds for one page load.
#[derive(Debug, Clone, Copy)]
pub struct PageLoad {
    pub timeout: Duration,
    pub settle: Duration,
    /// Run deadline; a load never waits past it.
    pub deadline: Option<Instant>,
}

impl PageLoad {
    fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Navigation timeout cut down to the time left before the deadline, or
    /// `None` once the deadline has passed.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.remaining() {
            Some(left) if left.is_zero() => None,
            Some(left) => Some(self.timeout.min(left)),
            None => Some(self.timeout),
        }
    }

    pub fn settle_time(&self) -> Duration {
        match self.remaining() {
            Some(left) => self.settle.min(left),
            None => self.settle,
        }
    }
}

/// Something that can turn a URL into page HTML.
pub trait PageSource: Sync {
    fn load(&self, url: &str, load: PageLoad) -> Result<String>;
}

/// Plain HTTP GET through the shared client. Pages whose tables are built
/// by client-side script come back without them, so listings that need a
/// rendering browser will parse as empty; the settle pause only helps sources
/// that finish rendering server-side.
pub struct HttpPageSource {
    client: &'static Client,
}

impl HttpPageSource {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = http_client(user_agent).context("page source unavailable")?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    fn load(&self, url: &str, load: PageLoad) -> Result<String> {
        let Some(timeout) = load.request_timeout() else {
            bail!("run deadline passed before loading {url}");
        };
        let resp = self
            .client
            .get(url)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(ACCEPT_LANGUAGE, "cs-CZ,cs;q=0.9,en;q=0.5")
            .timeout(timeout)
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        let status = resp.status();
        let body = resp
            .text()
            .with_context(|| format!("failed reading body of {url}"))?;
        if !status.is_success() {
            let snippet = body
                .trim()
                .replace(['\n', '\r'], " ")
                .chars()
                .take(220)
                .collect::<String>();
            return Err(anyhow::anyhow!("http {} for {}: {}", status, url, snippet));
        }

        let settle = load.settle_time();
        if !settle.is_zero() {
            thread::sleep(settle);
        }
        Ok(body)
    }
}
