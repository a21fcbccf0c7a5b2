//! Page fetching with exponential backoff retry logic.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: core trait, `fetch(url) -> body`
//! - [`HttpFetcher`]: `reqwest` client with browser-like headers and a timeout
//! - [`RetryFetch`]: decorator adding retries to any `PageFetcher`
//!
//! # Retry Strategy
//!
//! - Exponential backoff starting at `base_delay`, doubling per attempt
//! - Delay capped at 30 seconds
//! - Random jitter (0-250ms) added to every delay

use crate::config::HttpConfig;
use rand::{Rng, rng};
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

/// Anything that can turn a URL into a page body.
pub trait PageFetcher {
    /// Fetch `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Plain HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client that sends the configured `User-Agent` and
    /// `Accept-Language` and gives up after `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns an error if a header value is invalid or the TLS backend fails
    /// to initialise.
    pub fn new(http: &HttpConfig) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&http.accept_language)?);

        let client = reqwest::Client::builder()
            .user_agent(http.user_agent.clone())
            .default_headers(headers)
            .timeout(StdDuration::from_secs(http.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = async {
            let resp = self.client.get(url).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(resp.text().await?)
        }
        .await;
        let dt = t0.elapsed();

        match res {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis(), error = %e, "HTTP fetch failed");
                Err(Box::new(e))
            }
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`PageFetcher`].
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: PageFetcher,
{
    /// Wrap a fetcher with retry logic.
    ///
    /// # Arguments
    ///
    /// * `inner` - The fetcher to retry
    /// * `max_retries` - Attempts allowed after the first one; `0` disables retrying
    /// * `base_delay` - Delay before the first retry, doubled on each later one
    ///
    /// # Returns
    ///
    /// A `RetryFetch` whose backoff is capped at 30 seconds.
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = (attempt - 1).min(16) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + StdDuration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> PageFetcher for RetryFetch<T>
where
    T: PageFetcher,
{
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Build the fetcher used by the CLI: HTTP with retries from config.
///
/// # Errors
///
/// Returns an error if the configured `Accept-Language` is not a valid header
/// value or the HTTP client cannot be built.
pub fn http_with_retries(http: &HttpConfig) -> Result<RetryFetch<HttpFetcher>, Box<dyn Error>> {
    Ok(RetryFetch::new(
        HttpFetcher::new(http)?,
        http.max_retries,
        StdDuration::from_secs(1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Flaky {
        failures: usize,
        calls: AtomicUsize,
    }

    impl Flaky {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PageFetcher for Flaky {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                Err(format!("boom #{n}").into())
            } else {
                Ok(format!("<html>{url}</html>"))
            }
        }
    }

    #[tokio::test]
    async fn test_retry_recovers_within_budget() {
        let fetcher = RetryFetch::new(Flaky::new(2), 2, StdDuration::from_millis(1));
        let body = fetcher.fetch("https://times.mw").await.unwrap();
        assert_eq!(body, "<html>https://times.mw</html>");
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_with_last_error() {
        let fetcher = RetryFetch::new(Flaky::new(5), 1, StdDuration::from_millis(1));
        let err = fetcher.fetch("https://times.mw").await.unwrap_err();
        assert_eq!(err.to_string(), "boom #1");
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_retries_is_single_attempt() {
        let fetcher = RetryFetch::new(Flaky::new(1), 0, StdDuration::from_millis(1));
        assert!(fetcher.fetch("https://times.mw").await.is_err());
        assert_eq!(fetcher.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_is_capped() {
        let fetcher = RetryFetch::new(Flaky::new(0), 10, StdDuration::from_secs(1));
        let first = fetcher.backoff(1);
        assert!(first >= StdDuration::from_secs(1));
        assert!(first <= StdDuration::from_millis(1250));

        let late = fetcher.backoff(10);
        assert!(late >= StdDuration::from_secs(30));
        assert!(late <= StdDuration::from_millis(30_250));
    }

    #[test]
    fn test_http_fetcher_builds_from_defaults() {
        assert!(HttpFetcher::new(&HttpConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_header_value_is_an_error() {
        let http = HttpConfig {
            accept_language: "en\nus".to_string(),
            ..HttpConfig::default()
        };
        assert!(HttpFetcher::new(&http).is_err());
    }
}
