//! Fetching search-results pages.
//!
//! [`PageFetcher`] is the seam between the rank checker and the network.
//! [`HttpFetcher`] is the production implementation: a [`reqwest::Client`]
//! with browser-like headers, cookie support and a rotating User-Agent.

use std::future::Future;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::config::SearchConfig;
use crate::error::SearchError;

/// Realistic browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// A fetched results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedPage {
    /// A 2xx response.
    Page { status: u16, body: String },
    /// A 3xx response that was not followed.
    ///
    /// Treated as usable content even though nothing from the redirect
    /// target is fetched. This is probably a latent defect, but callers
    /// rely on the redirect not failing the check.
    Redirect {
        status: u16,
        location: Option<String>,
        body: String,
    },
}

impl FetchedPage {
    pub fn status(&self) -> u16 {
        match self {
            Self::Page { status, .. } | Self::Redirect { status, .. } => *status,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Self::Page { body, .. } | Self::Redirect { body, .. } => body,
        }
    }
}

/// Retrieves the raw HTML for a results-page URL.
///
/// All implementations must be `Send + Sync`; one fetcher is shared by
/// every request.
pub trait PageFetcher: Send + Sync {
    /// Fetch `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::FetchTimeout`] when the request exceeds its
    /// deadline and [`SearchError::FetchFailed`] for any other transport or
    /// non-redirect HTTP error status.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, SearchError>> + Send;
}

/// [`PageFetcher`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_seconds: u64,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: build_client(config)?,
            timeout_seconds: config.timeout_seconds,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, SearchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.transport_error("request failed", &e))?;

        let status = response.status();
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        if !status.is_success() && !status.is_redirection() {
            tracing::warn!(status = status.as_u16(), "search engine returned error status");
            return Err(SearchError::FetchFailed(format!("HTTP status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error("response read failed", &e))?;

        tracing::trace!(status = status.as_u16(), bytes = body.len(), "results page received");

        if status.is_redirection() {
            tracing::warn!(
                status = status.as_u16(),
                location = location.as_deref().unwrap_or(""),
                "redirect response used as results page"
            );
            return Ok(FetchedPage::Redirect {
                status: status.as_u16(),
                location,
                body,
            });
        }
        Ok(FetchedPage::Page {
            status: status.as_u16(),
            body,
        })
    }
}

impl HttpFetcher {
    fn transport_error(&self, context: &str, err: &reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::FetchTimeout(format!("exceeded {}s limit", self.timeout_seconds))
        } else {
            SearchError::FetchFailed(format!("{context}: {err}"))
        }
    }
}

/// Build a [`reqwest::Client`] configured for results-page scraping.
///
/// The client has:
/// - Cookie store enabled (for consent pages)
/// - Timeout from config
/// - Random User-Agent from the built-in rotation list (or custom if configured)
/// - At most `max_redirects` redirects followed; `0` disables following
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    let redirect = if config.max_redirects == 0 {
        reqwest::redirect::Policy::none()
    } else {
        reqwest::redirect::Policy::limited(config.max_redirects)
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .redirect(redirect)
        .build()
        .map_err(|e| SearchError::Config(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> SearchConfig {
        SearchConfig {
            timeout_seconds: 2,
            max_redirects: 0,
            user_agent: Some("TestBot/1.0".into()),
            ..Default::default()
        }
    }

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&SearchConfig::default()).is_ok());
    }

    #[test]
    fn build_client_without_redirects() {
        assert!(build_client(&test_config()).is_ok());
    }

    #[test]
    fn fetched_page_accessors() {
        let page = FetchedPage::Redirect {
            status: 302,
            location: Some("/consent".into()),
            body: "<body>x</body>".into(),
        };
        assert_eq!(page.status(), 302);
        assert_eq!(page.body(), "<body>x</body>");
    }

    #[tokio::test]
    async fn fetch_returns_page_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<body>ok</body>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&test_config()).expect("client");
        let page = fetcher
            .fetch(&format!("{}/search?q=rust", server.uri()))
            .await
            .expect("fetch succeeds");
        assert_eq!(
            page,
            FetchedPage::Page {
                status: 200,
                body: "<body>ok</body>".into()
            }
        );
    }

    #[tokio::test]
    async fn redirect_is_usable_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", "/elsewhere")
                    .set_body_string("<body>moved</body>"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&test_config()).expect("client");
        let page = fetcher.fetch(&server.uri()).await.expect("redirect accepted");
        assert!(matches!(
            page,
            FetchedPage::Redirect { status: 302, ref location, .. } if location.as_deref() == Some("/elsewhere")
        ));
        assert_eq!(page.body(), "<body>moved</body>");
    }

    #[tokio::test]
    async fn server_error_is_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&test_config()).expect("client");
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, SearchError::FetchFailed(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn slow_upstream_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<body>late</body>")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = SearchConfig {
            timeout_seconds: 1,
            ..test_config()
        };
        let fetcher = HttpFetcher::new(&config).expect("client");
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, SearchError::FetchTimeout(_)), "got {err}");
    }

    #[tokio::test]
    async fn unreachable_host_is_fetch_failed() {
        let fetcher = HttpFetcher::new(&test_config()).expect("client");
        let err = fetcher.fetch("http://127.0.0.1:9/search").await.unwrap_err();
        assert!(matches!(err, SearchError::FetchFailed(_)));
    }
}
