//! Static fetch: one HTTP GET per source, body returned verbatim.

use std::time::Duration;

use async_trait::async_trait;
use permitscout_core::SourceDescriptor;
use tracing::info;

use crate::{FetchError, PermitFetcher};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Whole-request timeout, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("permitscout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Fetches server-rendered permit pages over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &HttpSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PermitFetcher for HttpFetcher {
    async fn fetch(&self, source: &SourceDescriptor) -> Result<String, FetchError> {
        let url = source.as_str();

        info!(url = %url, "fetching permit page");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        info!(url = %url, bytes = body.len(), "fetched permit page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&HttpSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn returns_body_verbatim() {
        let server = MockServer::start().await;
        let page = "<table class=\"permit-table\"><tr><td>x</td></tr></table>";
        Mock::given(method("GET"))
            .and(path("/permits"))
            .respond_with(ResponseTemplate::new(200).set_body_string(page))
            .expect(1)
            .mount(&server)
            .await;

        let source = SourceDescriptor::new(format!("{}/permits", server.uri()));
        let body = fetcher().fetch(&source).await.unwrap();
        assert_eq!(body, page);
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let source = SourceDescriptor::new(format!("{}/missing", server.uri()));
        let err = fetcher().fetch(&source).await.unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "not here");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&HttpSettings {
            timeout: Duration::from_millis(200),
            ..HttpSettings::default()
        })
        .unwrap();
        let source = SourceDescriptor::new(server.uri());
        let err = fetcher.fetch(&source).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn unreachable_host_is_error() {
        let source = SourceDescriptor::new("http://127.0.0.1:1/permits");
        let err = fetcher().fetch(&source).await.unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
    }
}
