//! HTTP page source.
//!
//! Issues a single GET for the configured URL. The body is returned even
//! when the server answers with a non-success status, so an error page is
//! parsed like any other page and simply yields no entries. Transport
//! failures are returned as [`ScrapeError::Http`]; nothing is retried.

use crate::{PageSource, ScrapeConfig, ScrapeError};

/// Fetches the agenda page over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    config: ScrapeConfig,
}

impl HttpPageSource {
    /// Creates a page source for the given configuration.
    #[must_use]
    pub const fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    /// Builds a [`reqwest::Client`] with the configured headers and timeout.
    fn build_client(&self) -> Result<reqwest::Client, ScrapeError> {
        let mut header_map = reqwest::header::HeaderMap::new();
        for (key, value) in &self.config.headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ScrapeError::Parse(format!("invalid header name '{key}': {e}")))?;
            let val = reqwest::header::HeaderValue::from_str(value)
                .map_err(|e| ScrapeError::Parse(format!("invalid header value '{value}': {e}")))?;
            header_map.insert(name, val);
        }

        let mut builder = reqwest::Client::builder().default_headers(header_map);
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(ScrapeError::Http)
    }
}

impl PageSource for HttpPageSource {
    async fn fetch_html(&self) -> Result<String, ScrapeError> {
        let client = self.build_client()?;

        log::info!("Fetching {}", self.config.url);
        let response = client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!(
                "{} answered with status {status}, parsing the body anyway",
                self.config.url
            );
        }

        let body = response.text().await?;
        log::debug!("Received {} bytes from {}", body.len(), self.config.url);
        Ok(body)
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serves exactly one HTTP response and returns the raw request head.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/agenda/festivals", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "{status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();

            String::from_utf8_lossy(&request).into_owned()
        });

        (url, handle)
    }

    #[test]
    fn builds_client_for_agenda_config() {
        let source =
            HttpPageSource::new(ScrapeConfig::agenda().with_timeout(Duration::from_secs(5)));
        assert!(source.build_client().is_ok());
        assert_eq!(source.describe(), crate::AGENDA_URL);
    }

    #[tokio::test]
    async fn returns_body_and_sends_configured_headers() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", "<table></table>").await;
        let source = HttpPageSource::new(
            ScrapeConfig::new(&url)
                .with_header("User-Agent", crate::BROWSER_USER_AGENT)
                .with_header("Accept-Language", "nl-NL"),
        );

        let body = source.fetch_html().await.unwrap();
        let request = server.await.unwrap().to_ascii_lowercase();

        assert_eq!(body, "<table></table>");
        assert!(request.starts_with("get /agenda/festivals "));
        assert!(request.contains(&format!(
            "user-agent: {}\r\n",
            crate::BROWSER_USER_AGENT.to_ascii_lowercase()
        )));
        assert!(request.contains("accept-language: nl-nl\r\n"));
    }

    #[tokio::test]
    async fn non_success_status_body_is_passed_through() {
        let (url, server) =
            serve_once("HTTP/1.1 404 Not Found", "<p>Pagina niet gevonden</p>").await;
        let source = HttpPageSource::new(ScrapeConfig::new(&url));

        let body = source.fetch_html().await.unwrap();
        server.await.unwrap();

        assert_eq!(body, "<p>Pagina niet gevonden</p>");
    }

    #[tokio::test]
    async fn connection_failure_is_an_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/agenda/festivals", listener.local_addr().unwrap());
        drop(listener);

        let source =
            HttpPageSource::new(ScrapeConfig::new(&url).with_timeout(Duration::from_secs(5)));

        assert!(matches!(
            source.fetch_html().await,
            Err(ScrapeError::Http(_))
        ));
    }

    #[test]
    fn rejects_invalid_header_name_before_sending() {
        let source =
            HttpPageSource::new(ScrapeConfig::new("http://localhost").with_header("bad header", "x"));
        let err = source.build_client().unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn rejects_invalid_header_value() {
        let source = HttpPageSource::new(
            ScrapeConfig::new("http://localhost").with_header("User-Agent", "line\nbreak"),
        );
        assert!(matches!(
            source.build_client(),
            Err(ScrapeError::Parse(_))
        ));
    }
}
