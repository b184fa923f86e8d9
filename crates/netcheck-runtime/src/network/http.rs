//! HTTP and HTTPS liveness probes.
//!
//! One `GET` against the host root. A 200 or a 404 counts as alive: either
//! one proves a web server is answering.

use std::error::Error as _;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use netcheck_core::{Probe, ProbeError, ProbeOutcome};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// URL scheme of an [`HttpProbe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Port used when none is configured.
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    /// Lower-case scheme as it appears in a URL.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe for the `HTTP` and `HTPS` check kinds.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    scheme: Scheme,
    port: u16,
    timeout: Duration,
}

impl HttpProbe {
    /// Plain HTTP on port 80.
    pub const fn http(timeout: Duration) -> Self {
        Self::new(Scheme::Http, timeout)
    }

    /// HTTPS on port 443.
    pub const fn https(timeout: Duration) -> Self {
        Self::new(Scheme::Https, timeout)
    }

    /// `scheme` on its default port, with a total per-request `timeout`.
    pub const fn new(scheme: Scheme, timeout: Duration) -> Self {
        Self {
            scheme,
            port: scheme.default_port(),
            timeout,
        }
    }

    /// Connect to `port` instead of the scheme default.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Scheme this probe requests.
    pub const fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// URL requested for `host`.
    pub fn url(&self, host: &str) -> String {
        if host.contains(':') && !host.starts_with('[') {
            format!("{}://[{host}]:{}", self.scheme, self.port)
        } else {
            format!("{}://{host}:{}", self.scheme, self.port)
        }
    }

    async fn get(&self, host: &str) -> Result<(), ProbeError> {
        // A fresh client per call keeps TLS sessions from being shared
        // between hosts.
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ProbeError::Internal(format!("failed to build HTTP client: {e}")))?;

        let url = self.url(host);
        debug!(%url, "sending request");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        match response.status() {
            StatusCode::OK | StatusCode::NOT_FOUND => Ok(()),
            status => Err(ProbeError::UnexpectedStatus(status.as_u16())),
        }
    }

    fn transport_error(&self, err: &reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            ProbeError::Timeout {
                after: self.timeout,
            }
        } else {
            ProbeError::Transport(error_chain(err))
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &str) -> ProbeOutcome {
        self.get(target).await.into()
    }
}

/// `err` and all of its sources, joined with `": "`.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one connection with `status_line` and an empty body.
    async fn serve_once(status_line: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response =
                format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        port
    }

    async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    fn probe(port: u16) -> HttpProbe {
        HttpProbe::http(Duration::from_secs(5)).with_port(port)
    }

    #[test]
    fn test_defaults_and_urls() {
        let http = HttpProbe::http(Duration::from_secs(5));
        assert_eq!(http.url("example.test"), "http://example.test:80");
        let https = HttpProbe::https(Duration::from_secs(5));
        assert_eq!(https.url("example.test"), "https://example.test:443");
        assert_eq!(https.url("::1"), "https://[::1]:443");
        assert_eq!(https.scheme(), Scheme::Https);
    }

    #[tokio::test]
    async fn test_ok_passes() {
        let port = serve_once("200 OK").await;
        assert!(probe(port).probe("127.0.0.1").await.passed());
    }

    #[tokio::test]
    async fn test_not_found_passes() {
        let port = serve_once("404 Not Found").await;
        assert!(probe(port).probe("127.0.0.1").await.passed());
    }

    #[tokio::test]
    async fn test_other_status_is_error() {
        let port = serve_once("503 Service Unavailable").await;
        let outcome = probe(port).probe("127.0.0.1").await;
        assert_eq!(
            outcome.diagnostic().unwrap().to_string(),
            "unexpected status code: 503"
        );
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let port = closed_port().await;
        let outcome = probe(port).probe("127.0.0.1").await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Error(ProbeError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let probe = HttpProbe::http(Duration::from_millis(200)).with_port(port);
        let outcome = probe.probe("127.0.0.1").await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Error(ProbeError::Timeout { .. })
        ));
    }
}
