//! Prediction endpoint abstraction.

use crate::error::{DigitpadError, Result};
use crate::predict::protocol::{EndpointReply, PredictRequest};
use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use std::time::Duration;

/// Something that accepts an encoded drawing and answers with an HTTP-like reply.
///
/// Implementations return `Err` only when no reply was obtained at all; status codes are left
/// for the caller to interpret.
#[async_trait]
pub trait PredictionEndpoint: Send + Sync {
    async fn post(&self, request: &PredictRequest) -> Result<EndpointReply>;

    /// Human readable target, shown in the footer.
    fn describe(&self) -> String;
}

/// `reqwest` backed endpoint posting JSON to a fixed URL.
pub struct HttpEndpoint {
    client: reqwest::Client,
    url: Url,
}

impl HttpEndpoint {
    /// Build a client for `url`. No timeout is applied unless one is given.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| DigitpadError::invalid_argument(format!("endpoint '{}': {}", url, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DigitpadError::other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PredictionEndpoint for HttpEndpoint {
    async fn post(&self, request: &PredictRequest) -> Result<EndpointReply> {
        debug!(
            "POST {} ({} bytes of image data)",
            self.url,
            request.image.len()
        );
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!("endpoint answered {} with {} bytes", status, body.len());
        Ok(EndpointReply::new(status, body.to_vec()))
    }

    fn describe(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{}:{}{}", host, port, self.url.path()),
            None => format!("{}{}", host, self.url.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_url() {
        let err = HttpEndpoint::new("not a url", None).err().unwrap();
        assert!(matches!(err, DigitpadError::InvalidArgument { .. }));
    }

    #[test]
    fn describe_drops_scheme() {
        let endpoint = HttpEndpoint::new("https://example.com/predict", None).unwrap();
        assert_eq!(endpoint.describe(), "example.com/predict");

        let local =
            HttpEndpoint::new("http://127.0.0.1:5000/predict", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(local.describe(), "127.0.0.1:5000/predict");
        assert_eq!(local.url().scheme(), "http");
    }
}
