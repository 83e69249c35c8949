use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::spec::OpenApiSpec;
use super::{DocumentReader, from_content, from_json, from_yaml};
use crate::error::ParseError;

const TIMEOUT: Duration = Duration::from_secs(30);

/// Whether `input` names an `http://` or `https://` resource rather than a
/// local file.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Reads a document from an HTTP(S) URL.
///
/// Any non-2xx status is an error. The body is parsed as JSON or YAML based
/// on the `Content-Type` header, then the URL extension, then the content
/// itself.
#[derive(Debug, Clone)]
pub struct HttpDocumentReader {
    url: String,
    client: Option<Client>,
}

impl HttpDocumentReader {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: None,
        }
    }

    /// Use a preconfigured client (proxy, TLS, headers) instead of the
    /// default one.
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client: Some(client),
        }
    }

    fn client(&self) -> Result<Client, ParseError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| self.fetch_error(e))
    }

    fn fetch_error(&self, message: impl ToString) -> ParseError {
        ParseError::Fetch {
            url: self.url.clone(),
            message: message.to_string(),
        }
    }
}

impl DocumentReader for HttpDocumentReader {
    fn read(&self) -> Result<OpenApiSpec, ParseError> {
        log::debug!("fetching OpenAPI document from {}", self.url);
        let response = self
            .client()?
            .get(&self.url)
            .send()
            .map_err(|e| self.fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.fetch_error(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().map_err(|e| self.fetch_error(e))?;
        parse_body(&self.url, &content_type, &body)
    }
}

fn parse_body(url: &str, content_type: &str, body: &str) -> Result<OpenApiSpec, ParseError> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if content_type.contains("json") || path.ends_with(".json") {
        from_json(body)
    } else if content_type.contains("yaml") || path.ends_with(".yaml") || path.ends_with(".yml") {
        from_yaml(body)
    } else {
        from_content(body)
    }
}
