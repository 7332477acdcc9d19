use crate::request::HttpRequest;
use anyhow::{Context, anyhow};
use polyglot_core::text::preview_text;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

// Upstream error pages can be large or echo the prompt back.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    pub fn ensure_success(self, what: &str) -> anyhow::Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(anyhow!(
            "{what} request failed: status={} body={}",
            self.status,
            preview_text(&String::from_utf8_lossy(&self.body), ERROR_BODY_PREVIEW_CHARS)
        ))
    }
}

pub async fn execute(req: &HttpRequest, timeouts: HttpTimeouts) -> anyhow::Result<HttpResponse> {
    // A hung endpoint would otherwise keep the session busy forever.
    let client = reqwest::Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request)
        .build()
        .context("build http client")?;

    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .with_context(|| format!("invalid header name: {k}"))?;
        let value =
            HeaderValue::from_str(v).with_context(|| format!("invalid header value for {k}"))?;
        headers.insert(name, value);
    }

    let builder = client
        .post(&req.url)
        .headers(headers)
        .body(req.json_body.clone());

    let resp = builder.send().await.context("http request failed")?;
    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .await
        .context("failed reading response body")?
        .to_vec();

    Ok(HttpResponse { status, body })
}
