use crate::config::ClientOptions;
use crate::constants::FORM_CONTENT_TYPE;
use crate::error::{Result, ShrinkError};
use crate::identity::ClientIdentity;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputInfo {
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputInfo {
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub ratio: f64,
    pub url: String,
}

/// What the service reports after accepting an upload. Only valid for the
/// single retrieval that follows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompressionDescriptor {
    pub input: InputInfo,
    pub output: OutputInfo,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShrinkResponse {
    // Keyed on the presence of `error`, whatever its JSON type
    Rejected {
        error: serde_json::Value,
        #[serde(default)]
        message: Option<String>,
    },
    Accepted(CompressionDescriptor),
}

/// Decodes a submit response body.
///
/// # Arguments
/// * `status` - HTTP status, kept for the error message only
/// * `body` - Raw response body
///
/// # Returns
/// * `Ok(descriptor)` - The service accepted the image
/// * `Err(ShrinkError::Rejected)` - The body carried an `error` field
/// * `Err(ShrinkError::MalformedResponse)` - The body was not a known shape
pub fn parse_shrink_response(status: u16, body: &[u8]) -> Result<CompressionDescriptor> {
    let response: ShrinkResponse =
        serde_json::from_slice(body).map_err(|e| ShrinkError::MalformedResponse {
            status,
            reason: e.to_string(),
        })?;

    match response {
        ShrinkResponse::Accepted(descriptor) => Ok(descriptor),
        ShrinkResponse::Rejected { error, message } => {
            let error = match error {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            Err(ShrinkError::Rejected {
                message: message.unwrap_or_else(|| error.clone()),
                error,
            })
        }
    }
}

/// The two-step remote protocol: submit raw bytes, then fetch the artifact.
#[async_trait]
pub trait CompressionService: Send + Sync {
    async fn submit(&self, image: Vec<u8>) -> Result<CompressionDescriptor>;

    async fn fetch(&self, descriptor: &CompressionDescriptor) -> Result<Vec<u8>>;
}

/// HTTP implementation of [`CompressionService`].
#[derive(Debug, Clone)]
pub struct ShrinkClient {
    http: Client,
    options: ClientOptions,
}

impl ShrinkClient {
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.accept_invalid_certs)
            .build()?;

        Ok(Self { http, options })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}

#[async_trait]
impl CompressionService for ShrinkClient {
    async fn submit(&self, image: Vec<u8>) -> Result<CompressionDescriptor> {
        let identity = ClientIdentity::for_mode(self.options.identity);
        tracing::debug!(
            endpoint = %self.options.endpoint,
            user_agent = identity.user_agent,
            bytes = image.len(),
            "submitting image"
        );

        let response = self
            .http
            .post(self.options.endpoint.clone())
            .headers(identity.headers())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(image)
            .send()
            .await?;

        // Rejections arrive with 4xx statuses and a JSON body, so the body
        // is decoded before the status is considered.
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        parse_shrink_response(status, &body)
    }

    async fn fetch(&self, descriptor: &CompressionDescriptor) -> Result<Vec<u8>> {
        let raw = &descriptor.output.url;
        let url = Url::parse(raw).map_err(|e| ShrinkError::InvalidUrl(raw.clone(), e))?;
        tracing::debug!(%url, "fetching compressed artifact");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(body.to_vec())
    }
}
