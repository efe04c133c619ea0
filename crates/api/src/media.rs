//! Media host delegate.
//!
//! File uploads (resumes, logos, profile pictures) are handed to an external
//! media host that returns a durable URL. The host is reached over HTTP and
//! treated purely as a collaborator: any response that does not carry a
//! `secure_url` is a failure.

use async_trait::async_trait;

/// A successfully stored file.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    /// Durable URL of the stored file.
    pub secure_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upload response did not contain a secure_url")]
    MissingUrl,
}

/// Abstraction over the external media host.
///
/// Implemented by [`HttpMediaStore`] in production; tests substitute a stub.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a file, returning its durable URL.
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, MediaError>;
}

/// HTTP client for the media host's upload endpoint.
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl HttpMediaStore {
    pub fn new(upload_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            api_key,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedMedia, MediaError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(content_type)
            .map_err(MediaError::Request)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.upload_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let body: serde_json::Value = response.json().await?;

        let secure_url = body
            .get("secure_url")
            .and_then(|v| v.as_str())
            .ok_or(MediaError::MissingUrl)?;

        tracing::debug!(file_name, secure_url, "Media host upload complete");
        Ok(UploadedMedia {
            secure_url: secure_url.to_owned(),
        })
    }
}
