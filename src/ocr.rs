//! Gateway to the remote OCR service.
//!
//! One endpoint: `POST {base}/ocr` with a multipart body whose `file` part
//! carries the raw image bytes. A successful response is a JSON object with
//! an `extracted_text` field; everything else maps onto a typed [`OcrError`].

use crate::cancellation::CancellationToken;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("could not reach the OCR service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("OCR service responded with HTTP {status}")]
    Server { status: reqwest::StatusCode },
    #[error("OCR service returned an unexpected body: {0}")]
    Decode(String),
    #[error("request was cancelled")]
    Cancelled,
}

#[derive(Debug, Deserialize)]
struct OcrResponse {
    extracted_text: String,
}

/// Thin client around the single OCR endpoint. Cloning shares the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
}

impl OcrClient {
    pub fn new(base_url: &str) -> Self {
        OcrClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/ocr", self.base_url)
    }

    /// Upload one image and return the extracted text.
    ///
    /// The token is checked before the request goes out and again before the
    /// body is decoded; a cancelled request does no further work. No timeout
    /// is applied beyond the transport's own.
    pub async fn extract_text(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        cancel: &CancellationToken,
    ) -> Result<String, OcrError> {
        if cancel.is_cancelled() {
            return Err(OcrError::Cancelled);
        }

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let url = self.endpoint();
        debug!(%url, file_name, "Dispatching OCR request");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(OcrError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Server { status });
        }

        let body = response.text().await.map_err(OcrError::Transport)?;
        if cancel.is_cancelled() {
            return Err(OcrError::Cancelled);
        }

        let decoded: OcrResponse =
            serde_json::from_str(&body).map_err(|err| OcrError::Decode(err.to_string()))?;
        Ok(decoded.extracted_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_on_base_url_is_trimmed() {
        let client = OcrClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000/ocr");
    }

    #[test]
    fn well_formed_body_decodes() {
        let decoded: OcrResponse =
            serde_json::from_str(r#"{"extracted_text": "Hello world"}"#).expect("decodes");
        assert_eq!(decoded.extracted_text, "Hello world");
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let decoded: OcrResponse =
            serde_json::from_str(r#"{"extracted_text": "hi", "model": "whatever"}"#)
                .expect("decodes");
        assert_eq!(decoded.extracted_text, "hi");
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let result = serde_json::from_str::<OcrResponse>(r#"{"text": "hi"}"#);
        assert!(result.is_err());
    }
}
