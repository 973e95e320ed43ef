//! Gemini REST client for Veo long-running video generation.
//!
//! Flow: `POST models/{model}:predictLongRunning` returns an operation name,
//! `GET {operation}` is polled until `done`, then the sample's video URI is
//! downloaded with the same API key.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictRequest {
    pub instances: Vec<Instance>,
    pub parameters: Parameters,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Instance {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoRef>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub uri: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub aspect_ratio: String,
    pub resolution: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<OperationResponse>,
    pub error: Option<ApiStatus>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub generate_video_response: GenerateVideoResponse,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
    #[serde(default)]
    pub rai_media_filtered_reasons: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneratedSample {
    pub video: VideoRef,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiStatus {
    #[serde(default)]
    pub code: i32,
    pub message: String,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ApiStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum VeoError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { code: i32, message: String },
    #[error("Video was blocked by the provider's safety filters: {0}")]
    Filtered(String),
    #[error("Video generation finished without a video")]
    MissingVideo,
    #[error("Video generation timed out after {0} status checks")]
    TimedOut(u32),
    #[error("Video file too large (>{0} bytes)")]
    TooLarge(u64),
    #[error("Invalid provider URL: {0}")]
    Url(String),
}

/// Builds a [`VeoError`] from a non-success response body, keeping the
/// provider's message verbatim when the body has the usual error envelope.
pub fn api_error(status: u16, body: &str) -> VeoError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => VeoError::Api {
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => VeoError::Api {
            code: status as i32,
            message: format!("Provider returned HTTP {status}"),
        },
    }
}

impl Operation {
    /// `Ok(None)` while the operation is still running.
    pub fn into_video(self) -> Result<Option<VideoRef>, VeoError> {
        if !self.done {
            return Ok(None);
        }
        if let Some(error) = self.error {
            return Err(VeoError::Api {
                code: error.code,
                message: error.message,
            });
        }
        let response = self
            .response
            .map(|r| r.generate_video_response)
            .unwrap_or_default();
        if let Some(sample) = response.generated_samples.into_iter().next() {
            return Ok(Some(sample.video));
        }
        if !response.rai_media_filtered_reasons.is_empty() {
            return Err(VeoError::Filtered(
                response.rai_media_filtered_reasons.join("; "),
            ));
        }
        Err(VeoError::MissingVideo)
    }
}

#[cfg(feature = "ssr")]
pub use client::{VeoClient, VeoConfig};

#[cfg(feature = "ssr")]
mod client {
    use consts::{limits, GEMINI_API_BASE, GEMINI_API_KEY_HEADER};
    use reqwest::{Response, Url};
    use serde::de::DeserializeOwned;
    use tracing::{debug, info, instrument};
    use web_time::Duration;

    use super::{api_error, Operation, PredictRequest, VeoError, VideoRef};

    #[derive(Clone, Debug)]
    pub struct VeoConfig {
        pub base_url: Url,
        pub poll_interval: Duration,
        pub max_polls: u32,
        pub max_video_bytes: u64,
    }

    impl Default for VeoConfig {
        fn default() -> Self {
            Self {
                base_url: GEMINI_API_BASE.clone(),
                poll_interval: limits::VEO_POLL_INTERVAL,
                max_polls: limits::VEO_MAX_POLLS,
                max_video_bytes: limits::MAX_VIDEO_BYTES,
            }
        }
    }

    #[derive(Clone, Debug)]
    pub struct VeoClient {
        http: reqwest::Client,
        config: VeoConfig,
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, VeoError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }
        Ok(response.json::<T>().await?)
    }

    impl VeoClient {
        pub fn new(config: VeoConfig) -> Self {
            Self {
                http: reqwest::Client::new(),
                config,
            }
        }

        fn endpoint(&self, path: &str) -> Result<Url, VeoError> {
            self.config
                .base_url
                .join(path)
                .map_err(|e| VeoError::Url(e.to_string()))
        }

        /// Starts a generation and waits for its first sample.
        #[instrument(skip(self, api_key, request))]
        pub async fn generate(
            &self,
            api_key: &str,
            model: &str,
            request: &PredictRequest,
        ) -> Result<VideoRef, VeoError> {
            let url = self.endpoint(&format!("models/{model}:predictLongRunning"))?;
            let response = self
                .http
                .post(url)
                .header(GEMINI_API_KEY_HEADER, api_key)
                .json(request)
                .send()
                .await?;
            let mut operation: Operation = read_json(response).await?;
            info!(operation = %operation.name, "veo operation started");

            for attempt in 0..self.config.max_polls {
                if operation.done {
                    return operation.into_video()?.ok_or(VeoError::MissingVideo);
                }
                tokio::time::sleep(self.config.poll_interval).await;
                debug!(attempt, operation = %operation.name, "polling veo operation");
                operation = self.operation(api_key, &operation.name).await?;
            }

            match operation.into_video()? {
                Some(video) => Ok(video),
                None => Err(VeoError::TimedOut(self.config.max_polls)),
            }
        }

        async fn operation(&self, api_key: &str, name: &str) -> Result<Operation, VeoError> {
            let url = self.endpoint(name)?;
            let response = self
                .http
                .get(url)
                .header(GEMINI_API_KEY_HEADER, api_key)
                .send()
                .await?;
            read_json(response).await
        }

        /// Only URIs on the configured provider origin may receive the key.
        fn download_url(&self, uri: &str) -> Result<Url, VeoError> {
            let url = Url::parse(uri).map_err(|e| VeoError::Url(e.to_string()))?;
            let base = &self.config.base_url;
            if url.scheme() != base.scheme()
                || url.host_str() != base.host_str()
                || url.port_or_known_default() != base.port_or_known_default()
            {
                return Err(VeoError::Url(format!(
                    "{} is not on the provider host",
                    url.origin().ascii_serialization()
                )));
            }
            Ok(url)
        }

        /// Pulls the finished clip. The URI is absolute and already points at
        /// the media download.
        #[instrument(skip(self, api_key))]
        pub async fn download(&self, api_key: &str, uri: &str) -> Result<Vec<u8>, VeoError> {
            let url = self.download_url(uri)?;
            let max = self.config.max_video_bytes;
            let mut response = self
                .http
                .get(url)
                .header(GEMINI_API_KEY_HEADER, api_key)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(api_error(status.as_u16(), &body));
            }
            if response.content_length().is_some_and(|len| len > max) {
                return Err(VeoError::TooLarge(max));
            }

            // chunked bodies carry no length, so count as we go
            let mut bytes = Vec::new();
            while let Some(chunk) = response.chunk().await? {
                if (bytes.len() + chunk.len()) as u64 > max {
                    return Err(VeoError::TooLarge(max));
                }
                bytes.extend_from_slice(&chunk);
            }
            info!(bytes = bytes.len(), "downloaded generated video");
            Ok(bytes)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extend_request_serializes_video_reference() {
        let request = PredictRequest {
            instances: vec![Instance {
                prompt: "the river widens".into(),
                image: None,
                video: Some(VideoRef {
                    uri: "https://example.test/files/abc".into(),
                }),
            }],
            parameters: Parameters {
                aspect_ratio: "16:9".into(),
                resolution: "720p".into(),
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "instances": [{
                    "prompt": "the river widens",
                    "video": { "uri": "https://example.test/files/abc" }
                }],
                "parameters": { "aspectRatio": "16:9", "resolution": "720p" }
            })
        );
    }

    #[test]
    fn image_instance_uses_inline_base64_fields() {
        let instance = Instance {
            prompt: String::new(),
            image: Some(InlineImage {
                bytes_base64_encoded: "aGVsbG8=".into(),
                mime_type: "image/jpeg".into(),
            }),
            video: None,
        };

        assert_eq!(
            serde_json::to_value(&instance).unwrap(),
            json!({ "image": { "bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/jpeg" } })
        );
    }

    #[test]
    fn finished_operation_yields_first_sample() {
        let op: Operation = serde_json::from_value(json!({
            "name": "models/veo/operations/123",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [
                        { "video": { "uri": "https://example.test/files/a:download?alt=media" } }
                    ]
                }
            }
        }))
        .unwrap();

        let video = op.into_video().unwrap().expect("video");
        assert_eq!(video.uri, "https://example.test/files/a:download?alt=media");
    }

    #[test]
    fn running_operation_has_no_video_yet() {
        let op: Operation =
            serde_json::from_value(json!({ "name": "models/veo/operations/123" })).unwrap();
        assert!(op.into_video().unwrap().is_none());
    }

    #[test]
    fn operation_error_message_is_kept_verbatim() {
        let op: Operation = serde_json::from_value(json!({
            "name": "models/veo/operations/123",
            "done": true,
            "error": { "code": 3, "message": "Prompt violates usage guidelines." }
        }))
        .unwrap();

        let err = op.into_video().unwrap_err();
        assert_eq!(err.to_string(), "Prompt violates usage guidelines.");
    }

    #[test]
    fn filtered_operation_reports_reasons() {
        let op: Operation = serde_json::from_value(json!({
            "name": "models/veo/operations/9",
            "done": true,
            "response": {
                "generateVideoResponse": { "raiMediaFilteredReasons": ["celebrity likeness"] }
            }
        }))
        .unwrap();

        assert!(matches!(op.into_video(), Err(VeoError::Filtered(r)) if r == "celebrity likeness"));
    }

    #[test]
    fn error_envelope_message_survives() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        let err = api_error(404, body);
        assert_eq!(err.to_string(), "Requested entity was not found.");
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status() {
        let err = api_error(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "Provider returned HTTP 502");
    }
}
