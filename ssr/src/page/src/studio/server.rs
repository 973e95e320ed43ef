use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use state::videogen::{GenerateVideoParams, VideoHandle};

#[cfg(feature = "ssr")]
mod imp {
    use consts::CREDENTIAL_INVALID_SIGNAL;
    use leptos::prelude::*;
    use state::server::ServerApiKey;
    use state::videogen::{GenerateVideoParams, GenerationMode};
    use utils::veo::{InlineImage, Instance, Parameters, PredictRequest, VeoClient, VideoRef};

    pub fn veo_client() -> Result<VeoClient, ServerFnError> {
        use_context::<VeoClient>().ok_or_else(|| ServerFnError::new("Video client is not configured"))
    }

    /// A key typed in the browser wins over the server's own key. With neither
    /// the error carries the credential signal so the UI asks for one again.
    pub fn resolve_api_key(from_client: Option<String>) -> Result<String, ServerFnError> {
        if let Some(key) = from_client.filter(|k| !k.trim().is_empty()) {
            return Ok(key);
        }
        use_context::<ServerApiKey>()
            .and_then(|k| k.0)
            .ok_or_else(|| {
                ServerFnError::new(format!(
                    "{CREDENTIAL_INVALID_SIGNAL}: no Gemini API key is selected"
                ))
            })
    }

    pub fn predict_request(params: &GenerateVideoParams) -> PredictRequest {
        let instance = match params.mode {
            GenerationMode::TextToVideo => Instance {
                prompt: params.prompt.trim().to_string(),
                ..Default::default()
            },
            GenerationMode::FramesToVideo => Instance {
                prompt: params.prompt.trim().to_string(),
                image: params.start_frame.as_ref().map(|img| InlineImage {
                    bytes_base64_encoded: img.base64.clone(),
                    mime_type: img.mime_type.clone(),
                }),
                video: None,
            },
            GenerationMode::ExtendVideo => Instance {
                prompt: params.prompt.trim().to_string(),
                image: None,
                video: params.input_video.as_ref().map(|v| VideoRef { uri: v.uri.clone() }),
            },
        };
        PredictRequest {
            instances: vec![instance],
            parameters: Parameters {
                aspect_ratio: params.aspect_ratio.as_str().to_string(),
                resolution: params.resolution.as_str().to_string(),
            },
        }
    }
}

/// Runs one generation on the provider and returns the handle of the first
/// sample. Provider messages are passed through untouched.
#[server(endpoint = "studio/generate_video", input = Json, output = Json)]
pub async fn generate_video(
    params: GenerateVideoParams,
    api_key: Option<String>,
) -> Result<VideoHandle, ServerFnError> {
    params
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let api_key = imp::resolve_api_key(api_key)?;
    let client = imp::veo_client()?;
    let request = imp::predict_request(&params);

    tracing::info!(
        mode = params.mode.key(),
        resolution = params.resolution.as_str(),
        model = params.model.model_id(),
        "starting video generation"
    );
    let video = client
        .generate(&api_key, params.model.model_id(), &request)
        .await
        .map_err(|e| {
            tracing::warn!("video generation failed: {e}");
            ServerFnError::new(e.to_string())
        })?;

    Ok(VideoHandle { uri: video.uri })
}

#[server(endpoint = "studio/fetch_video_bytes", input = Json, output = Json)]
pub async fn fetch_video_bytes(
    uri: String,
    api_key: Option<String>,
) -> Result<Vec<u8>, ServerFnError> {
    let api_key = imp::resolve_api_key(api_key)?;
    let client = imp::veo_client()?;
    client
        .download(&api_key, &uri)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Whether the server holds its own `GEMINI_API_KEY`, which counts as a
/// selected credential for every visitor.
#[server(endpoint = "studio/has_server_api_key", output = Json)]
pub async fn has_server_api_key() -> Result<bool, ServerFnError> {
    Ok(use_context::<state::server::ServerApiKey>().is_some_and(|k| k.0.is_some()))
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::imp::predict_request;
    use state::videogen::{
        AspectRatio, GenerateVideoParams, GenerationMode, ImageInput, Resolution, VideoHandle,
    };

    #[test]
    fn frames_request_carries_inline_image() {
        let params = GenerateVideoParams {
            prompt: "  steam rising off rice  ".into(),
            mode: GenerationMode::FramesToVideo,
            aspect_ratio: AspectRatio::Portrait,
            start_frame: Some(ImageInput {
                mime_type: "image/png".into(),
                base64: "iVBORw0KGgo=".into(),
            }),
            ..Default::default()
        };

        let request = predict_request(&params);
        let instance = &request.instances[0];
        assert_eq!(instance.prompt, "steam rising off rice");
        assert_eq!(
            instance.image.as_ref().map(|i| i.mime_type.as_str()),
            Some("image/png")
        );
        assert!(instance.video.is_none());
        assert_eq!(request.parameters.aspect_ratio, "9:16");
    }

    #[test]
    fn extend_request_references_previous_video() {
        let params = GenerateVideoParams::extend_from(
            &GenerateVideoParams::text("a river at dawn"),
            VideoHandle {
                uri: "https://example.test/files/river".into(),
            },
        );

        let request = predict_request(&params);
        assert_eq!(
            request.instances[0].video.as_ref().map(|v| v.uri.as_str()),
            Some("https://example.test/files/river")
        );
        assert_eq!(request.parameters.resolution, Resolution::P720.as_str());
    }
}
