use consts::{veo, CREDENTIAL_INVALID_SIGNAL};
use leptos::prelude::ServerFnError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationMode {
    #[default]
    TextToVideo,
    FramesToVideo,
    ExtendVideo,
}

impl GenerationMode {
    pub const ALL: [Self; 3] = [Self::TextToVideo, Self::FramesToVideo, Self::ExtendVideo];

    pub const fn label(self) -> &'static str {
        match self {
            Self::TextToVideo => "Text to video",
            Self::FramesToVideo => "Image to video",
            Self::ExtendVideo => "Extend video",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::TextToVideo => "text",
            Self::FramesToVideo => "frames",
            Self::ExtendVideo => "extend",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    #[default]
    P720,
    P1080,
}

impl Resolution {
    pub const ALL: [Self; 2] = [Self::P720, Self::P1080];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P720 => "720p",
            Self::P1080 => "1080p",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    Landscape,
    Portrait,
}

impl AspectRatio {
    pub const ALL: [Self; 2] = [Self::Landscape, Self::Portrait];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == key)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VeoModel {
    #[default]
    Fast,
    Quality,
}

impl VeoModel {
    pub const ALL: [Self; 2] = [Self::Fast, Self::Quality];

    pub const fn model_id(self) -> &'static str {
        match self {
            Self::Fast => veo::FAST_MODEL,
            Self::Quality => veo::QUALITY_MODEL,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fast => "Veo Fast",
            Self::Quality => "Veo",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.model_id() == key)
    }
}

/// Image types the provider takes as a start frame.
pub const START_FRAME_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// Start frame for image-to-video, already base64 encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInput {
    pub mime_type: String,
    pub base64: String,
}

impl ImageInput {
    /// Splits a `data:<mime>;base64,<payload>` URL as produced by `FileReader`.
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let rest = data_url.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let mime_type = meta.strip_suffix(";base64")?;
        if payload.is_empty() || !START_FRAME_MIME_TYPES.contains(&mime_type) {
            return None;
        }
        Some(Self {
            mime_type: mime_type.to_string(),
            base64: payload.to_string(),
        })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Opaque reference to a video the provider generated earlier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoHandle {
    pub uri: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateVideoParams {
    pub prompt: String,
    pub mode: GenerationMode,
    pub resolution: Resolution,
    pub aspect_ratio: AspectRatio,
    pub model: VeoModel,
    pub start_frame: Option<ImageInput>,
    pub input_video: Option<VideoHandle>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    #[error("Please describe the video you want")]
    EmptyPrompt,
    #[error("Please add a start image")]
    MissingStartFrame,
    #[error("There is no video to extend")]
    MissingInputVideo,
    #[error("Only 720p videos can be extended")]
    ExtendNeeds720p,
}

impl GenerateVideoParams {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Params for continuing `video`. The prompt is left for the user.
    pub fn extend_from(previous: &Self, video: VideoHandle) -> Self {
        Self {
            prompt: String::new(),
            mode: GenerationMode::ExtendVideo,
            resolution: previous.resolution,
            aspect_ratio: previous.aspect_ratio,
            model: previous.model,
            start_frame: None,
            input_video: Some(video),
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        match self.mode {
            GenerationMode::TextToVideo if self.prompt.trim().is_empty() => {
                Err(ParamsError::EmptyPrompt)
            }
            GenerationMode::FramesToVideo if self.start_frame.is_none() => {
                Err(ParamsError::MissingStartFrame)
            }
            GenerationMode::ExtendVideo if self.input_video.is_none() => {
                Err(ParamsError::MissingInputVideo)
            }
            GenerationMode::ExtendVideo if self.resolution != Resolution::P720 => {
                Err(ParamsError::ExtendNeeds720p)
            }
            _ => Ok(()),
        }
    }
}

/// A playable generation result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedVideo {
    /// Local blob URL usable as a `<video>` source.
    pub object_url: String,
    pub bytes: Vec<u8>,
    /// Remote content URI reported by the provider.
    pub uri: String,
    pub video: VideoHandle,
}

impl GeneratedVideo {
    pub fn size_label(&self) -> String {
        let mb = self.bytes.len() as f64 / (1024.0 * 1024.0);
        format!("{mb:.1} MB")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VideoGenError {
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    InvalidCredential(String),
    #[error("{0}")]
    Provider(String),
}

impl VideoGenError {
    /// Sorts a provider message into the credential or provider bucket.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(CREDENTIAL_INVALID_SIGNAL) {
            Self::InvalidCredential(message)
        } else {
            Self::Provider(message)
        }
    }

    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, Self::InvalidCredential(_))
    }
}

impl From<ServerFnError> for VideoGenError {
    fn from(e: ServerFnError) -> Self {
        match e {
            ServerFnError::Request(msg) | ServerFnError::Response(msg) => Self::Transport(msg),
            ServerFnError::ServerError(msg) => Self::classify(msg),
            e => Self::classify(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> VideoHandle {
        VideoHandle {
            uri: "https://example.test/files/abc".into(),
        }
    }

    #[test]
    fn text_prompt_must_not_be_blank() {
        assert_eq!(
            GenerateVideoParams::text("   ").validate(),
            Err(ParamsError::EmptyPrompt)
        );
        assert_eq!(GenerateVideoParams::text("a river at dawn").validate(), Ok(()));
    }

    #[test]
    fn frames_mode_needs_a_start_frame_but_no_prompt() {
        let mut params = GenerateVideoParams {
            mode: GenerationMode::FramesToVideo,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::MissingStartFrame));

        params.start_frame = Some(ImageInput {
            mime_type: "image/png".into(),
            base64: "iVBORw0KGgo=".into(),
        });
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn extend_carries_handle_resolution_and_framing() {
        let previous = GenerateVideoParams {
            prompt: "a river at dawn".into(),
            aspect_ratio: AspectRatio::Portrait,
            model: VeoModel::Quality,
            ..Default::default()
        };
        let extend = GenerateVideoParams::extend_from(&previous, handle());

        assert_eq!(extend.mode, GenerationMode::ExtendVideo);
        assert_eq!(extend.resolution, Resolution::P720);
        assert_eq!(extend.aspect_ratio, AspectRatio::Portrait);
        assert_eq!(extend.model, VeoModel::Quality);
        assert_eq!(extend.input_video, Some(handle()));
        assert!(extend.prompt.is_empty());
        assert_eq!(extend.validate(), Ok(()));
    }

    #[test]
    fn extend_rejects_1080p() {
        let params = GenerateVideoParams {
            mode: GenerationMode::ExtendVideo,
            resolution: Resolution::P1080,
            input_video: Some(handle()),
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParamsError::ExtendNeeds720p));
    }

    #[test]
    fn entity_not_found_is_a_credential_error() {
        let err = VideoGenError::classify("Requested entity was not found.");
        assert!(err.is_invalid_credential());
        assert_eq!(err.to_string(), "Requested entity was not found.");

        let err = VideoGenError::classify("Quota exceeded for veo");
        assert_eq!(err, VideoGenError::Provider("Quota exceeded for veo".into()));
    }

    #[test]
    fn server_fn_errors_keep_their_message() {
        let err: VideoGenError =
            ServerFnError::new("Requested entity was not found.").into();
        assert!(err.is_invalid_credential());

        let err: VideoGenError = ServerFnError::Request("connection reset".into()).into();
        assert_eq!(err, VideoGenError::Transport("connection reset".into()));
    }

    #[test]
    fn data_url_is_split_into_mime_and_payload() {
        let image = ImageInput::from_data_url("data:image/jpeg;base64,/9j/4AAQ").expect("image");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.base64, "/9j/4AAQ");
        assert_eq!(image.data_url(), "data:image/jpeg;base64,/9j/4AAQ");

        assert_eq!(ImageInput::from_data_url("data:text/plain;base64,aGk="), None);
        assert_eq!(ImageInput::from_data_url("data:image/png,raw"), None);
        assert_eq!(ImageInput::from_data_url("https://example.test/a.png"), None);
    }

    #[test]
    fn only_listed_image_types_are_start_frames() {
        for mime in START_FRAME_MIME_TYPES {
            let url = format!("data:{mime};base64,AAAA");
            assert!(ImageInput::from_data_url(&url).is_some(), "{mime}");
        }
        assert_eq!(ImageInput::from_data_url("data:image/gif;base64,R0lGOD"), None);
        assert_eq!(ImageInput::from_data_url("data:image/svg+xml;base64,PHN2Zz4="), None);
    }

    #[test]
    fn option_keys_round_trip_through_form_values() {
        for mode in GenerationMode::ALL {
            assert_eq!(GenerationMode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(Resolution::from_key("1080p"), Some(Resolution::P1080));
        assert_eq!(AspectRatio::from_key("9:16"), Some(AspectRatio::Portrait));
        assert_eq!(VeoModel::from_key(veo::FAST_MODEL), Some(VeoModel::Fast));
        assert_eq!(Resolution::from_key("4k"), None);
    }
}
