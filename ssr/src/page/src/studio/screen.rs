use state::generation::{AppStatus, GenerationState};
use state::videogen::{AspectRatio, GenerateVideoParams, GenerationMode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultSummary {
    pub object_url: String,
    pub uri: String,
    pub size_label: String,
    pub prompt: String,
    pub mode: GenerationMode,
    pub portrait: bool,
    pub can_extend: bool,
}

/// What the studio panel shows for a given controller state. Toggling the key
/// dialog alone never changes the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Form {
        defaults: GenerateVideoParams,
        error: Option<String>,
    },
    Loading {
        prompt: String,
        mode: GenerationMode,
    },
    Result(ResultSummary),
}

impl Screen {
    pub fn of(state: &GenerationState) -> Self {
        match state.status() {
            AppStatus::Idle => Self::Form {
                defaults: state.form_defaults(),
                error: None,
            },
            AppStatus::Error(msg) => Self::Form {
                defaults: state.form_defaults(),
                error: Some(msg.clone()),
            },
            AppStatus::Loading => {
                let params = state.form_defaults();
                Self::Loading {
                    prompt: params.prompt,
                    mode: params.mode,
                }
            }
            AppStatus::Success(video) => {
                let params = state.form_defaults();
                Self::Result(ResultSummary {
                    object_url: video.object_url.clone(),
                    uri: video.uri.clone(),
                    size_label: video.size_label(),
                    prompt: params.prompt,
                    mode: params.mode,
                    portrait: params.aspect_ratio == AspectRatio::Portrait,
                    can_extend: state.can_extend(),
                })
            }
        }
    }
}
