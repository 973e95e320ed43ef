use consts::veo;
use leptos::prelude::*;
use state::generation::{CredentialError, CredentialHost, VideoGenerator};
use state::videogen::{GenerateVideoParams, GeneratedVideo, VideoGenError};
use utils::web::object_url_for;

use super::server::{fetch_video_bytes, generate_video, has_server_api_key};

/// Gemini key for the current page session. Nothing is persisted, a reload
/// starts without a key.
#[derive(Clone, Copy)]
pub struct SessionKeyHost {
    key: RwSignal<Option<String>>,
    draft: RwSignal<String>,
}

impl Default for SessionKeyHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionKeyHost {
    pub fn new() -> Self {
        Self {
            key: RwSignal::new(None),
            draft: RwSignal::new(String::new()),
        }
    }

    /// Text currently typed into the key dialog.
    pub fn draft(&self) -> RwSignal<String> {
        self.draft
    }

    pub fn key(&self) -> Option<String> {
        self.key.try_get_untracked().flatten()
    }
}

impl CredentialHost for SessionKeyHost {
    async fn has_selected_api_key(&self) -> bool {
        if self.key().is_some() {
            return true;
        }
        match has_server_api_key().await {
            Ok(has_key) => has_key,
            Err(e) => {
                log::warn!("could not ask the server for its api key: {e}");
                false
            }
        }
    }

    /// Commits whatever is in the dialog. The key is not verified here; an
    /// unusable key surfaces later as a credential error from the provider.
    async fn open_select_key(&self) -> Result<(), CredentialError> {
        let typed = self
            .draft
            .try_get_untracked()
            .ok_or_else(|| CredentialError::Host("key dialog is gone".into()))?;
        let typed = typed.trim().to_string();
        self.key
            .try_set(Some(typed))
            .map_or(Ok(()), |_| Err(CredentialError::Host("session was closed".into())))?;
        _ = self.draft.try_set(String::new());
        Ok(())
    }
}

/// Calls the studio server functions and turns the downloaded clip into a
/// playable object URL.
#[derive(Clone, Copy)]
pub struct ServerVideoGenerator {
    session: SessionKeyHost,
}

impl ServerVideoGenerator {
    pub fn new(session: SessionKeyHost) -> Self {
        Self { session }
    }
}

impl VideoGenerator for ServerVideoGenerator {
    async fn generate(
        &self,
        params: GenerateVideoParams,
    ) -> Result<GeneratedVideo, VideoGenError> {
        let api_key = self.session.key();
        let handle = generate_video(params, api_key.clone()).await?;
        let bytes = fetch_video_bytes(handle.uri.clone(), api_key).await?;
        log::info!("generated video is {} bytes", bytes.len());
        let object_url = object_url_for(&bytes, veo::VIDEO_MIME).map_err(VideoGenError::Transport)?;

        Ok(GeneratedVideo {
            object_url,
            bytes,
            uri: handle.uri.clone(),
            video: handle,
        })
    }
}
