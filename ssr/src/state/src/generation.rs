//! Video studio state machine and the key-gated generation flow.
//!
//! [`GenerationState`] holds the single status flag (idle, loading, success,
//! error) together with the last submitted params and the one pending slot
//! used while the key dialog is open. [`GenerationController`] drives it
//! against a [`CredentialHost`] and a [`VideoGenerator`].

use std::cell::RefCell;

use leptos::prelude::*;

use crate::videogen::{GenerateVideoParams, GeneratedVideo, Resolution, VideoGenError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AppStatus {
    #[default]
    Idle,
    Loading,
    Success(GeneratedVideo),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("extend is only available for a finished 720p video")]
pub struct ExtendUnavailable;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationState {
    status: AppStatus,
    last_params: Option<GenerateVideoParams>,
    pending: Option<GenerateVideoParams>,
    key_dialog_open: bool,
}

impl GenerationState {
    pub fn status(&self) -> &AppStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, AppStatus::Loading)
    }

    pub fn result(&self) -> Option<&GeneratedVideo> {
        match &self.status {
            AppStatus::Success(video) => Some(video),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AppStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn last_params(&self) -> Option<&GenerateVideoParams> {
        self.last_params.as_ref()
    }

    pub fn pending(&self) -> Option<&GenerateVideoParams> {
        self.pending.as_ref()
    }

    pub fn key_dialog_open(&self) -> bool {
        self.key_dialog_open
    }

    /// Values the prompt form should start from.
    pub fn form_defaults(&self) -> GenerateVideoParams {
        self.last_params.clone().unwrap_or_default()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.key_dialog_open
    }

    /// Front door for a form submission. Returns the params to run when the
    /// request may go straight to the provider.
    pub fn submit(
        &mut self,
        params: GenerateVideoParams,
        has_key: bool,
    ) -> Option<GenerateVideoParams> {
        if !self.can_submit() {
            return None;
        }
        if let Err(e) = params.validate() {
            self.reject(params, e.to_string());
            return None;
        }
        if !has_key {
            self.await_key(params);
            return None;
        }
        Some(params)
    }

    /// Records params the provider would refuse anyway.
    pub fn reject(&mut self, params: GenerateVideoParams, message: String) {
        self.last_params = Some(params);
        self.status = AppStatus::Error(message);
    }

    /// Parks `params` in the pending slot and asks for a key.
    pub fn await_key(&mut self, params: GenerateVideoParams) {
        self.last_params = Some(params.clone());
        self.pending = Some(params);
        self.key_dialog_open = true;
        self.status = AppStatus::Idle;
    }

    /// Closes the dialog and hands back the parked request, at most once.
    pub fn key_selected(&mut self) -> Option<GenerateVideoParams> {
        if !self.key_dialog_open {
            return None;
        }
        self.key_dialog_open = false;
        self.pending.take()
    }

    pub fn key_selection_failed(&mut self) {
        self.key_dialog_open = false;
        self.pending = None;
        self.status = AppStatus::Idle;
    }

    /// Enters `Loading`. Returns false if a request is already in flight.
    pub fn begin(&mut self, params: GenerateVideoParams) -> bool {
        if self.is_loading() {
            return false;
        }
        self.last_params = Some(params);
        self.status = AppStatus::Loading;
        true
    }

    pub fn finish(
        &mut self,
        params: GenerateVideoParams,
        outcome: Result<GeneratedVideo, VideoGenError>,
    ) {
        match outcome {
            Ok(video) => self.status = AppStatus::Success(video),
            Err(e) if e.is_invalid_credential() => self.await_key(params),
            Err(e) => self.status = AppStatus::Error(e.to_string()),
        }
    }

    pub fn new_video(&mut self) {
        self.status = AppStatus::Idle;
        self.last_params = None;
    }

    pub fn can_extend(&self) -> bool {
        self.result().is_some()
            && self
                .last_params
                .as_ref()
                .is_some_and(|p| p.resolution == Resolution::P720)
    }

    /// Leaves `Success` with the form primed to continue the finished video.
    pub fn extend(&mut self) -> Result<(), ExtendUnavailable> {
        if !self.can_extend() {
            return Err(ExtendUnavailable);
        }
        let (Some(video), Some(previous)) = (self.result(), self.last_params.as_ref()) else {
            return Err(ExtendUnavailable);
        };
        let params = GenerateVideoParams::extend_from(previous, video.video.clone());
        self.last_params = Some(params);
        self.status = AppStatus::Idle;
        Ok(())
    }

    pub fn retry_params(&self) -> Option<GenerateVideoParams> {
        if self.is_loading() {
            return None;
        }
        self.last_params.clone()
    }
}

/// Where the controller keeps its [`GenerationState`].
pub trait GenerationStore {
    fn with_state<R>(&self, f: impl FnOnce(&GenerationState) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut GenerationState) -> R) -> Option<R>;
}

impl GenerationStore for RwSignal<GenerationState> {
    fn with_state<R>(&self, f: impl FnOnce(&GenerationState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut GenerationState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

impl GenerationStore for RefCell<GenerationState> {
    fn with_state<R>(&self, f: impl FnOnce(&GenerationState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut GenerationState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: GenerationStore + ?Sized> GenerationStore for &T {
    fn with_state<R>(&self, f: impl FnOnce(&GenerationState) -> R) -> Option<R> {
        (**self).with_state(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut GenerationState) -> R) -> Option<R> {
        (**self).update_state(f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("key selection was cancelled")]
    Cancelled,
    #[error("key selection failed: {0}")]
    Host(String),
}

/// The environment that owns the provider credential.
#[allow(async_fn_in_trait)]
pub trait CredentialHost {
    async fn has_selected_api_key(&self) -> bool;

    /// Runs the selection flow. `Ok` does not prove a key was stored.
    async fn open_select_key(&self) -> Result<(), CredentialError>;
}

#[allow(async_fn_in_trait)]
pub trait VideoGenerator {
    async fn generate(&self, params: GenerateVideoParams)
        -> Result<GeneratedVideo, VideoGenError>;
}

pub struct GenerationController<S, H, G> {
    store: S,
    host: H,
    generator: G,
}

impl<S, H, G> GenerationController<S, H, G>
where
    S: GenerationStore,
    H: CredentialHost,
    G: VideoGenerator,
{
    pub fn new(store: S, host: H, generator: G) -> Self {
        Self {
            store,
            host,
            generator,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Submits a request through the key gate.
    pub async fn generate(&self, params: GenerateVideoParams) {
        if !self.store.with_state(GenerationState::can_submit).unwrap_or(false) {
            log::debug!("ignoring submit while a request or key prompt is active");
            return;
        }
        // invalid params are rejected by `submit` before the key matters
        let has_key = match params.validate() {
            Ok(()) => self.host.has_selected_api_key().await,
            Err(_) => true,
        };
        if !has_key {
            log::info!("no api key selected, deferring generation");
        }
        let ready = self
            .store
            .update_state(|s| s.submit(params, has_key))
            .flatten();
        if let Some(params) = ready {
            self.run(params).await;
        }
    }

    /// Runs the host selection flow, then replays the parked request once
    /// without asking the host again.
    pub async fn select_key(&self) {
        match self.host.open_select_key().await {
            Ok(()) => {
                let pending = self
                    .store
                    .update_state(GenerationState::key_selected)
                    .flatten();
                if let Some(params) = pending {
                    self.run(params).await;
                }
            }
            Err(e) => {
                log::warn!("key selection failed, dropping pending request: {e}");
                self.store.update_state(GenerationState::key_selection_failed);
            }
        }
    }

    pub fn dismiss_key_dialog(&self) {
        self.store.update_state(GenerationState::key_selection_failed);
    }

    pub async fn retry(&self) {
        let Some(params) = self.store.with_state(GenerationState::retry_params).flatten() else {
            return;
        };
        self.generate(params).await;
    }

    async fn run(&self, params: GenerateVideoParams) {
        let started = self
            .store
            .update_state(|s| s.begin(params.clone()))
            .unwrap_or(false);
        if !started {
            return;
        }
        let outcome = self.generator.generate(params.clone()).await;
        if let Err(e) = &outcome {
            log::error!("video generation failed: {e}");
        }
        self.store.update_state(|s| s.finish(params, outcome));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::videogen::{GenerationMode, VideoHandle};

    #[derive(Default)]
    struct FakeHost {
        has_key: Cell<bool>,
        fail_selection: bool,
        checks: Cell<u32>,
        selections: Cell<u32>,
    }

    impl FakeHost {
        fn with_key() -> Self {
            let host = Self::default();
            host.has_key.set(true);
            host
        }
    }

    impl CredentialHost for &FakeHost {
        async fn has_selected_api_key(&self) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.has_key.get()
        }

        async fn open_select_key(&self) -> Result<(), CredentialError> {
            self.selections.set(self.selections.get() + 1);
            if self.fail_selection {
                return Err(CredentialError::Cancelled);
            }
            self.has_key.set(true);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeGenerator {
        outcomes: RefCell<Vec<Result<GeneratedVideo, VideoGenError>>>,
        calls: RefCell<Vec<GenerateVideoParams>>,
    }

    impl FakeGenerator {
        fn answering(outcomes: Vec<Result<GeneratedVideo, VideoGenError>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into_iter().rev().collect()),
                calls: RefCell::default(),
            }
        }
    }

    impl VideoGenerator for &FakeGenerator {
        async fn generate(
            &self,
            params: GenerateVideoParams,
        ) -> Result<GeneratedVideo, VideoGenError> {
            self.calls.borrow_mut().push(params);
            self.outcomes
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(VideoGenError::Transport("no outcome queued".into())))
        }
    }

    fn river() -> GenerateVideoParams {
        GenerateVideoParams::text("a river at dawn")
    }

    fn video() -> GeneratedVideo {
        GeneratedVideo {
            object_url: "blob:http://localhost/1".into(),
            bytes: vec![0, 0, 0, 24],
            uri: "https://example.test/files/river:download".into(),
            video: VideoHandle {
                uri: "https://example.test/files/river".into(),
            },
        }
    }

    fn not_found() -> VideoGenError {
        VideoGenError::classify("Requested entity was not found.")
    }

    #[test]
    fn river_prompt_succeeds_and_can_be_extended() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::with_key();
        let generator = FakeGenerator::answering(vec![Ok(video())]);
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));

        let state = store.borrow();
        assert_eq!(state.result(), Some(&video()));
        assert!(state.can_extend());
        assert_eq!(state.last_params(), Some(&river()));
    }

    #[test]
    fn missing_key_opens_dialog_without_calling_provider() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::default();
        let generator = FakeGenerator::default();
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));

        assert!(generator.calls.borrow().is_empty());
        let state = store.borrow();
        assert!(state.key_dialog_open());
        assert_eq!(state.pending(), Some(&river()));
        assert_eq!(state.status(), &AppStatus::Idle);
    }

    #[test]
    fn key_selection_replays_pending_params_once_without_rechecking() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::default();
        let generator = FakeGenerator::answering(vec![Ok(video())]);
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));
        block_on(ctrl.select_key());

        assert_eq!(host.checks.get(), 1);
        assert_eq!(*generator.calls.borrow(), vec![river()]);
        assert!(store.borrow().result().is_some());

        // The slot is empty now, so a second confirmation replays nothing.
        block_on(ctrl.select_key());
        assert_eq!(generator.calls.borrow().len(), 1);
    }

    #[test]
    fn failed_key_selection_drops_request_silently() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost {
            fail_selection: true,
            ..Default::default()
        };
        let generator = FakeGenerator::default();
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));
        block_on(ctrl.select_key());

        let state = store.borrow();
        assert_eq!(state.status(), &AppStatus::Idle);
        assert!(state.error().is_none());
        assert!(state.pending().is_none());
        assert!(!state.key_dialog_open());
        assert!(generator.calls.borrow().is_empty());
    }

    #[test]
    fn dismissing_dialog_behaves_like_failed_selection() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::default();
        let generator = FakeGenerator::default();
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));
        ctrl.dismiss_key_dialog();

        assert_eq!(store.borrow().pending(), None);
        assert_eq!(host.selections.get(), 0);
    }

    #[test]
    fn stale_key_routes_back_to_dialog_without_banner() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::with_key();
        let generator = FakeGenerator::answering(vec![Err(not_found()), Ok(video())]);
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));
        {
            let state = store.borrow();
            assert_eq!(state.status(), &AppStatus::Idle);
            assert!(state.error().is_none());
            assert!(state.key_dialog_open());
            assert_eq!(state.pending(), Some(&river()));
        }

        block_on(ctrl.select_key());
        assert_eq!(*generator.calls.borrow(), vec![river(), river()]);
        assert!(store.borrow().result().is_some());
    }

    #[test]
    fn provider_error_shows_banner_and_keeps_params() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::with_key();
        let generator = FakeGenerator::answering(vec![Err(VideoGenError::Provider(
            "Quota exceeded".into(),
        ))]);
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));

        let state = store.borrow();
        assert_eq!(state.error(), Some("Quota exceeded"));
        assert_eq!(state.form_defaults(), river());
        assert!(!state.key_dialog_open());
    }

    #[test]
    fn invalid_params_never_reach_the_host() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::default();
        let generator = FakeGenerator::default();
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(GenerateVideoParams::text("")));

        assert_eq!(host.checks.get(), 0);
        assert!(store.borrow().error().is_some());
    }

    #[test]
    fn error_state_accepts_a_new_submission() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::with_key();
        let generator = FakeGenerator::answering(vec![
            Err(VideoGenError::Transport("offline".into())),
            Ok(video()),
        ]);
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));
        assert!(store.borrow().error().is_some());

        block_on(ctrl.generate(GenerateVideoParams::text("a river at dusk")));
        let state = store.borrow();
        assert!(state.error().is_none());
        assert!(state.result().is_some());
    }

    #[test]
    fn submissions_are_ignored_while_loading() {
        let mut state = GenerationState::default();
        assert!(state.begin(river()));
        assert!(!state.can_submit());
        assert!(!state.begin(GenerateVideoParams::text("another")));
        assert_eq!(state.last_params(), Some(&river()));
    }

    #[test]
    fn submit_without_key_parks_params_in_pending_slot() {
        let mut state = GenerationState::default();

        assert_eq!(state.submit(river(), false), None);
        assert!(state.key_dialog_open());
        assert_eq!(state.pending(), Some(&river()));
        assert!(!state.can_submit());
        assert_eq!(state.submit(GenerateVideoParams::text("another"), true), None);

        assert_eq!(state.key_selected(), Some(river()));
        assert_eq!(state.key_selected(), None);
    }

    #[test]
    fn retry_reissues_last_params() {
        let store = RefCell::new(GenerationState::default());
        let host = FakeHost::with_key();
        let generator = FakeGenerator::answering(vec![Ok(video()), Ok(video())]);
        let ctrl = GenerationController::new(&store, &host, &generator);

        block_on(ctrl.generate(river()));
        block_on(ctrl.retry());

        assert_eq!(*generator.calls.borrow(), vec![river(), river()]);
    }

    #[test]
    fn new_video_clears_result_and_params() {
        let mut state = GenerationState::default();
        state.begin(river());
        state.finish(river(), Ok(video()));

        state.new_video();

        assert_eq!(state.status(), &AppStatus::Idle);
        assert_eq!(state.form_defaults(), GenerateVideoParams::default());
    }

    #[test]
    fn extend_prefills_form_from_720p_result() {
        let mut state = GenerationState::default();
        state.begin(river());
        state.finish(river(), Ok(video()));

        state.extend().expect("720p result is extendable");

        let defaults = state.form_defaults();
        assert_eq!(state.status(), &AppStatus::Idle);
        assert_eq!(defaults.mode, GenerationMode::ExtendVideo);
        assert_eq!(defaults.input_video, Some(video().video));
        assert_eq!(defaults.resolution, Resolution::P720);
    }

    #[test]
    fn extend_unavailable_for_1080p_result() {
        let hd = GenerateVideoParams {
            resolution: Resolution::P1080,
            ..river()
        };
        let mut state = GenerationState::default();
        state.begin(hd.clone());
        state.finish(hd, Ok(video()));

        assert!(!state.can_extend());
        assert_eq!(state.extend(), Err(ExtendUnavailable));
        assert!(state.result().is_some());
    }
}
