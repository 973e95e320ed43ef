use leptos::prelude::*;
use leptos_meta::Title;
use state::generation::{GenerationController, GenerationState};
use state::videogen::GenerateVideoParams;
use utils::web::revoke_object_url;

use super::client::{ServerVideoGenerator, SessionKeyHost};
use super::key_dialog::KeyDialog;
use super::loading_screen::LoadingScreen;
use super::prompt_form::PromptForm;
use super::result_screen::ResultScreen;
use super::screen::Screen;

#[derive(Clone, Debug)]
enum StudioCommand {
    Generate(GenerateVideoParams),
    SelectKey,
    Retry,
}

#[component]
pub fn StudioPage() -> impl IntoView {
    view! {
        <Title text="Video studio" />
        <main class="min-h-dvh bg-stone-50 px-4 py-10">
            <div class="max-w-2xl mx-auto flex flex-col gap-6">
                <a href="/" class="text-sm text-emerald-700 hover:underline">"\u{2190} Back to the shop"</a>
                <StudioPanel />
            </div>
        </main>
    }
}

/// Prompt form, progress and result for one visitor session.
#[component]
pub fn StudioPanel() -> impl IntoView {
    let state = RwSignal::new(GenerationState::default());
    let host = SessionKeyHost::new();
    let generator = ServerVideoGenerator::new(host);

    let command = Action::new_unsync(move |cmd: &StudioCommand| {
        let cmd = cmd.clone();
        let controller = GenerationController::new(state, host, generator);
        async move {
            match cmd {
                StudioCommand::Generate(params) => controller.generate(params).await,
                StudioCommand::SelectKey => controller.select_key().await,
                StudioCommand::Retry => controller.retry().await,
            }
        }
    });

    // blob URLs are released as soon as their result leaves the screen
    let shown_url = StoredValue::new(None::<String>);
    Effect::new(move |_| {
        let current = state.with(|s| s.result().map(|v| v.object_url.clone()));
        let previous = shown_url.get_value();
        if previous != current {
            if let Some(url) = previous {
                revoke_object_url(&url);
            }
            shown_url.set_value(current);
        }
    });
    on_cleanup(move || {
        if let Some(url) = shown_url.try_get_value().flatten() {
            revoke_object_url(&url);
        }
    });

    let screen = Memo::new(move |_| state.with(Screen::of));
    let can_submit = Signal::derive(move || state.with(GenerationState::can_submit));
    let key_dialog_open = Signal::derive(move || state.with(GenerationState::key_dialog_open));

    let controller = move || GenerationController::new(state, host, generator);

    view! {
        <section class="flex flex-col gap-4 p-6 rounded-3xl bg-white shadow-sm border border-stone-100">
            {move || match screen.get() {
                Screen::Form { defaults, error } => view! {
                    <PromptForm
                        defaults
                        error
                        can_submit
                        on_submit=move |params| {
                            command.dispatch(StudioCommand::Generate(params));
                        }
                    />
                }
                .into_any(),
                Screen::Loading { prompt, mode } => view! { <LoadingScreen prompt mode /> }.into_any(),
                Screen::Result(summary) => view! {
                    <ResultScreen
                        summary
                        on_retry=move |_| {
                            command.dispatch(StudioCommand::Retry);
                        }
                        on_new=move |_| state.update(GenerationState::new_video)
                        on_extend=move |_| {
                            if let Err(e) = state.try_update(GenerationState::extend).transpose() {
                                log::warn!("{e}");
                            }
                        }
                    />
                }
                .into_any(),
            }}
            <KeyDialog
                show=key_dialog_open
                draft=host.draft()
                on_confirm=move |_| {
                    command.dispatch(StudioCommand::SelectKey);
                }
                on_dismiss=move |_| controller().dismiss_key_dialog()
            />
        </section>
    }
}
