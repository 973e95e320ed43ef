use component::popup::Popup;
use consts::GEMINI_API_KEY_DOCS;
use leptos::prelude::*;

#[component]
pub fn KeyDialog(
    #[prop(into)] show: Signal<bool>,
    draft: RwSignal<String>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    view! {
        <Popup show on_close=on_dismiss title="Connect your Gemini API key">
            <form
                class="flex flex-col gap-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_confirm.run(());
                }
            >
                <p class="text-sm text-stone-600">
                    "Video generation runs on Google's Veo models and is billed to your own key. "
                    "The key stays in this tab and is forgotten when you close it."
                </p>
                <input
                    type="password"
                    autocomplete="off"
                    placeholder="Paste your API key"
                    class="w-full p-3 rounded-lg border border-stone-300 focus:outline-none focus:border-emerald-500"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <a
                    href=GEMINI_API_KEY_DOCS
                    target="_blank"
                    rel="noopener noreferrer"
                    class="text-sm text-emerald-700 hover:underline"
                >
                    "Get a key from Google AI Studio"
                </a>
                <div class="flex gap-3 justify-end">
                    <button
                        type="button"
                        class="px-4 py-2 rounded-full text-stone-600 hover:bg-stone-100"
                        on:click=move |_| on_dismiss.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="px-5 py-2 rounded-full bg-emerald-600 hover:bg-emerald-700 text-white font-semibold"
                    >
                        "Use this key"
                    </button>
                </div>
            </form>
        </Popup>
    }
}
