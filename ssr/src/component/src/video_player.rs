use leptos::html::Video;
use leptos::prelude::*;

/// Inline player for a generated clip. Playback starts muted so browsers allow
/// autoplay; clicking toggles play/pause.
#[component]
pub fn VideoPlayer(
    #[prop(optional)] node_ref: NodeRef<Video>,
    #[prop(into)] src: Signal<String>,
    #[prop(into, optional)] portrait: Signal<bool>,
) -> impl IntoView {
    let frame_class = move || {
        if portrait.get() {
            "aspect-[9/16] max-h-[70vh] mx-auto"
        } else {
            "aspect-video w-full"
        }
    };

    view! {
        <div class=move || format!("rounded-xl overflow-hidden bg-stone-900 {}", frame_class())>
            <video
                node_ref=node_ref
                class="object-contain h-full w-full cursor-pointer"
                src=src
                loop
                autoplay
                muted
                playsinline
                controls
                disablepictureinpicture
                on:click=move |_| {
                    let Some(vid) = node_ref.get() else {
                        return;
                    };
                    if !vid.paused() {
                        _ = vid.pause();
                        return;
                    }
                    if let Ok(promise) = vid.play() {
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                                log::warn!("video play rejected: {e:?}");
                            }
                        });
                    }
                }
            ></video>
        </div>
    }
}
