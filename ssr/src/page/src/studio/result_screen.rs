use component::video_player::VideoPlayer;
use consts::veo::DOWNLOAD_FILE_NAME;
use leptos::prelude::*;
use leptos_icons::*;

use super::screen::ResultSummary;

#[component]
pub fn ResultScreen(
    summary: ResultSummary,
    #[prop(into)] on_retry: Callback<()>,
    #[prop(into)] on_new: Callback<()>,
    #[prop(into)] on_extend: Callback<()>,
) -> impl IntoView {
    let ResultSummary {
        object_url,
        uri,
        size_label,
        prompt,
        mode,
        portrait,
        can_extend,
    } = summary;

    view! {
        <div class="flex flex-col gap-6">
            <VideoPlayer src=object_url.clone() portrait=portrait />

            <div class="text-center">
                <h2 class="text-xl font-bold text-stone-900 mb-1">"Your video is ready"</h2>
                <p class="text-sm text-stone-500">{format!("{} \u{b7} MP4 \u{b7} {size_label}", mode.label())}</p>
                {(!prompt.trim().is_empty()).then(|| view! {
                    <p class="mt-3 text-sm italic text-stone-600">"\u{201c}"{prompt}"\u{201d}"</p>
                })}
            </div>

            <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                <a
                    href=object_url
                    download=DOWNLOAD_FILE_NAME
                    class="h-12 rounded-full bg-emerald-600 hover:bg-emerald-700 text-white font-semibold flex items-center justify-center gap-2"
                >
                    <Icon icon=icondata::AiDownloadOutlined attr:class="text-lg" />
                    "Download"
                </a>
                <button
                    class="h-12 rounded-full border-2 border-emerald-600 text-emerald-700 font-semibold flex items-center justify-center gap-2 disabled:opacity-40 disabled:cursor-not-allowed"
                    disabled=!can_extend
                    title=(!can_extend).then_some("Only 720p videos can be extended")
                    on:click=move |_| on_extend.run(())
                >
                    <Icon icon=icondata::AiFastForwardOutlined attr:class="text-lg" />
                    "Extend"
                </button>
                <button
                    class="h-12 rounded-full border-2 border-stone-300 text-stone-700 font-semibold flex items-center justify-center gap-2"
                    on:click=move |_| on_retry.run(())
                >
                    <Icon icon=icondata::AiReloadOutlined attr:class="text-lg" />
                    "Retry"
                </button>
                <button
                    class="h-12 rounded-full border-2 border-stone-300 text-stone-700 font-semibold flex items-center justify-center gap-2"
                    on:click=move |_| on_new.run(())
                >
                    <Icon icon=icondata::AiPlusOutlined attr:class="text-lg" />
                    "New video"
                </button>
            </div>

            // the provider URI needs the API key header, so it is not a usable link
            <p class="text-xs text-center text-stone-400 break-all select-all">{uri}</p>
        </div>
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;
    use state::videogen::GenerationMode;

    #[test]
    fn provider_uri_is_shown_as_text_not_linked() {
        let uri = "https://generativelanguage.googleapis.com/v1beta/files/abc:download?alt=media";
        let summary = ResultSummary {
            object_url: "blob:http://localhost/1234".into(),
            uri: uri.into(),
            size_label: "1.2 MB".into(),
            prompt: "a river at dawn".into(),
            mode: GenerationMode::TextToVideo,
            portrait: false,
            can_extend: true,
        };

        let html = Owner::new().with(|| {
            view! {
                <ResultScreen
                    summary
                    on_retry=|_| ()
                    on_new=|_| ()
                    on_extend=|_| ()
                />
            }
            .to_html()
        });

        assert!(html.contains("files/abc:download"));
        assert!(!html.contains("href=\"https://generativelanguage"));
        assert!(html.contains("href=\"blob:http://localhost/1234\""));
    }
}
