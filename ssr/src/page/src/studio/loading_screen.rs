use leptos::prelude::*;
use leptos_icons::*;
use state::videogen::GenerationMode;

#[component]
pub fn LoadingScreen(prompt: String, mode: GenerationMode) -> impl IntoView {
    let headline = match mode {
        GenerationMode::ExtendVideo => "Extending your video",
        _ => "Generating your video",
    };

    view! {
        <div class="flex flex-col items-center gap-8 py-12" aria-busy="true">
            <div class="relative w-32 h-32">
                <div class="absolute inset-0 rounded-full border-4 border-stone-200"></div>
                <svg class="absolute inset-0 w-full h-full -rotate-90 animate-spin" viewBox="0 0 128 128">
                    <circle
                        cx="64"
                        cy="64"
                        r="60"
                        fill="none"
                        stroke="url(#studio-gradient)"
                        stroke-width="4"
                        stroke-linecap="round"
                        stroke-dasharray="377"
                        stroke-dashoffset="94.25"
                    />
                    <defs>
                        <linearGradient id="studio-gradient" x1="0%" y1="0%" x2="100%" y2="100%">
                            <stop offset="0%" stop-color="#6EE7B7" />
                            <stop offset="50%" stop-color="#059669" />
                            <stop offset="100%" stop-color="#064E3B" />
                        </linearGradient>
                    </defs>
                </svg>
                <div class="absolute inset-0 flex items-center justify-center">
                    <Icon icon=icondata::AiPlayCircleOutlined attr:class="text-emerald-700 text-4xl" />
                </div>
            </div>

            <div class="text-center max-w-md">
                <h2 class="text-xl font-bold text-stone-900 mb-2">{headline}</h2>
                <p class="text-sm text-stone-500">"This usually takes a minute or two. Keep this tab open."</p>
                {(!prompt.trim().is_empty()).then(|| view! {
                    <p class="mt-4 text-sm italic text-stone-600">"\u{201c}"{prompt}"\u{201d}"</p>
                })}
            </div>

            <div class="flex items-center gap-2">
                <div class="w-2 h-2 bg-emerald-500 rounded-full animate-bounce" style="animation-delay: 0ms"></div>
                <div class="w-2 h-2 bg-emerald-500 rounded-full animate-bounce" style="animation-delay: 150ms"></div>
                <div class="w-2 h-2 bg-emerald-500 rounded-full animate-bounce" style="animation-delay: 300ms"></div>
            </div>
        </div>
    }
}
