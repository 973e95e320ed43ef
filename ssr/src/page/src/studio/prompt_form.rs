use leptos::{html::Input, prelude::*};
use leptos_icons::*;
use state::videogen::{
    AspectRatio, GenerateVideoParams, GenerationMode, ImageInput, Resolution, VeoModel,
    START_FRAME_MIME_TYPES,
};

const MAX_PROMPT_CHARS: usize = 1000;

#[component]
pub fn PromptForm(
    defaults: GenerateVideoParams,
    error: Option<String>,
    #[prop(into)] can_submit: Signal<bool>,
    #[prop(into)] on_submit: Callback<GenerateVideoParams>,
) -> impl IntoView {
    let input_video = StoredValue::new(defaults.input_video.clone());
    let prompt = RwSignal::new(defaults.prompt);
    let mode = RwSignal::new(defaults.mode);
    let resolution = RwSignal::new(defaults.resolution);
    let aspect_ratio = RwSignal::new(defaults.aspect_ratio);
    let model = RwSignal::new(defaults.model);
    let start_frame = RwSignal::new(defaults.start_frame);
    let upload_error = RwSignal::new(None::<String>);
    let image_input = NodeRef::<Input>::new();

    let can_extend = input_video.with_value(Option::is_some);
    let modes = GenerationMode::ALL
        .into_iter()
        .filter(move |m| *m != GenerationMode::ExtendVideo || can_extend)
        .collect::<Vec<_>>();

    let handle_image_upload = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use consts::limits::MAX_START_FRAME_BYTES;
            use wasm_bindgen::{closure::Closure, JsCast};
            use web_sys::FileReader;

            let Some(file) = image_input
                .get()
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
            else {
                return;
            };
            if file.size() > MAX_START_FRAME_BYTES as f64 {
                upload_error.set(Some("Start image must be under 8 MB".into()));
                return;
            }
            let Ok(reader) = FileReader::new() else {
                upload_error.set(Some("This browser cannot read local files".into()));
                return;
            };

            let onload = Closure::wrap(Box::new(move |event: web_sys::Event| {
                let data_url = event
                    .target()
                    .and_then(|t| t.dyn_into::<FileReader>().ok())
                    .and_then(|r| r.result().ok())
                    .and_then(|r| r.as_string());
                match data_url.as_deref().and_then(ImageInput::from_data_url) {
                    Some(image) => {
                        upload_error.set(None);
                        start_frame.set(Some(image));
                    }
                    None => upload_error.set(Some("Please choose a JPEG, PNG or WebP image".into())),
                }
            }) as Box<dyn FnMut(_)>);
            reader.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            if let Err(e) = reader.read_as_data_url(&file) {
                leptos::logging::error!("failed to read start image: {e:?}");
            }
        }
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit.get_untracked() {
            return;
        }
        let mode = mode.get_untracked();
        let params = GenerateVideoParams {
            prompt: prompt.get_untracked(),
            mode,
            resolution: resolution.get_untracked(),
            aspect_ratio: aspect_ratio.get_untracked(),
            model: model.get_untracked(),
            start_frame: (mode == GenerationMode::FramesToVideo)
                .then(|| start_frame.get_untracked())
                .flatten(),
            input_video: (mode == GenerationMode::ExtendVideo)
                .then(|| input_video.get_value())
                .flatten(),
        };
        on_submit.run(params);
    };

    view! {
        <form class="flex flex-col gap-5" on:submit=submit>
            <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                <label class="flex flex-col gap-1 text-sm font-medium text-stone-700">
                    "Mode"
                    <select
                        class="rounded-lg border border-stone-300 bg-white p-2"
                        prop:value=move || mode.get().key()
                        on:change=move |ev| {
                            if let Some(m) = GenerationMode::from_key(&event_target_value(&ev)) {
                                if m == GenerationMode::ExtendVideo {
                                    resolution.set(Resolution::P720);
                                }
                                mode.set(m);
                            }
                        }
                    >
                        {modes
                            .iter()
                            .map(|m| view! { <option value=m.key()>{m.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="flex flex-col gap-1 text-sm font-medium text-stone-700">
                    "Model"
                    <select
                        class="rounded-lg border border-stone-300 bg-white p-2"
                        prop:value=move || model.get().model_id()
                        on:change=move |ev| {
                            if let Some(m) = VeoModel::from_key(&event_target_value(&ev)) {
                                model.set(m);
                            }
                        }
                    >
                        {VeoModel::ALL
                            .map(|m| view! { <option value=m.model_id()>{m.label()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="flex flex-col gap-1 text-sm font-medium text-stone-700">
                    "Resolution"
                    <select
                        class="rounded-lg border border-stone-300 bg-white p-2 disabled:opacity-60"
                        prop:value=move || resolution.get().as_str()
                        disabled=move || mode.get() == GenerationMode::ExtendVideo
                        on:change=move |ev| {
                            if let Some(r) = Resolution::from_key(&event_target_value(&ev)) {
                                resolution.set(r);
                            }
                        }
                    >
                        {Resolution::ALL
                            .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label class="flex flex-col gap-1 text-sm font-medium text-stone-700">
                    "Aspect ratio"
                    <select
                        class="rounded-lg border border-stone-300 bg-white p-2"
                        prop:value=move || aspect_ratio.get().as_str()
                        on:change=move |ev| {
                            if let Some(a) = AspectRatio::from_key(&event_target_value(&ev)) {
                                aspect_ratio.set(a);
                            }
                        }
                    >
                        {AspectRatio::ALL
                            .map(|a| view! { <option value=a.as_str()>{a.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>
            </div>

            <Show when=move || mode.get() == GenerationMode::FramesToVideo>
                <div class="relative">
                    <input
                        type="file"
                        accept=START_FRAME_MIME_TYPES.join(",")
                        node_ref=image_input
                        on:change=handle_image_upload
                        class="absolute inset-0 w-full h-full opacity-0 cursor-pointer z-10"
                    />
                    <div class="flex flex-col items-center justify-center p-8 bg-stone-50 border border-dashed border-stone-300 rounded-xl">
                        <Show
                            when=move || start_frame.with(Option::is_some)
                            fallback=|| view! {
                                <div class="flex flex-col items-center gap-2 text-stone-500">
                                    <Icon icon=icondata::AiPictureOutlined attr:class="text-3xl" />
                                    <span class="text-sm">"Click to add a start image"</span>
                                </div>
                            }
                        >
                            <img
                                src=move || start_frame.with(|f| f.as_ref().map(ImageInput::data_url).unwrap_or_default())
                                class="max-h-40 object-contain rounded"
                                alt="Start frame"
                            />
                        </Show>
                    </div>
                    {move || upload_error.get().map(|e| view! { <p class="mt-1 text-sm text-rose-700">{e}</p> })}
                </div>
            </Show>

            <Show when=move || mode.get() == GenerationMode::ExtendVideo>
                <p class="text-sm text-stone-600 bg-emerald-50 rounded-lg p-3">
                    "The new clip continues from the end of your last video. Describe what happens next, or leave the prompt empty."
                </p>
            </Show>

            <label class="flex flex-col gap-1 text-sm font-medium text-stone-700">
                "Prompt"
                <div class="relative">
                    <textarea
                        class="w-full p-4 rounded-xl border border-stone-300 bg-white text-stone-900 placeholder:text-stone-400 resize-none focus:outline-none focus:border-emerald-500"
                        rows=5
                        placeholder="Morning light over a terraced millet field, farmers walking the bunds..."
                        prop:value=move || prompt.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            if value.chars().count() <= MAX_PROMPT_CHARS {
                                prompt.set(value);
                            }
                        }
                    ></textarea>
                    <div class="absolute bottom-3 right-3 text-xs text-stone-400">
                        {move || format!("{}/{MAX_PROMPT_CHARS}", prompt.with(|p| p.chars().count()))}
                    </div>
                </div>
            </label>

            {error.map(|e| view! {
                <div role="alert" class="p-3 rounded-lg bg-rose-50 border border-rose-200 text-sm text-rose-800">
                    {e}
                </div>
            })}

            <button
                type="submit"
                disabled=move || !can_submit.get()
                class="h-12 rounded-full bg-emerald-600 hover:bg-emerald-700 disabled:opacity-50 text-white font-semibold flex items-center justify-center gap-2"
            >
                <Icon icon=icondata::AiPlayCircleOutlined attr:class="text-lg" />
                "Generate video"
            </button>
        </form>
    }
}
