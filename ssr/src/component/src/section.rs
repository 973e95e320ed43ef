use leptos::prelude::*;

#[component]
pub fn SectionHeading(
    #[prop(into)] eyebrow: String,
    #[prop(into)] title: String,
    #[prop(into, optional)] subtitle: Option<String>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-2 text-center items-center max-w-2xl mx-auto">
            <span class="text-xs font-semibold tracking-widest uppercase text-emerald-700">
                {eyebrow}
            </span>
            <h2 class="text-3xl md:text-4xl font-bold text-stone-900">{title}</h2>
            {subtitle.map(|s| view! { <p class="text-stone-600">{s}</p> })}
        </div>
    }
}
