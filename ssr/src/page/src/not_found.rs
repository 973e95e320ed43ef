use leptos::prelude::*;
use leptos_meta::Title;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <Title text="Page not found" />
        <main class="min-h-dvh flex flex-col items-center justify-center gap-4 bg-stone-50 text-center px-4">
            <h1 class="text-4xl font-bold text-stone-900">"Nothing growing here"</h1>
            <p class="text-stone-600">"The page you were looking for has been harvested."</p>
            <a href="/" class="text-emerald-700 font-semibold hover:underline">"Back to the shop"</a>
        </main>
    }
}
