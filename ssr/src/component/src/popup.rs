use leptos::portal::Portal;
use leptos::prelude::*;
use leptos_icons::*;

/// Modal rendered into a portal. Clicking the backdrop or the close button
/// calls `on_close`; the caller decides what dismissal means.
#[component]
pub fn Popup(
    #[prop(into)] show: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into, optional)] title: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let children = StoredValue::new(children);
    let title = StoredValue::new(title);

    view! {
        <Show when=move || show.get()>
            <Portal>
                <div
                    on:click={
                        #[cfg(feature = "hydrate")]
                        {
                            move |ev| {
                                use web_sys::HtmlElement;
                                let target = event_target::<HtmlElement>(&ev);
                                if target.class_list().contains("modal-bg") {
                                    on_close.run(());
                                }
                            }
                        }
                        #[cfg(not(feature = "hydrate"))] { |_| () }
                    }
                    class="flex cursor-pointer modal-bg inset-0 fixed bg-stone-900/60 z-[999] justify-center items-center backdrop-blur-sm"
                >
                    <div class="mx-4 py-4 px-5 w-full max-w-md max-h-full cursor-auto flex flex-col gap-2 bg-white rounded-xl shadow-xl">
                        <div class="flex w-full justify-between items-center">
                            <h2 class="text-lg font-semibold text-stone-900">
                                {move || title.get_value().unwrap_or_default()}
                            </h2>
                            <button
                                aria-label="Close"
                                on:click=move |_| on_close.run(())
                                class="text-stone-700 text-center p-1 text-lg bg-stone-100 hover:bg-stone-200 rounded-full"
                            >
                                <Icon icon=icondata::ChCross />
                            </button>
                        </div>
                        <div class="pb-2 w-full">{move || children.with_value(|c| c())}</div>
                    </div>
                </div>
            </Portal>
        </Show>
    }
}
