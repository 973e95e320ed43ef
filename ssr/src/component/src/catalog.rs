use leptos::prelude::*;
use leptos_icons::*;
use state::catalog::{
    catalog, coming_soon_message, default_category_id, selected_or_first, CategoryContent,
    ProductCategory, ProductItem,
};
use utils::whatsapp;

pub const ORDER_LABEL: &str = "Order on WhatsApp";

/// One "order" action per item, in catalog order.
pub fn order_links(items: &[ProductItem]) -> Vec<(&'static str, String)> {
    items
        .iter()
        .map(|item| (item.id, whatsapp::item_order_link(item.name)))
        .collect()
}

/// Tabs plus the selected category's grid. The selection is local to this view.
#[component]
pub fn CatalogBrowser() -> impl IntoView {
    let selected = RwSignal::new(default_category_id());

    view! {
        <div class="flex flex-col gap-8">
            <CategoryTabs selected />
            {move || selected_or_first(selected.get()).map(|category| view! { <CategoryPanel category /> })}
        </div>
    }
}

#[component]
fn CategoryTabs(selected: RwSignal<&'static str>) -> impl IntoView {
    view! {
        <div role="tablist" class="flex flex-wrap justify-center gap-2">
            {catalog()
                .iter()
                .map(|category| {
                    let id = category.id;
                    let color = category.color;
                    let icon = category.icon;
                    let class = move || {
                        let base = "flex items-center gap-2 px-4 py-2 rounded-full border-2 text-sm font-medium transition-colors";
                        if selected.get() == id {
                            format!("{base} bg-white {}", color.tab_class())
                        } else {
                            format!("{base} border-transparent text-stone-500 hover:text-stone-800")
                        }
                    };
                    view! {
                        <button
                            role="tab"
                            aria-selected=move || (selected.get() == id).to_string()
                            class=class
                            on:click=move |_| selected.set(id)
                        >
                            <Icon icon=icon />
                            {category.title}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn CategoryPanel(category: &'static ProductCategory) -> impl IntoView {
    let body = match category.content() {
        CategoryContent::Items(items) => view! { <ProductGrid items /> }.into_any(),
        CategoryContent::ComingSoon { title } => view! { <ComingSoon title /> }.into_any(),
    };

    view! {
        <section class="flex flex-col gap-6">
            <div class="flex items-center gap-3 justify-center">
                <span class=format!("p-2 rounded-full text-xl {}", category.color.badge_class())>
                    <Icon icon=category.icon />
                </span>
                <p class="text-stone-600 max-w-xl">{category.description}</p>
            </div>
            {body}
        </section>
    }
}

#[component]
fn ProductGrid(items: &'static [ProductItem]) -> impl IntoView {
    let links = order_links(items);
    view! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
            {items
                .iter()
                .zip(links)
                .map(|(item, (_, href))| view! { <ProductCard item href /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn ProductCard(item: &'static ProductItem, href: String) -> impl IntoView {
    view! {
        <article class="flex flex-col gap-3 p-5 rounded-2xl bg-white shadow-sm border border-stone-100">
            <div class="flex justify-between items-baseline gap-2">
                <h3 class="font-semibold text-stone-900">{item.name}</h3>
                <span class="text-sm font-medium text-emerald-700 whitespace-nowrap">{item.price}</span>
            </div>
            {item.description.map(|d| view! { <p class="text-sm text-stone-600">{d}</p> })}
            <a
                href=href
                target="_blank"
                rel="noopener noreferrer"
                class="mt-auto flex items-center justify-center gap-2 rounded-full bg-emerald-600 hover:bg-emerald-700 text-white text-sm font-semibold py-2"
            >
                <Icon icon=icondata::BsWhatsapp />
                {ORDER_LABEL}
            </a>
        </article>
    }
}

#[component]
fn ComingSoon(title: &'static str) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-2 p-10 rounded-2xl border-2 border-dashed border-stone-200 text-center">
            <Icon icon=icondata::LuSprout attr:class="text-3xl text-emerald-600" />
            <p class="text-stone-600">{coming_soon_message(title)}</p>
        </div>
    }
}
