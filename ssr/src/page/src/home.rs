use component::{catalog::CatalogBrowser, section::SectionHeading};
use consts::{social, SITE_NAME, SITE_TAGLINE};
use leptos::prelude::*;
use leptos_icons::*;
use leptos_meta::Title;
use utils::whatsapp;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Fresh organic produce" />
        <main class="bg-stone-50 text-stone-900">
            <Hero />
            <About />
            <section id="produce" class="px-4 py-16 md:py-24 flex flex-col gap-10 max-w-6xl mx-auto">
                <SectionHeading
                    eyebrow="This week's harvest"
                    title="Order straight from the farm"
                    subtitle="Pick a category, tap an item and we'll confirm availability on WhatsApp."
                />
                <CatalogBrowser />
            </section>
            <StudioTeaser />
            <Footer />
        </main>
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <header class="relative overflow-hidden bg-emerald-900 text-white">
            <div class="max-w-6xl mx-auto px-4 py-24 md:py-32 flex flex-col gap-6">
                <span class="text-sm tracking-widest uppercase text-emerald-200">{SITE_NAME}</span>
                <h1 class="text-4xl md:text-6xl font-bold max-w-3xl leading-tight">{SITE_TAGLINE}</h1>
                <p class="text-lg text-emerald-100 max-w-2xl">
                    "Seasonal vegetables, fruit, grains and pantry staples from small farms that never use synthetic pesticides."
                </p>
                <div class="flex flex-wrap gap-3">
                    <a href="#produce" class="px-6 py-3 rounded-full bg-white text-emerald-900 font-semibold hover:bg-emerald-50">
                        "Browse produce"
                    </a>
                    <a
                        href=whatsapp::enquiry_link()
                        target="_blank"
                        rel="noopener noreferrer"
                        class="px-6 py-3 rounded-full border border-emerald-200 font-semibold flex items-center gap-2 hover:bg-emerald-800"
                    >
                        <Icon icon=icondata::BsWhatsapp />
                        "Ask us anything"
                    </a>
                </div>
            </div>
        </header>
    }
}

const PILLARS: [(&str, &str); 3] = [
    ("Farmer first", "Growers set their own prices and keep over 80% of every order."),
    ("Soil before yield", "Every partner farm composts, rotates crops and saves its own seed."),
    ("Short journeys", "Produce reaches you within a day of harvest, never from cold storage."),
];

#[component]
fn About() -> impl IntoView {
    view! {
        <section class="px-4 py-16 md:py-24 max-w-6xl mx-auto flex flex-col gap-10">
            <SectionHeading
                eyebrow="The initiative"
                title="A collective of twelve family farms"
                subtitle="We started as a weekend market stall and grew into a neighbourhood supply line for chemical-free food."
            />
            <div class="grid gap-6 md:grid-cols-3">
                {PILLARS
                    .map(|(title, body)| view! {
                        <div class="p-6 rounded-2xl bg-white border border-stone-100 shadow-sm">
                            <h3 class="font-semibold text-lg mb-2">{title}</h3>
                            <p class="text-stone-600">{body}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn StudioTeaser() -> impl IntoView {
    view! {
        <section class="px-4 py-16 md:py-24 bg-amber-50">
            <div class="max-w-4xl mx-auto flex flex-col md:flex-row items-center gap-8">
                <div class="flex-1 flex flex-col gap-4">
                    <span class="text-xs font-semibold tracking-widest uppercase text-amber-700">"Farm stories"</span>
                    <h2 class="text-3xl font-bold">"Turn a photo of your harvest into a short film"</h2>
                    <p class="text-stone-600">
                        "Our video studio uses Google's Veo models to animate a prompt or a snapshot from the field. Bring your own Gemini API key."
                    </p>
                </div>
                <a
                    href="/studio"
                    class="px-6 py-3 rounded-full bg-emerald-600 hover:bg-emerald-700 text-white font-semibold flex items-center gap-2"
                >
                    <Icon icon=icondata::AiVideoCameraOutlined />
                    "Open the studio"
                </a>
            </div>
        </section>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="px-4 py-10 bg-stone-900 text-stone-300">
            <div class="max-w-6xl mx-auto flex flex-col md:flex-row justify-between gap-6">
                <div>
                    <p class="font-semibold text-white">{SITE_NAME}</p>
                    <p class="text-sm">{SITE_TAGLINE}</p>
                </div>
                <div class="flex items-center gap-5 text-sm">
                    <a href=whatsapp::enquiry_link() target="_blank" rel="noopener noreferrer" class="flex items-center gap-1 hover:text-white">
                        <Icon icon=icondata::BsWhatsapp />
                        "WhatsApp"
                    </a>
                    <a href=social::INSTAGRAM target="_blank" rel="noopener noreferrer" class="flex items-center gap-1 hover:text-white">
                        <Icon icon=icondata::BsInstagram />
                        "Instagram"
                    </a>
                    <a href=format!("mailto:{}", social::EMAIL) class="flex items-center gap-1 hover:text-white">
                        <Icon icon=icondata::AiMailOutlined />
                        {social::EMAIL}
                    </a>
                </div>
            </div>
        </footer>
    }
}
