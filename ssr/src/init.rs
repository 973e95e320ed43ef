use leptos::prelude::LeptosOptions;
use leptos_axum::AxumRouteListing;
use state::server::{AppState, ServerApiKey, ServerConfig};
use utils::veo::VeoClient;

pub struct AppStateBuilder {
    leptos_options: LeptosOptions,
    routes: Vec<AxumRouteListing>,
    config: ServerConfig,
}

impl AppStateBuilder {
    pub fn new(
        leptos_options: LeptosOptions,
        routes: Vec<AxumRouteListing>,
        config: ServerConfig,
    ) -> Self {
        Self {
            leptos_options,
            routes,
            config,
        }
    }

    pub fn build(self) -> AppState {
        let ServerConfig {
            gemini_api_key,
            veo,
            ..
        } = self.config;

        if gemini_api_key.is_some() {
            tracing::info!("server GEMINI_API_KEY configured, visitors skip the key dialog");
        } else {
            tracing::info!("no server GEMINI_API_KEY, visitors must bring their own key");
        }
        tracing::debug!(
            base = %veo.base_url,
            poll_secs = veo.poll_interval.as_secs(),
            max_polls = veo.max_polls,
            "veo client configured"
        );

        AppState {
            leptos_options: self.leptos_options,
            routes: self.routes,
            veo: VeoClient::new(veo),
            server_api_key: ServerApiKey(gemini_api_key),
        }
    }
}
