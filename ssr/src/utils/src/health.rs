use leptos::prelude::*;
use leptos::server;

/// Liveness probe, answers with the running build's version.
#[server(endpoint = "healthz")]
pub async fn healthz() -> Result<String, ServerFnError> {
    Ok(env!("CARGO_PKG_VERSION").to_string())
}
