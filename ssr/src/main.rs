#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
mod server {
    use axum::{
        body::Body as AxumBody,
        extract::State,
        http::Request,
        response::{IntoResponse, Response},
        routing::get,
        Router,
    };
    use http::{header, HeaderName, HeaderValue, Method};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};
    use organic_storefront_ssr::{
        app::{shell, App},
        init::AppStateBuilder,
    };
    use sentry_tower::{NewSentryLayer, SentryHttpLayer};
    use state::server::{AppState, ServerConfig};
    use tower::ServiceBuilder;
    use tower_http::{
        cors::CorsLayer,
        trace::TraceLayer,
    };
    use tracing::instrument;

    fn provide_app_context(app_state: &AppState) {
        provide_context(app_state.veo.clone());
        provide_context(app_state.server_api_key.clone());
    }

    #[instrument(skip(app_state))]
    pub async fn server_fn_handler(
        State(app_state): State<AppState>,
        request: Request<AxumBody>,
    ) -> impl IntoResponse {
        handle_server_fns_with_context(move || provide_app_context(&app_state), request).await
    }

    #[instrument(skip(state))]
    pub async fn leptos_routes_handler(
        state: State<AppState>,
        req: Request<AxumBody>,
    ) -> Response {
        let State(app_state) = state.clone();
        let context_state = app_state.clone();
        let handler = leptos_axum::render_route_with_context(
            app_state.routes.clone(),
            move || provide_app_context(&context_state),
            move || shell(app_state.leptos_options.clone()),
        );
        handler(state, req).await.into_response()
    }

    fn setup_telemetry(config: &ServerConfig) {
        let exporter = if config.log_file.is_some() {
            telemetry_axum::Exporter::FileAndStdout
        } else {
            telemetry_axum::Exporter::Stdout
        };
        let mut telemetry_config = telemetry_axum::Config {
            exporter,
            service_name: "organic_storefront".to_string(),
            level: config.log_level.clone(),
            ..Default::default()
        };
        if let Some(path) = &config.log_file {
            telemetry_config.file_path = path.clone();
        }

        if let Err(e) = telemetry_axum::init_telemetry(&telemetry_config) {
            eprintln!("Error: Failed to initialize telemetry: {e}");
        }
    }

    async fn shutdown_signal() {
        use tokio::signal;

        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => {
                    tracing::error!("failed to install SIGTERM handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
        tracing::info!("stopping...");
    }

    pub async fn main_impl(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        setup_telemetry(&config);

        // Setting get_configuration(None) means we'll be using cargo-leptos's env values
        let conf = get_configuration(None)?;
        let leptos_options = conf.leptos_options;
        let addr = leptos_options.site_addr;
        let routes = generate_route_list(App);

        let app_state = AppStateBuilder::new(leptos_options, routes.clone(), config).build();

        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(telemetry_axum::make_span::make_span)
            .on_response(telemetry_axum::make_span::on_response);

        let site_origin: HeaderValue = format!("http://{addr}").parse()?;

        let sentry_tower_layer = ServiceBuilder::new()
            .layer(NewSentryLayer::new_from_top())
            .layer(SentryHttpLayer::with_transaction());

        let app = Router::new()
            .route(
                "/api/{*fn_name}",
                get(server_fn_handler).post(server_fn_handler),
            )
            .layer(
                CorsLayer::new()
                    .allow_headers([
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        HeaderName::from_static("sentry-trace"),
                        HeaderName::from_static("baggage"),
                    ])
                    .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
                    .allow_origin(site_origin),
            )
            .leptos_routes_with_handler(routes, get(leptos_routes_handler))
            .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
            .layer(sentry_tower_layer)
            .layer(trace_layer)
            .with_state(app_state);

        tracing::info!("listening on http://{}", &addr);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        Ok(())
    }
}

#[cfg(feature = "ssr")]
fn main() {
    dotenv::dotenv().ok();

    let config = match state::server::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let _guard = config.sentry_dsn.clone().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                traces_sample_rate: 0.25,
                ..Default::default()
            },
        ))
    });

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        if let Err(e) = server::main_impl(config).await {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
    });
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // the client bundle is built from lib.rs; the binary only exists with `ssr`
}
