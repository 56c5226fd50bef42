//! harmony-palette-back binary entrypoint wiring the tokenizer, model server and REST layers.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harmony_palette_back::{
    config::AppConfig,
    predictor::{NamePredictor, NameTokenizer},
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let predictor = build_predictor(&config);
    let app_state = AppState::new(predictor);
    if app_state.is_degraded() {
        warn!("name prediction disabled; only color values will be resolved");
    }

    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Fit the name tokenizer and connect the model server, or return `None` to run degraded.
fn build_predictor(config: &AppConfig) -> Option<Arc<dyn NamePredictor>> {
    let tokenizer =
        match NameTokenizer::from_csv_path(config.corpus_path(), config.max_name_length()) {
            Ok(tokenizer) => {
                info!(
                    corpus = %config.corpus_path().display(),
                    vocabulary = tokenizer.vocabulary_size(),
                    classes = tokenizer.num_classes(),
                    "fitted name tokenizer"
                );
                Arc::new(tokenizer)
            }
            Err(err) => {
                warn!(error = %err, "failed to fit name tokenizer; entering degraded mode");
                return None;
            }
        };

    connect_model_server(tokenizer)
}

#[cfg(feature = "tf-serving")]
fn connect_model_server(tokenizer: Arc<NameTokenizer>) -> Option<Arc<dyn NamePredictor>> {
    use harmony_palette_back::predictor::tf_serving::{ModelServerConfig, TfServingPredictor};

    let config = match ModelServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "model server not configured; entering degraded mode");
            return None;
        }
    };

    let base_url = config.base_url.clone();
    let model = config.model.clone();
    match TfServingPredictor::connect(config, tokenizer) {
        Ok(predictor) => {
            info!(%base_url, %model, "model server client ready");
            Some(Arc::new(predictor))
        }
        Err(err) => {
            warn!(error = %err, "failed to build model server client; entering degraded mode");
            None
        }
    }
}

#[cfg(not(feature = "tf-serving"))]
fn connect_model_server(_tokenizer: Arc<NameTokenizer>) -> Option<Arc<dyn NamePredictor>> {
    warn!("built without a prediction backend; entering degraded mode");
    None
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
