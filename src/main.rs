use axum::Router;
use tera::Tera;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;
use router::app_router;
use std::sync::Arc;
mod ai;
use ai::completion::{ChatClient, CompletionClient};
mod config;
use config::Config;
mod data;
mod middleware;

use crate::middleware::handle_error;

pub struct AppState {
    tera: Tera,
    coach: Arc<dyn ChatClient>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bmi_coach=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{:#}", e);
        ::std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // no key, no page: nothing is served until this succeeds
    let config = Config::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let tera = Tera::new("templates/**/*")?;
    let coach = CompletionClient::new(&config)?;

    let state = Arc::new(AppState {
        tera,
        coach: Arc::new(coach),
    });

    let app = build_app(state);

    tracing::info!("listening on {}", config.bind_addr);
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

fn build_app(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new("assets");

    Router::new()
        .nest_service("/assets", static_files)
        .merge(app_router(state.clone()))
        .layer(axum::middleware::from_fn_with_state(state, handle_error))
        .layer(TraceLayer::new_for_http())
}
