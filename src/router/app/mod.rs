use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tera::Context;

use std::sync::Arc;

use crate::{
    data::model::{Measurement, HEIGHT_RANGE_CM, WEIGHT_RANGE_KG},
    middleware::ErrorMessage,
    AppState,
};

mod home;
use home::home;
mod advice;
use advice::{advice, Assessment};
mod error;
use error::error;
mod health;
use health::health;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/advice", post(advice))
        .route("/error", get(error))
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("{:?}", self);
        let mut r = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        r.extensions_mut()
            .insert(ErrorMessage("The page could not be rendered".to_string()));
        r
    }
}

#[derive(Serialize)]
struct Limits {
    height: (f64, f64),
    weight: (f64, f64),
}

/// Context shared by the full page and the result fragment.
fn page_context(form: &Measurement, assessment: Option<&Assessment>) -> Context {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert(
        "limits",
        &Limits {
            height: HEIGHT_RANGE_CM,
            weight: WEIGHT_RANGE_KG,
        },
    );
    context.insert("assessment", &assessment);
    context
}
