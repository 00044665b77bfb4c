use axum::{
    extract::{Query, State},
    response::Html,
};

use serde::Deserialize;

use std::sync::Arc;

use super::PageError;
use crate::{middleware::error_page, AppState};

#[derive(Deserialize)]
pub struct ErrorParams {
    code: u16,
    message: String,
}

#[axum::debug_handler]
pub async fn error(
    Query(params): Query<ErrorParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, PageError> {
    Ok(error_page(&state, params.code, &params.message)?)
}
