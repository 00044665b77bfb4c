use axum::{
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};

use tera::Context;

use std::sync::Arc;

use crate::{router::render_page, AppState};

/// Human-readable detail attached to an error response for the error view.
#[derive(Clone, Debug)]
pub struct ErrorMessage(pub String);

/// Sends the client to the error view. htmx requests get a 200 with only
/// `HX-Redirect`; a 303 would be followed inside the XHR.
pub fn error_response(code: u16, message: &str, htmx: bool) -> Response {
    let to = format!("/error?code={}&message={}", code, urlencoding::encode(message));
    if !htmx {
        return Redirect::to(&to).into_response();
    }

    let mut r = StatusCode::OK.into_response();
    if let Ok(value) = HeaderValue::from_str(&to) {
        r.headers_mut().insert("hx-redirect", value);
    }
    r
}

pub async fn handle_error<B>(
    State(state): State<Arc<AppState>>,
    req: Request<B>,
    next: Next<B>,
) -> Response
where
    B: Send + 'static,
{
    let response = next.run(req).await;
    let status = response.status();

    if status.as_u16() < 400 {
        return response;
    }

    let message = response
        .extensions()
        .get::<ErrorMessage>()
        .map(|m| m.0.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string());

    tracing::debug!(status = status.as_u16(), %message, "rendering error view");

    match error_page(&state, status.as_u16(), &message) {
        Ok(page) => (status, page).into_response(),
        Err(e) => {
            tracing::error!("failed to render error view: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

pub fn error_page(state: &AppState, code: u16, message: &str) -> Result<Html<String>, tera::Error> {
    let mut context = Context::new();
    context.insert("status_code", &code);
    context.insert("status_text", message);

    render_page(&state.tera, "views/error.html", context)
}
