use axum::{extract::State, response::Html};

use std::sync::Arc;

use super::{page_context, PageError};
use crate::{data::model::Measurement, router::render_page, AppState};

#[axum::debug_handler]
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let context = page_context(&Measurement::default(), None);
    Ok(render_page(&state.tera, "views/home.html", context)?)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app_with, body_string, StubCoach};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn renders_form_with_defaults_and_placeholder() {
        let app = app_with(StubCoach::Reply("unused".to_string()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(r#"name="height_cm""#));
        assert!(body.contains(r#"value="170"#));
        assert!(body.contains(r#"value="65"#));
        assert!(body.contains("start your health journey"));
        assert!(!body.contains("Your BMI"));
    }
}
