use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Form,
};

use serde::{Deserialize, Serialize};

use std::sync::Arc;

use super::{page_context, PageError};
use crate::{
    ai::{completion::ChatClient, prompt::advice_messages},
    data::model::{BmiResult, Measurement},
    middleware::error_response,
    router::render_page,
    AppState,
};

pub const FAILURE_LABEL: &str = "Could not reach the AI server";

#[derive(Deserialize, Debug)]
pub struct MeasurementForm {
    height_cm: f64,
    weight_kg: f64,
}

/// Outcome of the advice request; exactly one branch is rendered.
#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advice {
    Ready { text: String, html: String },
    Failed { label: &'static str, detail: String },
}

impl Advice {
    fn ready(text: String) -> Self {
        let html = comrak::markdown_to_html(&text, &comrak::Options::default());
        Advice::Ready { text, html }
    }
}

#[derive(Serialize, Debug)]
pub struct Assessment {
    pub bmi: BmiResult,
    pub bmi_display: String,
    pub category_label: &'static str,
    pub gauge_percent: f64,
    pub advice: Advice,
}

/// Computes the BMI, then asks the coach for advice. The BMI part never depends on the call.
pub async fn assess(coach: &dyn ChatClient, measurement: Measurement) -> Assessment {
    let bmi = measurement.bmi();
    let messages = advice_messages(&measurement, &bmi);

    let advice = match coach.complete(&messages).await {
        Ok(text) => {
            tracing::info!(bmi = %bmi.display(), chars = text.chars().count(), "advice received");
            Advice::ready(text)
        }
        Err(e) => {
            tracing::warn!("advice request failed: {}", e);
            Advice::Failed {
                label: FAILURE_LABEL,
                detail: e.to_string(),
            }
        }
    };

    Assessment {
        bmi_display: bmi.display(),
        category_label: bmi.category.label(),
        gauge_percent: bmi.gauge_position * 100.0,
        bmi,
        advice,
    }
}

#[axum::debug_handler]
pub async fn advice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<MeasurementForm>, FormRejection>,
) -> Result<Response, PageError> {
    let htmx = headers.contains_key("hx-request");

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!("rejected advice form: {}", rejection);
            return Ok(error_response(422, &rejection.body_text(), htmx));
        }
    };

    let measurement = match Measurement::new(form.height_cm, form.weight_kg) {
        Ok(m) => m,
        Err(e) => return Ok(error_response(422, &e.to_string(), htmx)),
    };

    let assessment = assess(state.coach.as_ref(), measurement).await;
    let context = page_context(&measurement, Some(&assessment));

    // htmx swaps only the result region
    if htmx {
        let fragment = state.tera.render("components/result.html", &context)?;
        Ok(Html(fragment).into_response())
    } else {
        Ok(render_page(&state.tera, "views/home.html", context)?.into_response())
    }
}
