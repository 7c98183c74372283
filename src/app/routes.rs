use crate::app::templates::{
    assessment_fragment, EMPTY_INPUT_MESSAGE, INDEX_TEMPLATE, PREDICT_TEMPLATE,
};
use crate::app::AppState;
use crate::domain::model::Assessment;
use crate::utils::error::DetectorError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct NewsForm {
    #[serde(default)]
    pub news: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "news-verify",
        "version": env!("CARGO_PKG_VERSION"),
        "stats": state.monitor.get_stats(),
    }))
}

pub async fn home(State(state): State<AppState>) -> Response {
    page_response(&state, INDEX_TEMPLATE).await
}

pub async fn predict_page(State(state): State<AppState>) -> Response {
    page_response(&state, PREDICT_TEMPLATE).await
}

pub async fn check_news(State(state): State<AppState>, request: Request) -> Response {
    let news = news_from_request(request).await;

    let text = match news.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => return prediction_response(&state, EMPTY_INPUT_MESSAGE).await,
    };

    match state.detector.assess(&text).await {
        Ok(assessment) => prediction_response(&state, &assessment_fragment(&assessment)).await,
        Err(e) => {
            tracing::error!("Check failed: {}", e);
            prediction_response(&state, &e.user_friendly_message()).await
        }
    }
}

pub async fn check_news_api(
    State(state): State<AppState>,
    Json(payload): Json<NewsForm>,
) -> Result<Json<Assessment>, (StatusCode, Json<ErrorResponse>)> {
    let text = payload.news.unwrap_or_default();
    match state.detector.assess(&text).await {
        Ok(assessment) => Ok(Json(assessment)),
        Err(DetectorError::EmptyInput) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: DetectorError::EmptyInput.to_string(),
                code: "EMPTY_INPUT".to_string(),
            }),
        )),
        Err(e) => {
            tracing::error!("API check failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                    code: "CHECK_FAILED".to_string(),
                }),
            ))
        }
    }
}

/// `news` from a urlencoded form, else from a JSON object body.
async fn news_from_request(request: Request) -> Option<String> {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    if is_form {
        return match Form::<NewsForm>::from_request(request, &()).await {
            Ok(Form(form)) => form.news,
            Err(e) => {
                tracing::debug!("Unreadable form body: {}", e);
                None
            }
        };
    }

    let body = Bytes::from_request(request, &()).await.ok()?;
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(map)) => {
            map.get("news").and_then(|v| v.as_str()).map(str::to_string)
        }
        _ => None,
    }
}

async fn page_response(state: &AppState, name: &str) -> Response {
    match state.templates.page(name).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => template_failure(e),
    }
}

async fn prediction_response(state: &AppState, prediction_html: &str) -> Response {
    match state.templates.render_prediction(prediction_html).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => template_failure(e),
    }
}

fn template_failure(e: DetectorError) -> Response {
    tracing::error!("{} ({})", e, e.recovery_suggestion());
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
