use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use saenggibu_llm::TextGenerator;
use tracing::warn;

use crate::state::AppState;
use crate::types::HealthResponse;

/// Liveness check, including whether the LLM endpoint is reachable
#[get("/health")]
pub async fn health(state: web::Data<std::sync::Arc<AppState>>) -> actix_web::Result<HttpResponse> {
    let generator = state.generator();
    let llm = generator.is_available().await;

    if !llm {
        warn!("LLM endpoint {} is not reachable", state.config.llm_base_url);
    }

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: generator.model().to_string(),
        endpoint: state.config.llm_base_url.clone(),
        llm,
        time: Utc::now(),
    }))
}
