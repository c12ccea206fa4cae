use actix_web::{post, web, HttpResponse};
use saenggibu_llm::{GenerationRequest, TextGenerator};
use tracing::{error, info};

use crate::error_response;
use crate::state::AppState;
use crate::types::{ErrorResponse, GenerateBody, GenerateResponse};

/// Proxy a prompt to the LLM and return the raw text
#[post("/generate")]
pub async fn generate(
    req: web::Json<GenerateBody>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let body = req.into_inner();

    if body.prompt.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "prompt가 비어있습니다".to_string(),
        }));
    }

    info!("Raw generation requested - Prompt length: {} chars", body.prompt.chars().count());

    let request = GenerationRequest::new(body.prompt).with_instructions(body.additional_instructions);

    match state.generator().generate(&request).await {
        Ok(result) => Ok(HttpResponse::Ok().json(GenerateResponse { result })),
        Err(e) => {
            error!("Generation failed: {}", e);
            Ok(error_response(&e))
        }
    }
}
