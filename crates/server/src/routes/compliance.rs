use actix_web::{get, post, web, HttpResponse};
use saenggibu_text::{clamp_ceiling, compute_prompt_budget, ComplianceTruncator};

use crate::types::{BudgetQuery, BudgetResponse, ComplianceBody, ComplianceResponse};

/// Run the post-processor on caller-supplied text
#[post("/compliance")]
pub async fn enforce(req: web::Json<ComplianceBody>) -> actix_web::Result<HttpResponse> {
    let truncator = ComplianceTruncator::default();
    let text = truncator.enforce(&req.text, req.target_chars);

    Ok(HttpResponse::Ok().json(ComplianceResponse {
        char_count: text.chars().count(),
        ceiling: clamp_ceiling(req.target_chars),
        complete: truncator.endings().is_complete(&text),
        text,
    }))
}

/// Character budget for a requested length
#[get("/budget")]
pub async fn budget(query: web::Query<BudgetQuery>) -> actix_web::Result<HttpResponse> {
    let budget = compute_prompt_budget(query.chars);

    Ok(HttpResponse::Ok().json(BudgetResponse {
        ceiling: budget.ceiling,
        prompt_target: budget.prompt_target,
        buffer_ratio: budget.buffer_ratio(),
    }))
}
