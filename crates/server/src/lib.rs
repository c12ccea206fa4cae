//! Saenggibu HTTP server
//!
//! Actix-web 기반 REST API 서버

pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer};
use saenggibu_common::{AppConfig, Result, SaenggibuError};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use state::AppState;
use types::ErrorResponse;

/// Map a domain error onto an HTTP response with an `{error}` body
pub fn error_response(err: &SaenggibuError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse {
        error: err.to_string(),
    })
}

/// Start the HTTP server and run until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let bind_addr = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!("Starting server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use async_trait::async_trait;
    use saenggibu_llm::{GenerationRequest, TextGenerator};
    use std::sync::Mutex;

    /// Returns canned responses in order, then reports an empty response
    struct CannedGenerator {
        responses: Mutex<Vec<String>>,
        available: bool,
    }

    impl CannedGenerator {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().rev().map(|s| s.to_string()).collect()),
                available: true,
            })
        }

        fn offline() -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(Vec::new()),
                available: false,
            })
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| SaenggibuError::empty_response("no canned response"))
        }

        fn model(&self) -> &str {
            "canned"
        }

        async fn is_available(&self) -> bool {
            self.available
        }
    }

    fn state_with(responses: &[&str]) -> web::Data<Arc<AppState>> {
        let state = AppState::with_generator(AppConfig::default(), CannedGenerator::new(responses));
        web::Data::new(Arc::new(state))
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new().app_data(state_with(&[])).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "canned");
        assert_eq!(body["endpoint"], "http://localhost:11434");
        assert_eq!(body["llm"], true);
    }

    #[actix_web::test]
    async fn test_health_reports_unreachable_llm() {
        let state = AppState::with_generator(AppConfig::default(), CannedGenerator::offline());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::new(state)))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["llm"], false);
    }

    #[actix_web::test]
    async fn test_generate_returns_raw_text() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(&["실험을 설계함 (약 300자)"]))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({ "prompt": "과학 실험" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"], "실험을 설계함 (약 300자)");
    }

    #[actix_web::test]
    async fn test_generate_rejects_blank_prompt() {
        let app = test::init_service(
            App::new().app_data(state_with(&[])).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({ "prompt": "  " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generate_empty_response_is_bad_gateway() {
        let app = test::init_service(
            App::new().app_data(state_with(&[])).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(serde_json::json!({ "prompt": "과학 실험" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("AI 응답이 비어있습니다"));
    }

    #[actix_web::test]
    async fn test_record_is_post_processed() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(&["토론을 주도함. 근거를 제시함 (약 200자)"]))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/records")
            .set_json(serde_json::json!({
                "notes": ["독서 토론"],
                "textLength": "manual",
                "manualLength": 30
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["text"], "토론을 주도함. 근거를 제시함.");
        assert_eq!(body["ceiling"], 30);
        assert_eq!(body["complete"], true);
    }

    #[actix_web::test]
    async fn test_record_without_notes_is_bad_request() {
        let app = test::init_service(
            App::new().app_data(state_with(&[])).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/records")
            .set_json(serde_json::json!({ "notes": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_batch_reports_each_student() {
        let app = test::init_service(
            App::new()
                .app_data(state_with(&["부스를 운영함."]))
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/records/batch")
            .set_json(serde_json::json!({
                "kind": "club",
                "notes": ["축제 부스 운영"],
                "students": [{ "id": "1" }, { "id": "2" }]
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["record"]["text"], "부스를 운영함.");
        assert!(results[1]["error"].is_string());
        assert!(!body["batchId"].as_str().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_compliance_route() {
        let app = test::init_service(
            App::new().app_data(state_with(&[])).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/compliance")
            .set_json(serde_json::json!({
                "text": "첫 문장임. 두 번째 문장임. 세 번째 문장임.",
                "targetChars": 10
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["text"], "첫 문장임.");
        assert_eq!(body["charCount"], 6);
        assert_eq!(body["ceiling"], 10);
        assert_eq!(body["complete"], true);
    }

    #[actix_web::test]
    async fn test_budget_route() {
        let app = test::init_service(
            App::new().app_data(state_with(&[])).configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/budget?chars=600").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ceiling"], 500);
        assert_eq!(body["promptTarget"], 450);
        assert_eq!(body["bufferRatio"], 0.9);
    }
}
