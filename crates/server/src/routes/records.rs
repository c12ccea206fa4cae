use actix_web::{post, web, HttpResponse};
use tracing::{error, info};
use uuid::Uuid;

use crate::error_response;
use crate::state::AppState;
use crate::types::{BatchBody, BatchResponse, RecordBody};

/// Generate one compliant record
#[post("/records")]
pub async fn write_record(
    req: web::Json<RecordBody>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let request = req.into_inner().into_request();

    match state.writer.write(&request).await {
        Ok(record) => {
            info!(
                "Record written: {} chars (ceiling {}), {} attempt(s)",
                record.char_count, record.ceiling, record.attempts
            );
            Ok(HttpResponse::Ok().json(record))
        }
        Err(e) => {
            error!("Record generation failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

/// Generate records for a list of students, sequentially
#[post("/records/batch")]
pub async fn write_batch(
    req: web::Json<BatchBody>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let BatchBody { record, students } = req.into_inner();
    let batch_id = Uuid::new_v4().to_string();

    info!("Batch {} started for {} students", batch_id, students.len());

    let base = record.into_request();
    let results = state.writer.write_batch(&base, &students).await;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    info!("Batch {} finished: {} failed", batch_id, failed);

    Ok(HttpResponse::Ok().json(BatchResponse { batch_id, results }))
}
