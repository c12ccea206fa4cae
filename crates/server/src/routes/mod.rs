mod compliance;
mod generate;
mod records;
mod system;

use actix_web::web;

/// Register all `/api` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(generate::generate)
            .service(records::write_record)
            .service(records::write_batch)
            .service(compliance::enforce)
            .service(compliance::budget)
            .service(system::health),
    );
}
