// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Service status including database reachability

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

pub async fn health_check(pool: web::Data<PgPool>) -> impl Responder {
    let database = match sqlx::query("SELECT 1").execute(pool.get_ref()).await {
        Ok(_) => "up",
        Err(e) => {
            log::error!("Health check database probe failed: {}", e);
            "down"
        }
    };

    HttpResponse::Ok().json(json!({
        "status": if database == "up" { "ok" } else { "degraded" },
        "database": database,
        "service": "tembo-travel",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
