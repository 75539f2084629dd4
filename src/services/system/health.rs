use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub system_name: String,
    pub version: String,
    pub environment: String,
    pub uptime_seconds: i64,
}

pub async fn health(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let uptime_seconds = request
        .app_data::<actix_web::web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or(0);

    let response = HealthResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "ok")))
}
