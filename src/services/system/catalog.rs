use actix_web::{HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::ApiResponse;

/// 返回固定目录，供外部 UI 渲染选项；存储层与 UI 只消费、不拥有
pub async fn get_catalog() -> ActixResult<HttpResponse> {
    let catalog = &AppConfig::get().catalog;
    Ok(HttpResponse::Ok().json(ApiResponse::success(catalog, "查询成功")))
}
