pub mod catalog;
pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 固定目录：任务线、子任务与小分队标签
    pub async fn get_catalog(&self) -> ActixResult<HttpResponse> {
        catalog::get_catalog().await
    }

    /// 健康检查与运行信息
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(request).await
    }
}
