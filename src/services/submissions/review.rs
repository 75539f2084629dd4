use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::submissions::requests::UpdateStatusRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 审核动作：把提交置为任意目标状态
///
/// 状态机没有流转限制，approved/rejected 也可以被改回 pending。
pub async fn update_status(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: String,
    req: UpdateStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .update_submission_status(&submission_id, req.status)
        .await
    {
        Ok(true) => {
            info!("Submission {} status set to {}", submission_id, req.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("审核结果已保存")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("保存审核结果失败: {e}"),
            )),
        ),
    }
}
