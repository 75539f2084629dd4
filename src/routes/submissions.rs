use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateStatusRequest, UserQuery};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建文本提交
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 创建图片提交（multipart 表单）
pub async fn create_image_submission(
    req: HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_image_submission(&req, payload)
        .await
}

// 查询自己的提交记录
pub async fn list_my_submissions(
    req: HttpRequest,
    query: web::Query<UserQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_user_submissions(&req, query.into_inner())
        .await
}

// 审核通过视图（按小分队分组）
pub async fn list_approved(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_approved(&req).await
}

// 待审核视图（含审核不通过）
pub async fn list_pending(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.list_pending(&req).await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner())
        .await
}

// 下载提交附件
pub async fn download_attachment(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download_attachment(&req, path.into_inner())
        .await
}

// 审核动作：更新提交状态
pub async fn update_status(
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_status(&req, path.into_inner(), body.into_inner())
        .await
}

// 删除提交
pub async fn delete_submission(
    req: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    // 参与者侧路由：提交与查询，无需审核口令
    cfg.service(
        web::scope("/api/v1/submissions")
            .route("", web::post().to(create_submission))
            .route("/image", web::post().to(create_image_submission))
            .route("/my", web::get().to(list_my_submissions))
            .route("/approved", web::get().to(list_approved)),
    );

    // 审核侧路由：需要 X-Review-Key 口令
    cfg.service(
        web::scope("/api/v1/review/submissions")
            .wrap(middlewares::RequireReviewKey)
            .route("/pending", web::get().to(list_pending))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}/attachment", web::get().to(download_attachment))
            .route("/{id}/status", web::put().to(update_status))
            .route("/{id}", web::delete().to(delete_submission)),
    );
}
