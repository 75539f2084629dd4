use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::config::AppConfig;
use crate::models::submissions::entities::{SubmissionRecord, SubmissionStatus, SubmissionType};
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 校验提交的元数据字段，任何失败都发生在存储变更之前
///
/// 姓名和学号必填；小分队、任务线与子任务必须出自固定目录。
pub(super) fn validate_submission_fields(
    name: &str,
    student_id: &str,
    team: &str,
    task_line: &str,
    task: &str,
) -> Result<(), HttpResponse> {
    if name.trim().is_empty() || student_id.trim().is_empty() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "请填写姓名和学号",
        )));
    }

    let catalog = &AppConfig::get().catalog;

    if !catalog.contains_team(team) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("无效的小分队: {team}"),
        )));
    }

    if catalog.tasks_for_line(task_line).is_none() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("无效的任务线: {task_line}"),
        )));
    }

    if !catalog.contains_task(task_line, task) {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            format!("任务线 {task_line} 中没有任务 {task}"),
        )));
    }

    Ok(())
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = validate_submission_fields(
        &req.name,
        &req.student_id,
        &req.team,
        &req.task_line,
        &req.task,
    ) {
        return Ok(resp);
    }

    if req.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "请填写任务成果描述",
        )));
    }

    let record = SubmissionRecord {
        id: String::new(), // 由存储层分配
        name: req.name,
        student_id: req.student_id,
        team: req.team,
        task_line: req.task_line,
        task: req.task,
        submission_type: SubmissionType::Text,
        submission_content: req.content,
        file_path: None,
        submission_time: SubmissionRecord::now_timestamp(),
        status: SubmissionStatus::Pending,
    };

    let storage = service.get_storage(request);
    match storage.append_submission(record).await {
        Ok(stored) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stored,
            "您的任务成果已经进入审核阶段，请耐心等待",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("保存提交失败: {e}"),
            )),
        ),
    }
}
