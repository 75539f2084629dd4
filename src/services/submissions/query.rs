use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::entities::SubmissionRecord;
use crate::models::submissions::requests::UserQuery;
use crate::models::submissions::responses::SubmissionListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 用户视图：(name, student_id) 双字段原文精确匹配，保持存储顺序
pub(crate) fn user_records(records: Vec<SubmissionRecord>, query: &UserQuery) -> Vec<SubmissionRecord> {
    records
        .into_iter()
        .filter(|r| r.matches_identity(&query.name, &query.student_id))
        .collect()
}

pub async fn list_user_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: UserQuery,
) -> ActixResult<HttpResponse> {
    if query.name.trim().is_empty() || query.student_id.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationError,
            "请填写姓名和学号",
        )));
    }

    let storage = service.get_storage(request);

    match storage.load_all().await {
        Ok(records) => {
            let items = user_records(records, &query);
            let total = items.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionListResponse { items, total },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交记录失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::{SubmissionStatus, SubmissionType};

    fn record(name: &str, student_id: &str) -> SubmissionRecord {
        SubmissionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            student_id: student_id.to_string(),
            team: "第3小分队".to_string(),
            task_line: "走进真实线".to_string(),
            task: "B".to_string(),
            submission_type: SubmissionType::Text,
            submission_content: "完成任务B".to_string(),
            file_path: None,
            submission_time: "2025-01-01 12:00:00".to_string(),
            status: SubmissionStatus::Pending,
        }
    }

    #[test]
    fn test_user_view_requires_both_fields_to_match() {
        let records = vec![
            record("李伟", "2023001"),
            record("李伟", "2023002"),
            record("王芳", "2023001"),
        ];
        let query = UserQuery {
            name: "李伟".to_string(),
            student_id: "2023001".to_string(),
        };

        let matched = user_records(records, &query);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "李伟");
        assert_eq!(matched[0].student_id, "2023001");
    }

    #[test]
    fn test_user_view_is_idempotent() {
        let records = vec![record("李伟", "2023001"), record("李伟", "2023001")];
        let query = UserQuery {
            name: "李伟".to_string(),
            student_id: "2023001".to_string(),
        };

        let first = user_records(records.clone(), &query);
        let second = user_records(records, &query);
        let first_ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
