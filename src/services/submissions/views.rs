use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::BTreeMap;

use super::SubmissionService;
use crate::models::submissions::entities::{SubmissionRecord, SubmissionStatus};
use crate::models::submissions::responses::{
    ApprovedTeamGroup, ApprovedViewResponse, SubmissionListResponse,
};
use crate::models::{ApiResponse, ErrorCode};

/// 待审核视图：status != approved（待审核与审核不通过一起展示），
/// 按提交时间倒序
pub(crate) fn pending_records(mut records: Vec<SubmissionRecord>) -> Vec<SubmissionRecord> {
    records.retain(|r| r.status != SubmissionStatus::Approved);
    // submission_time 固定为 %Y-%m-%d %H:%M:%S，字典序即时间序
    records.sort_by(|a, b| b.submission_time.cmp(&a.submission_time));
    records
}

/// 审核通过视图：按小分队标签字典序分组，组内按姓名字典序
pub(crate) fn approved_groups(records: Vec<SubmissionRecord>) -> Vec<ApprovedTeamGroup> {
    let mut by_team: BTreeMap<String, Vec<SubmissionRecord>> = BTreeMap::new();
    for record in records
        .into_iter()
        .filter(|r| r.status == SubmissionStatus::Approved)
    {
        by_team.entry(record.team.clone()).or_default().push(record);
    }

    by_team
        .into_iter()
        .map(|(team, mut items)| {
            items.sort_by(|a, b| a.name.cmp(&b.name));
            ApprovedTeamGroup { team, items }
        })
        .collect()
}

pub async fn list_pending(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.load_all().await {
        Ok(records) => {
            let items = pending_records(records);
            let total = items.len();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionListResponse { items, total },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询待审核列表失败: {e}"),
            )),
        ),
    }
}

pub async fn list_approved(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.load_all().await {
        Ok(records) => {
            let teams = approved_groups(records);
            let total = teams.iter().map(|g| g.items.len()).sum();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ApprovedViewResponse { teams, total },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询审核通过列表失败: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionType;

    fn record(
        name: &str,
        team: &str,
        time: &str,
        status: SubmissionStatus,
    ) -> SubmissionRecord {
        SubmissionRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            student_id: "2023001".to_string(),
            team: team.to_string(),
            task_line: "走进真实线".to_string(),
            task: "B".to_string(),
            submission_type: SubmissionType::Text,
            submission_content: "完成任务B".to_string(),
            file_path: None,
            submission_time: time.to_string(),
            status,
        }
    }

    #[test]
    fn test_pending_excludes_approved() {
        let records = vec![
            record("李伟", "第3小分队", "2025-01-01 10:00:00", SubmissionStatus::Pending),
            record("王芳", "第1小分队", "2025-01-01 11:00:00", SubmissionStatus::Approved),
            record("张强", "第2小分队", "2025-01-01 12:00:00", SubmissionStatus::Rejected),
        ];

        let pending = pending_records(records);
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|r| r.status != SubmissionStatus::Approved));
    }

    #[test]
    fn test_pending_ordered_by_time_descending() {
        let records = vec![
            record("李伟", "第3小分队", "2025-01-01 10:00:00", SubmissionStatus::Pending),
            record("张强", "第2小分队", "2025-01-02 09:00:00", SubmissionStatus::Rejected),
            record("王芳", "第1小分队", "2025-01-01 23:59:59", SubmissionStatus::Pending),
        ];

        let pending = pending_records(records);
        assert_eq!(pending[0].submission_time, "2025-01-02 09:00:00");
        assert_eq!(pending[1].submission_time, "2025-01-01 23:59:59");
        assert_eq!(pending[2].submission_time, "2025-01-01 10:00:00");
    }

    #[test]
    fn test_approved_grouped_by_team_sorted_by_name() {
        let records = vec![
            record("王芳", "第3小分队", "2025-01-01 10:00:00", SubmissionStatus::Approved),
            record("李伟", "第3小分队", "2025-01-01 11:00:00", SubmissionStatus::Approved),
            record("张强", "第1小分队", "2025-01-01 12:00:00", SubmissionStatus::Approved),
            record("赵敏", "第2小分队", "2025-01-01 13:00:00", SubmissionStatus::Pending),
        ];

        let groups = approved_groups(records);
        assert_eq!(groups.len(), 2);
        // 小分队标签按字典序
        assert_eq!(groups[0].team, "第1小分队");
        assert_eq!(groups[1].team, "第3小分队");
        // 组内按姓名字典序
        let names: Vec<&str> = groups[1].items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["李伟", "王芳"]);
    }

    #[test]
    fn test_approved_record_moves_between_views() {
        let mut rec = record("李伟", "第3小分队", "2025-01-01 10:00:00", SubmissionStatus::Pending);

        let pending = pending_records(vec![rec.clone()]);
        assert_eq!(pending.len(), 1);
        assert!(approved_groups(vec![rec.clone()]).is_empty());

        rec.status = SubmissionStatus::Approved;
        assert!(pending_records(vec![rec.clone()]).is_empty());
        let groups = approved_groups(vec![rec]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].team, "第3小分队");
    }
}
