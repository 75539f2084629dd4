use serde::Serialize;

use crate::models::submissions::entities::SubmissionRecord;

/// 提交列表响应（待审核视图、用户查询视图共用）
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionRecord>,
    pub total: usize,
}

/// 按小分队分组的审核通过视图
#[derive(Debug, Serialize)]
pub struct ApprovedViewResponse {
    pub teams: Vec<ApprovedTeamGroup>,
    pub total: usize,
}

/// 单个小分队的审核通过记录
#[derive(Debug, Serialize)]
pub struct ApprovedTeamGroup {
    pub team: String,
    pub items: Vec<SubmissionRecord>,
}
