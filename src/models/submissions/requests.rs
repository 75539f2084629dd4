use serde::Deserialize;

use crate::models::submissions::entities::SubmissionStatus;

/// 文本提交请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    pub name: String,
    pub student_id: String,
    pub team: String,
    pub task_line: String,
    pub task: String,
    pub content: String,
}

/// 审核动作请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: SubmissionStatus,
}

/// 用户查询参数：按 (name, student_id) 精确匹配
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    pub name: String,
    pub student_id: String,
}
