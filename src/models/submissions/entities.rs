use serde::{Deserialize, Serialize};

/// 提交时间的持久化格式
pub const SUBMISSION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// 提交方式
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    Text,  // 文本
    Image, // 图片
}

impl SubmissionType {
    pub const TEXT: &'static str = "text";
    pub const IMAGE: &'static str = "image";
}

impl<'de> Deserialize<'de> for SubmissionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionType::TEXT => Ok(SubmissionType::Text),
            SubmissionType::IMAGE => Ok(SubmissionType::Image),
            _ => Err(serde::de::Error::custom(format!(
                "无效的提交方式: '{s}'. 支持的方式: text, image"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::Text => write!(f, "{}", SubmissionType::TEXT),
            SubmissionType::Image => write!(f, "{}", SubmissionType::IMAGE),
        }
    }
}

impl std::str::FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SubmissionType::Text),
            "image" => Ok(SubmissionType::Image),
            _ => Err(format!("Invalid submission type: {s}")),
        }
    }
}

// 审核状态
//
// 初始为 pending，审核动作可以把任意状态改为任意状态，
// 没有流转限制（approved/rejected 均可被再次修改）。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,  // 待审核
    Approved, // 审核通过
    Rejected, // 审核不通过
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const APPROVED: &'static str = "approved";
    pub const REJECTED: &'static str = "rejected";

    pub fn all_statuses() -> &'static [SubmissionStatus] {
        &[Self::Pending, Self::Approved, Self::Rejected]
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::APPROVED => Ok(SubmissionStatus::Approved),
            SubmissionStatus::REJECTED => Ok(SubmissionStatus::Rejected),
            _ => Err(serde::de::Error::custom(format!(
                "无效的审核状态: '{s}'. 支持的状态: pending, approved, rejected"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Approved => write!(f, "{}", SubmissionStatus::APPROVED),
            SubmissionStatus::Rejected => write!(f, "{}", SubmissionStatus::REJECTED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交记录实体
//
// id 在追加时生成，之后不变；身份字段创建后不可修改，
// 只有 status 会被审核动作更新。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub student_id: String,
    pub team: String,
    pub task_line: String,
    pub task: String,
    pub submission_type: SubmissionType,
    pub submission_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub submission_time: String,
    pub status: SubmissionStatus,
}

impl SubmissionRecord {
    /// 当前本地时间的提交时间戳字符串
    pub fn now_timestamp() -> String {
        chrono::Local::now().format(SUBMISSION_TIME_FORMAT).to_string()
    }

    /// 是否与查询身份 (name, student_id) 精确匹配
    ///
    /// 身份没有名册校验，两个字段都按原文比对。
    pub fn matches_identity(&self, name: &str, student_id: &str) -> bool {
        self.name == name && self.student_id == student_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_round_trip() {
        for status in SubmissionStatus::all_statuses() {
            let json = serde_json::to_string(status).unwrap();
            let back: SubmissionStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(*status, back);
        }
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let result: Result<SubmissionStatus, _> = serde_json::from_str("\"待审核\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_type_serde() {
        assert_eq!(
            serde_json::to_string(&SubmissionType::Image).unwrap(),
            "\"image\""
        );
        let t: SubmissionType = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(t, SubmissionType::Text);
    }

    #[test]
    fn test_record_omits_absent_file_path() {
        let record = SubmissionRecord {
            id: "abc".to_string(),
            name: "李伟".to_string(),
            student_id: "2023001".to_string(),
            team: "第3小分队".to_string(),
            task_line: "走进真实线".to_string(),
            task: "B".to_string(),
            submission_type: SubmissionType::Text,
            submission_content: "完成任务B".to_string(),
            file_path: None,
            submission_time: "2025-01-01 12:00:00".to_string(),
            status: SubmissionStatus::Pending,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("file_path"));
    }

    #[test]
    fn test_matches_identity_is_exact() {
        let record = SubmissionRecord {
            id: "abc".to_string(),
            name: "李伟".to_string(),
            student_id: "2023001".to_string(),
            team: "第3小分队".to_string(),
            task_line: "走进真实线".to_string(),
            task: "B".to_string(),
            submission_type: SubmissionType::Text,
            submission_content: "完成任务B".to_string(),
            file_path: None,
            submission_time: "2025-01-01 12:00:00".to_string(),
            status: SubmissionStatus::Pending,
        };
        assert!(record.matches_identity("李伟", "2023001"));
        assert!(!record.matches_identity("李伟", "2023002"));
        assert!(!record.matches_identity("李 伟", "2023001"));
    }
}
