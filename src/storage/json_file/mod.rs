//! JSON 文件存储后端
//!
//! 整个存储是一个 JSON 数组文件：每次操作重新读取全量记录，
//! 每次变更把全量记录缩进重写回去。写入中途崩溃可能损坏文件，
//! 损坏的文件在下次加载时按空存储处理。

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::declare_storage_plugin;
use crate::errors::{Result, TaskLineError};
use crate::models::submissions::entities::{SubmissionRecord, SubmissionStatus, SubmissionType};
use crate::storage::Storage;

declare_storage_plugin!("jsonfile", JsonFileStorage);

pub struct JsonFileStorage {
    data_file: PathBuf,
}

impl JsonFileStorage {
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Ok(Self::with_data_file(&config.storage.data_file))
    }

    /// 使用指定数据文件路径构造（测试与自定义部署用）
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// 读取全量记录；文件缺失或解析失败都按空存储处理
    fn read_records(&self) -> Vec<SubmissionRecord> {
        let contents = match fs::read_to_string(&self.data_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "Data file {} not found, treating as empty store",
                    self.data_file.display()
                );
                return Vec::new();
            }
            Err(e) => {
                warn!(
                    "Failed to read data file {}: {}, treating as empty store",
                    self.data_file.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Failed to parse data file {}: {}, treating as empty store",
                    self.data_file.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// 全量重写数据文件（缩进格式，UTF-8）
    fn write_records(&self, records: &[SubmissionRecord]) -> Result<()> {
        if let Some(parent) = self.data_file.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .map_err(|e| TaskLineError::store_write(format!("{e}")))?;
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.data_file, json).map_err(|e| {
            TaskLineError::store_write(format!(
                "Failed to write data file {}: {e}",
                self.data_file.display()
            ))
        })
    }

    /// 删除图片提交的附件文件；附件已缺失只记录警告
    fn remove_attachment(record: &SubmissionRecord) {
        let Some(file_path) = &record.file_path else {
            return;
        };

        match fs::remove_file(Path::new(file_path)) {
            Ok(()) => {
                debug!("Removed attachment {}", file_path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Attachment {} already missing when deleting submission {}",
                    file_path, record.id
                );
            }
            Err(e) => {
                warn!(
                    "Failed to remove attachment {} for submission {}: {}",
                    file_path, record.id, e
                );
            }
        }
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn load_all(&self) -> Result<Vec<SubmissionRecord>> {
        Ok(self.read_records())
    }

    async fn get_submission_by_id(&self, id: &str) -> Result<Option<SubmissionRecord>> {
        Ok(self.read_records().into_iter().find(|r| r.id == id))
    }

    async fn append_submission(&self, mut record: SubmissionRecord) -> Result<SubmissionRecord> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }

        let mut records = self.read_records();
        records.push(record.clone());
        self.write_records(&records)?;

        debug!("Appended submission {} ({} records total)", record.id, records.len());
        Ok(record)
    }

    async fn update_submission_status(&self, id: &str, status: SubmissionStatus) -> Result<bool> {
        let mut records = self.read_records();

        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        record.status = status;

        self.write_records(&records)?;
        Ok(true)
    }

    async fn delete_submission(&self, id: &str) -> Result<bool> {
        let mut records = self.read_records();

        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = records.remove(index);

        self.write_records(&records)?;

        if removed.submission_type == SubmissionType::Image {
            Self::remove_attachment(&removed);
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (JsonFileStorage, PathBuf) {
        let dir = std::env::temp_dir().join(format!("taskline-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let storage = JsonFileStorage::with_data_file(dir.join("task_submissions.json"));
        (storage, dir)
    }

    fn sample_record(name: &str, student_id: &str) -> SubmissionRecord {
        SubmissionRecord {
            id: String::new(),
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

    #[tokio::test]
    async fn test_append_load_round_trip() {
        let (storage, dir) = temp_store();

        let stored = storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();
        assert!(!stored.id.is_empty());

        let records = storage.load_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, stored.id);
        assert_eq!(records[0].name, "李伟");
        assert_eq!(records[0].student_id, "2023001");
        assert_eq!(records[0].team, "第3小分队");
        assert_eq!(records[0].status, SubmissionStatus::Pending);

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        let (storage, dir) = temp_store();

        let first = storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();
        let second = storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        // 已有 id 的记录不重新分配
        let mut preset = sample_record("王芳", "2023002");
        preset.id = "preset-id".to_string();
        let stored = storage.append_submission(preset).await.unwrap();
        assert_eq!(stored.id, "preset-id");

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let (storage, dir) = temp_store();
        let records = storage.load_all().await.unwrap();
        assert!(records.is_empty());
        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_empty() {
        let (storage, dir) = temp_store();
        fs::write(dir.join("task_submissions.json"), "{not valid json").unwrap();

        let records = storage.load_all().await.unwrap();
        assert!(records.is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_update_status_unrestricted_transitions() {
        let (storage, dir) = temp_store();
        let stored = storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();

        // 任意状态之间都允许流转，重新加载后可见
        for status in [
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
            SubmissionStatus::Pending,
            SubmissionStatus::Approved,
        ] {
            assert!(
                storage
                    .update_submission_status(&stored.id, status)
                    .await
                    .unwrap()
            );
            let records = storage.load_all().await.unwrap();
            assert_eq!(records[0].status, status);
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_is_noop() {
        let (storage, dir) = temp_store();
        storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();

        let updated = storage
            .update_submission_status("no-such-id", SubmissionStatus::Approved)
            .await
            .unwrap();
        assert!(!updated);
        assert_eq!(storage.load_all().await.unwrap().len(), 1);

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_record() {
        let (storage, dir) = temp_store();
        let first = storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();
        let second = storage
            .append_submission(sample_record("王芳", "2023002"))
            .await
            .unwrap();

        assert!(storage.delete_submission(&first.id).await.unwrap());

        let records = storage.load_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, second.id);

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_image_attachment() {
        let (storage, dir) = temp_store();

        let attachment = dir.join("2023001_李伟_走进真实线_B_20250101120000.png");
        fs::write(&attachment, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let mut record = sample_record("李伟", "2023001");
        record.submission_type = SubmissionType::Image;
        record.submission_content = "图片文件: 2023001_李伟_走进真实线_B_20250101120000.png".to_string();
        record.file_path = Some(attachment.to_string_lossy().to_string());

        let stored = storage.append_submission(record).await.unwrap();
        assert!(storage.delete_submission(&stored.id).await.unwrap());

        assert!(!attachment.exists());
        assert!(storage.load_all().await.unwrap().is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_attachment() {
        let (storage, dir) = temp_store();

        let mut record = sample_record("李伟", "2023001");
        record.submission_type = SubmissionType::Image;
        record.file_path = Some(
            dir.join("already-gone.png").to_string_lossy().to_string(),
        );

        let stored = storage.append_submission(record).await.unwrap();

        // 附件已缺失，删除仍然成功
        assert!(storage.delete_submission(&stored.id).await.unwrap());
        assert!(storage.load_all().await.unwrap().is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (storage, dir) = temp_store();
        let deleted = storage.delete_submission("no-such-id").await.unwrap();
        assert!(!deleted);
        fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    async fn test_persisted_file_is_indented_json() {
        let (storage, dir) = temp_store();
        storage
            .append_submission(sample_record("李伟", "2023001"))
            .await
            .unwrap();

        let contents = fs::read_to_string(dir.join("task_submissions.json")).unwrap();
        assert!(contents.starts_with('['));
        assert!(contents.contains('\n'));

        fs::remove_dir_all(dir).unwrap();
    }
}
