use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{Result, TaskLineError};
use crate::models::submissions::entities::{SubmissionRecord, SubmissionStatus};

pub mod json_file;
pub mod register;

/// 提交记录存储抽象
///
/// 接口刻意收窄为 load/append/update/delete，后端可以在不改动调用方的
/// 前提下替换（默认为 JSON 文件后端）。每次调用都重新从磁盘读取，
/// 每次变更都整文件重写；没有加锁，并发写入会互相覆盖（接受的限制）。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // 加载全部提交记录，保持持久化时的插入顺序；
    // 文件缺失或无法解析时返回空序列，从不向调用方抛错
    async fn load_all(&self) -> Result<Vec<SubmissionRecord>>;
    // 通过ID获取提交记录
    async fn get_submission_by_id(&self, id: &str) -> Result<Option<SubmissionRecord>>;
    // 追加提交记录，id 为空时分配唯一ID，返回落盘后的记录
    async fn append_submission(&self, record: SubmissionRecord) -> Result<SubmissionRecord>;
    // 更新审核状态；id 不存在时返回 Ok(false)，不报错
    async fn update_submission_status(&self, id: &str, status: SubmissionStatus) -> Result<bool>;
    // 删除提交记录；图片提交连同附件一起删除，附件已缺失不影响删除本身
    async fn delete_submission(&self, id: &str) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    let storage_type = &config.storage.storage_type;

    if let Some(constructor) = register::get_storage_plugin(storage_type) {
        let storage = constructor().await?;
        Ok(Arc::from(storage))
    } else {
        Err(TaskLineError::storage_plugin_not_found(format!(
            "Storage backend '{storage_type}' not found in registry"
        )))
    }
}
