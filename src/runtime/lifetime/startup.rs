use crate::config::AppConfig;
use crate::storage::Storage;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 初始化数据文件：不存在时写入空数组
fn init_data_file(data_file: &str) {
    if Path::new(data_file).exists() {
        debug!("Data file {} already exists", data_file);
        return;
    }

    match std::fs::write(data_file, "[]") {
        Ok(()) => warn!("Created empty data file {}", data_file),
        Err(e) => warn!("Failed to create data file {}: {}", data_file, e),
    }
}

/// 初始化附件目录
fn init_upload_dir(upload_dir: &str) {
    if Path::new(upload_dir).exists() {
        return;
    }

    match std::fs::create_dir_all(upload_dir) {
        Ok(()) => warn!("Created upload directory {}", upload_dir),
        Err(e) => warn!("Failed to create upload directory {}: {}", upload_dir, e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储后端和数据目录检查
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    if cfg!(debug_assertions) {
        crate::storage::register::debug_storage_registry();
        debug!("Debug mode: Storage registry is enabled");
    }

    init_data_file(&config.storage.data_file);
    init_upload_dir(&config.upload.dir);

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized");

    StartupContext { storage }
}
