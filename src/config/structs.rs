use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub review: ReviewConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
    pub cors: CorsConfig,
    pub catalog: CatalogConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            system_name: "任务线活动系统".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            unix_socket_path: String::new(),
            workers: 0,
            max_workers: 4,
            timeouts: TimeoutConfig::default(),
            limits: LimitConfig::default(),
        }
    }
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            client_request: 5000,
            client_disconnect: 1000,
            keep_alive: 30,
        }
    }
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_payload_size: 10 * 1024 * 1024,
        }
    }
}

/// 审核口令配置
///
/// 共享口令按原文与 X-Review-Key 请求头比对，没有哈希、没有会话。
/// 如果系统要面向真实多用户部署，应当替换为完整的认证方案。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    #[serde(skip_serializing, default = "default_review_key")] // 不序列化到JSON响应中
    pub key: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            key: default_review_key(),
        }
    }
}

fn default_review_key() -> String {
    "lovehearter".to_string()
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(rename = "type")]
    pub storage_type: String, // 存储后端名称（注册表键）
    pub data_file: String, // 提交记录 JSON 文件路径
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: "jsonfile".to_string(),
            data_file: "task_submissions.json".to_string(),
        }
    }
}

/// 上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub dir: String,                // 附件目录（扁平结构）
    pub max_size: usize,            // 单文件最大字节数
    pub allowed_types: Vec<String>, // 允许的扩展名
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "submissions".to_string(),
            max_size: 5 * 1024 * 1024,
            allowed_types: vec![".png".to_string(), ".jpg".to_string(), ".jpeg".to_string()],
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["*".to_string()],
            allowed_headers: vec!["*".to_string()],
            max_age: 3600,
        }
    }
}

/// 固定目录配置：任务线、子任务与小分队
///
/// 目录属于外部配置，存储层与 UI 都只读取、不拥有。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub task_lines: Vec<TaskLineEntry>,
    pub teams: Vec<String>,
}

/// 单条任务线及其子任务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskLineEntry {
    pub name: String,
    pub tasks: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let default_tasks = || vec!["A", "B", "C", "D", "E", "F"];
        let lines = [
            "走进真实线",
            "巴别塔线",
            "来硬的线",
            "健身线",
            "1+n团建线",
            "交友线",
        ];
        Self {
            task_lines: lines
                .iter()
                .map(|name| TaskLineEntry {
                    name: name.to_string(),
                    tasks: default_tasks().iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
            teams: (1..=10).map(|i| format!("第{i}小分队")).collect(),
        }
    }
}

impl CatalogConfig {
    /// 检查小分队标签是否在目录中
    pub fn contains_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t == team)
    }

    /// 查找任务线对应的子任务列表
    pub fn tasks_for_line(&self, task_line: &str) -> Option<&[String]> {
        self.task_lines
            .iter()
            .find(|l| l.name == task_line)
            .map(|l| l.tasks.as_slice())
    }

    /// 检查 (task_line, task) 是否为目录中的合法组合
    pub fn contains_task(&self, task_line: &str, task: &str) -> bool {
        self.tasks_for_line(task_line)
            .map(|tasks| tasks.iter().any(|t| t == task))
            .unwrap_or(false)
    }
}
