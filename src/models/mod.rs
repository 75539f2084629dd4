pub mod common;
pub mod submissions;

pub use common::response::ApiResponse;

/// 业务错误码
///
/// code 为 0 表示成功，4xxxx 为客户端错误，5xxxx 为服务端错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    BadRequest = 40000,
    ValidationError = 40001,
    FileTypeNotAllowed = 40002,
    FileSizeExceeded = 40003,
    FileMissing = 40004,
    MultifileUploadNotAllowed = 40005,
    Unauthorized = 40100,
    NotFound = 40400,
    SubmissionNotFound = 40401,
    AttachmentNotFound = 40402,
    InternalServerError = 50000,
}

/// 程序启动时间（用于健康检查接口计算运行时长）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
