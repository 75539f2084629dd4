use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::path::Path;

use super::SubmissionService;
use crate::config::AppConfig;
use crate::errors::TaskLineError;
use crate::models::submissions::entities::{SubmissionRecord, SubmissionStatus, SubmissionType};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate_magic_bytes;

/// 清洗文件名组成部分，去掉路径分隔符，防止拼出越界路径
pub(super) fn sanitize_component(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' => '_',
            c => c,
        })
        .collect()
}

/// 收集到的 multipart 表单内容
#[derive(Default)]
struct ImageSubmissionForm {
    name: String,
    student_id: String,
    team: String,
    task_line: String,
    task: String,
    file_extension: String,
    file_data: Vec<u8>,
    file_provided: bool,
}

pub async fn create_image_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let mut form = ImageSubmissionForm::default();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let field_name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if field_name == "file" {
            if form.file_provided {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "一次只能上传一个文件",
                )));
            }
            form.file_provided = true;

            // 先获取原始文件名，提取扩展名并校验
            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();
            let extension = Path::new(&original_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default();

            if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    format!("不支持的图片格式，允许: {}", allowed_types.join(", ")),
                )));
            }
            form.file_extension = extension.clone();

            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "文件内容与扩展名不匹配",
                        )));
                    }
                }

                // 校验大小
                if form.file_data.len() + data.len() > max_size {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "文件大小超出限制",
                    )));
                }
                form.file_data.extend_from_slice(&data);
            }
        } else {
            // 元数据文本字段
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                value.extend_from_slice(&chunk?);
            }
            let value = String::from_utf8_lossy(&value).to_string();
            match field_name.as_str() {
                "name" => form.name = value,
                "student_id" => form.student_id = value,
                "team" => form.team = value,
                "task_line" => form.task_line = value,
                "task" => form.task = value,
                _ => {}
            }
        }
    }

    // 所有校验都先于任何存储变更
    if let Err(resp) = super::create::validate_submission_fields(
        &form.name,
        &form.student_id,
        &form.team,
        &form.task_line,
        &form.task,
    ) {
        return Ok(resp);
    }

    if !form.file_provided || form.file_data.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileMissing,
            "请上传图片文件",
        )));
    }

    // 确保附件目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", TaskLineError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "创建附件目录失败",
            )),
        );
    }

    // 文件名由提交元数据加时间戳确定性拼出，扁平存放在附件目录下
    let stored_name = format!(
        "{}_{}_{}_{}_{}{}",
        sanitize_component(&form.student_id),
        sanitize_component(&form.name),
        sanitize_component(&form.task_line),
        sanitize_component(&form.task),
        chrono::Local::now().format("%Y%m%d%H%M%S"),
        form.file_extension,
    );
    let file_path = format!("{upload_dir}/{stored_name}");

    if let Err(e) = fs::write(&file_path, &form.file_data) {
        tracing::error!("{}", TaskLineError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "保存图片失败",
            )),
        );
    }

    let record = SubmissionRecord {
        id: String::new(), // 由存储层分配
        name: form.name,
        student_id: form.student_id,
        team: form.team,
        task_line: form.task_line,
        task: form.task,
        submission_type: SubmissionType::Image,
        submission_content: format!("图片文件: {stored_name}"),
        file_path: Some(file_path.clone()),
        submission_time: SubmissionRecord::now_timestamp(),
        status: SubmissionStatus::Pending,
    };

    let storage = service.get_storage(request);
    match storage.append_submission(record).await {
        Ok(stored) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stored,
            "您的任务成果已经进入审核阶段，请耐心等待",
        ))),
        Err(e) => {
            // 记录没有落盘，同时清理已写入的附件
            let _ = fs::remove_file(&file_path);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("保存提交失败: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_component_strips_path_separators() {
        assert_eq!(sanitize_component("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_component("a\\b"), "a_b");
        assert_eq!(sanitize_component(" 李伟 "), "李伟");
        assert_eq!(sanitize_component("2023001"), "2023001");
    }
}
