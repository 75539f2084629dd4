pub mod create;
pub mod delete;
pub mod detail;
pub mod query;
pub mod review;
pub mod upload;
pub mod views;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{CreateSubmissionRequest, UpdateStatusRequest, UserQuery};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 创建文本提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    /// 创建图片提交（multipart 表单：元数据字段 + file）
    pub async fn create_image_submission(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::create_image_submission(self, request, payload).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: String,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 下载提交附件
    pub async fn download_attachment(
        &self,
        request: &HttpRequest,
        submission_id: String,
    ) -> ActixResult<HttpResponse> {
        detail::download_attachment(self, request, submission_id).await
    }

    /// 待审核视图（含审核不通过，按提交时间倒序）
    pub async fn list_pending(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        views::list_pending(self, request).await
    }

    /// 审核通过视图（按小分队分组）
    pub async fn list_approved(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        views::list_approved(self, request).await
    }

    /// 用户查询视图（按姓名+学号精确匹配）
    pub async fn list_user_submissions(
        &self,
        request: &HttpRequest,
        query: UserQuery,
    ) -> ActixResult<HttpResponse> {
        query::list_user_submissions(self, request, query).await
    }

    /// 审核动作：更新提交状态
    pub async fn update_status(
        &self,
        request: &HttpRequest,
        submission_id: String,
        req: UpdateStatusRequest,
    ) -> ActixResult<HttpResponse> {
        review::update_status(self, request, submission_id, req).await
    }

    /// 删除提交及其附件
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }
}
