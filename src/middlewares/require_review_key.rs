/*!
 * 审核口令中间件
 *
 * 此中间件把 X-Review-Key 请求头与配置的共享口令按原文比对，
 * 用于保护审核相关路由（待审核列表、审核动作、删除）。
 *
 * 这不是真正的认证：没有哈希、没有账号、没有会话过期。
 * 如果系统要重建为多用户服务，应当替换为完整的认证方案。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireReviewKey;
 *
 * cfg.service(
 *     web::scope("/api/v1/submissions")
 *         .wrap(RequireReviewKey)
 *         .route("/pending", web::get().to(list_pending)),
 * );
 * ```
 */

use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

const REVIEW_KEY_HEADER: &str = "X-Review-Key";

#[derive(Clone)]
pub struct RequireReviewKey;

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, message)),
    }
}

// 辅助函数：提取并比对审核口令
fn validate_review_key(req: &ServiceRequest) -> Result<(), String> {
    let provided = req
        .headers()
        .get(REVIEW_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| "Missing X-Review-Key header".to_string())?;

    // 共享口令按原文比对
    if provided != AppConfig::get().review.key {
        return Err("Invalid review key".to_string());
    }

    Ok(())
}

impl<S, B> Transform<S, ServiceRequest> for RequireReviewKey
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireReviewKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireReviewKeyMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireReviewKeyMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireReviewKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            // 比对审核口令
            match validate_review_key(&req) {
                Ok(()) => {
                    debug!("Review key accepted for request to {}", req.path());
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Review key check failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
