use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TextbookService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::textbooks::requests::CreateTextbookRequest;
use crate::models::users::entities::UserRole;
use crate::services::guard::AuthorizationGuard;

/// 创建教材（仅教师）
/// POST /textbooks
pub async fn create_textbook(
    service: &TextbookService,
    request: &HttpRequest,
    uploaded_by: i64,
    req: CreateTextbookRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let role = match RequireJWT::extract_user_role(request) {
        Some(role) => role,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };
    if let Err(e) = AuthorizationGuard::check(&role, UserRole::teacher_roles()) {
        return Ok(e.to_http_response());
    }

    if req.title.trim().is_empty() {
        return Ok(EduProofError::validation("教材标题不能为空").to_http_response());
    }
    if req.file_url.trim().is_empty() {
        return Ok(EduProofError::validation("缺少教材文件").to_http_response());
    }

    match storage.create_textbook(uploaded_by, req).await {
        Ok(textbook) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(textbook, "教材已创建")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
