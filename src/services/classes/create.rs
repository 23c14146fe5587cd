use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserRole;
use crate::services::guard::AuthorizationGuard;

/// 创建班级（仅校长/管理员）
/// POST /classes
pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    req: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let role = match RequireJWT::extract_user_role(request) {
        Some(role) => role,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };
    if let Err(e) = AuthorizationGuard::check(&role, UserRole::principal_roles()) {
        return Ok(e.to_http_response());
    }

    if req.name.trim().is_empty() {
        return Ok(EduProofError::validation("班级名称不能为空").to_http_response());
    }

    match storage.create_class(req).await {
        Ok(class) => Ok(HttpResponse::Created().json(ApiResponse::success(class, "班级已创建"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
