use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::guard::AuthorizationGuard;

/// 停用用户
/// DELETE /users/{id}
///
/// 仅校长/管理员。用户是软删除：记录保留，is_active=false 后无法再
/// 认证。与作业/提交的硬删除不同，这是有意保留的留存策略差异。
pub async fn deactivate_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
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

    match storage.deactivate_user(user_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("用户已停用"))),
        Ok(false) => Ok(EduProofError::user_not_found("用户不存在").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
