use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateUserRequest;
use crate::services::guard::AuthorizationGuard;

/// 更新用户（部分更新，角色不可变更）
/// PUT /users/{id}
///
/// 本人可以改自己的资料，否则需要校长/管理员。
pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    req: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    if current_user.id != user_id
        && let Err(e) = AuthorizationGuard::check(&current_user.role, UserRole::principal_roles())
    {
        return Ok(e.to_http_response());
    }

    match storage.update_user(user_id, req).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(user, "用户已更新"))),
        Ok(None) => Ok(EduProofError::user_not_found("用户不存在").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
