use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;

/// 获取用户详情
/// GET /users/{id}
///
/// 可见性：本人、校长/管理员，以及家长查看自己的子女。
pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(EduProofError::user_not_found("用户不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    let is_self = current_user.id == user.id;
    let is_admin_view = matches!(current_user.role, UserRole::Principal | UserRole::Admin);
    let is_own_child = user.parent_id == Some(current_user.id);

    if !is_self && !is_admin_view && !is_own_child {
        return Ok(EduProofError::forbidden("没有查看该用户的权限").to_http_response());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "查询成功")))
}
