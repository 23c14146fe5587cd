use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::auth::requests::ChangePasswordRequest;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

/// 修改密码
/// PUT /auth/password
pub async fn change_password(
    service: &AuthService,
    request: &HttpRequest,
    req: ChangePasswordRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    // 密码哈希不进缓存，必须从存储层重新读取
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(EduProofError::user_not_found("用户不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    if !verify_password(&req.current_password, &user.password_hash) {
        return Ok(EduProofError::invalid_credentials("当前密码不正确").to_http_response());
    }

    if let Err(msg) = validate_password_simple(&req.new_password) {
        return Ok(EduProofError::validation(msg).to_http_response());
    }

    let password_hash = match hash_password(&req.new_password) {
        Ok(hash) => hash,
        Err(e) => return Ok(e.to_http_response()),
    };

    match storage.update_user_password(user.id, &password_hash).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("密码已更新"))),
        Ok(false) => Ok(EduProofError::user_not_found("用户不存在").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
