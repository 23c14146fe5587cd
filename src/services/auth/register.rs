use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::auth::requests::RegisterRequest;
use crate::models::users::requests::CreateUserRequest;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

/// 注册
/// POST /auth/register
pub async fn register(
    service: &AuthService,
    request: &HttpRequest,
    req: RegisterRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_email(&req.email) {
        return Ok(EduProofError::validation(msg).to_http_response());
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        return Ok(EduProofError::validation(msg).to_http_response());
    }

    // 先行检查邮箱占用，数据库唯一约束兜底并发注册
    match storage.get_user_by_email(&req.email).await {
        Ok(Some(_)) => {
            return Ok(EduProofError::email_exists("该邮箱已注册").to_http_response());
        }
        Ok(None) => {}
        Err(e) => return Ok(e.to_http_response()),
    }

    let password_hash = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(e.to_http_response()),
    };

    let create_request = CreateUserRequest {
        email: req.email,
        password: password_hash,
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        avatar_url: None,
        role: req.role,
        class_id: req.class_id,
        parent_id: None,
    };

    match storage.create_user(create_request).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
