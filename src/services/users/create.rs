use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::users::requests::CreateUserRequest;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

/// 创建用户（管理端）
/// POST /users
pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut req: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_email(&req.email) {
        return Ok(EduProofError::validation(msg).to_http_response());
    }
    if let Err(msg) = validate_password_simple(&req.password) {
        return Ok(EduProofError::validation(msg).to_http_response());
    }

    req.password = match hash_password(&req.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(e.to_http_response()),
    };

    match storage.create_user(req).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(user, "用户已创建"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
