use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::responses::UserSummary;

/// 家长查看自己的子女
/// GET /users/me/children
pub async fn list_my_children(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    match storage.list_children(user_id).await {
        Ok(children) => {
            let items: Vec<UserSummary> = children.iter().map(UserSummary::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(items, "查询成功")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
