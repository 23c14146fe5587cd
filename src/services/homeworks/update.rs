use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::homeworks::requests::UpdateHomeworkRequest;
use crate::models::users::entities::UserRole;
use crate::services::guard::AuthorizationGuard;

/// 更新作业
/// PUT /homeworks/{id}
///
/// 角色级检查在此，资源所有权与存在性在存储层逐次校验。
pub async fn update_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    teacher_id: i64,
    req: UpdateHomeworkRequest,
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

    match storage.update_homework(homework_id, teacher_id, req).await {
        Ok(homework) => Ok(HttpResponse::Ok().json(ApiResponse::success(homework, "作业已更新"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
