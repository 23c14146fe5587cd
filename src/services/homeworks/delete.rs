use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::guard::AuthorizationGuard;

/// 删除作业
/// DELETE /homeworks/{id}
///
/// 硬删除，并在同一事务中级联删除该作业的全部提交。
/// 角色级检查在此，所有权在存储层校验。
pub async fn delete_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    teacher_id: i64,
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

    match storage.delete_homework_cascade(homework_id, teacher_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业已删除"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
