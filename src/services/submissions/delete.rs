use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;
use crate::services::guard::AuthorizationGuard;

/// 删除/撤回提交
/// DELETE /submissions/{id}
///
/// 仅提交者本人、仅 pending 状态；角色级检查在此，
/// 存在性、所有权与状态由存储层按序校验。
/// 提交不拥有下级资源，没有级联。
pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let role = match RequireJWT::extract_user_role(request) {
        Some(role) => role,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };
    if let Err(e) = AuthorizationGuard::check(&role, UserRole::student_roles()) {
        return Ok(e.to_http_response());
    }

    match storage.delete_submission(submission_id, student_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交已撤回"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
