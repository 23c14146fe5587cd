use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::users::entities::UserRole;

/// 学生提交统计
/// GET /students/{id}/stats
///
/// 可见性：学生本人、其家长、教师/校长/管理员。
pub async fn student_stats(
    service: &SubmissionService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    let allowed = match current_user.role {
        UserRole::Teacher | UserRole::Principal | UserRole::Admin => true,
        UserRole::Student => current_user.id == student_id,
        UserRole::Parent => match storage.get_user_by_id(student_id).await {
            Ok(Some(student)) => student.parent_id == Some(current_user.id),
            Ok(None) => {
                return Ok(EduProofError::user_not_found("学生不存在").to_http_response());
            }
            Err(e) => return Ok(e.to_http_response()),
        },
    };

    if !allowed {
        return Ok(EduProofError::forbidden("没有查看该学生统计的权限").to_http_response());
    }

    match storage.student_submission_stats(student_id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
