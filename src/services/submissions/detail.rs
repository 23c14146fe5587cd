use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubmissionService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::submissions::entities::Submission;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 检查用户是否有权限查看某个提交
///
/// 可见性：提交者本人、其家长、作业的布置教师、校长/管理员。
pub(crate) async fn check_view_permission(
    storage: &Arc<dyn Storage>,
    current_user: &User,
    submission: &Submission,
) -> Result<(), EduProofError> {
    if matches!(current_user.role, UserRole::Principal | UserRole::Admin) {
        return Ok(());
    }

    if submission.student_id == current_user.id {
        return Ok(());
    }

    // 家长可以查看自己子女的提交
    if current_user.role == UserRole::Parent {
        let student = storage.get_user_by_id(submission.student_id).await?;
        if let Some(student) = student
            && student.parent_id == Some(current_user.id)
        {
            return Ok(());
        }
    }

    // 作业的布置教师可以查看
    if current_user.role == UserRole::Teacher {
        let homework = storage.get_homework_by_id(submission.homework_id).await?;
        if let Some(homework) = homework
            && homework.teacher_id == current_user.id
        {
            return Ok(());
        }
    }

    Err(EduProofError::forbidden("没有查看该提交的权限"))
}

/// 获取提交详情
/// GET /submissions/{id}?include_ai=true
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    include_ai: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    let mut submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(EduProofError::submission_not_found("提交不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    if let Err(e) = check_view_permission(&storage, &current_user, &submission).await {
        return Ok(e.to_http_response());
    }

    if !include_ai {
        submission.ai_analysis = None;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
}
