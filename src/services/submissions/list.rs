use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::submissions::requests::SubmissionListQuery;

/// 列出某作业的提交（仅作业的布置教师）
/// GET /homeworks/{homework_id}/submissions
pub async fn list_homework_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    homework_id: i64,
    mut query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher_id = match crate::middlewares::RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    // 所有权校验：作业必须存在且由当前教师布置
    match storage.get_homework_by_id(homework_id).await {
        Ok(Some(homework)) => {
            if homework.teacher_id != teacher_id {
                return Ok(
                    EduProofError::not_homework_owner("只能查看自己布置的作业").to_http_response(),
                );
            }
        }
        Ok(None) => {
            return Ok(EduProofError::assignment_not_found("作业不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    }

    query.homework_id = Some(homework_id);
    query.student_id = None;

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}

/// 列出我的提交（学生视角）
/// GET /submissions/my
pub async fn list_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    student_id: i64,
    mut query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    query.student_id = Some(student_id);

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}

/// 教师的待批改队列（按提交时间升序，先交先批）
/// GET /submissions/pending
pub async fn list_pending_queue(
    service: &SubmissionService,
    request: &HttpRequest,
    teacher_id: i64,
    query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_pending_submissions_for_teacher(
            teacher_id,
            query.page.unwrap_or(1),
            query.size.unwrap_or(10),
        )
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
