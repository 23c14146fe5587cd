use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::homeworks::requests::HomeworkListQuery;

/// 列出我布置的作业（教师视角，按截止时间倒序）
/// GET /homeworks/my
pub async fn list_my_homeworks(
    service: &HomeworkService,
    request: &HttpRequest,
    teacher_id: i64,
    query: HomeworkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_homeworks_by_teacher(
            teacher_id,
            query.class_id,
            query.page.unwrap_or(1),
            query.size.unwrap_or(10),
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}

/// 列出班级作业（按创建时间倒序）
/// GET /classes/{id}/homeworks
pub async fn list_class_homeworks(
    service: &HomeworkService,
    request: &HttpRequest,
    class_id: i64,
    query: HomeworkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_homeworks_by_class(
            class_id,
            query.subject,
            query.page.unwrap_or(1),
            query.size.unwrap_or(10),
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}

/// 学生的待交作业列表（未提交且未截止）
/// GET /homeworks/pending
pub async fn list_pending_homeworks(
    service: &HomeworkService,
    request: &HttpRequest,
    query: HomeworkListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    // 未分配班级的学生没有待交作业
    let Some(class_id) = student.class_id else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<crate::models::homeworks::entities::Homework>::new(),
            "查询成功",
        )));
    };

    match storage
        .list_pending_homeworks_for_student(
            student.id,
            class_id,
            query.page.unwrap_or(1),
            query.size.unwrap_or(10),
        )
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
