use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::errors::EduProofError;
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::submissions::requests::{
    CreateSubmissionRequest, FeedbackRequest, GradeSubmissionRequest, SubmissionDetailQuery,
    SubmissionListQuery,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    SUBMISSION_SERVICE
        .create_submission(&req, user_id, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<SubmissionDetailQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, path.into_inner(), query.include_ai.unwrap_or(false))
        .await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    SUBMISSION_SERVICE
        .grade_submission(&req, path.into_inner(), user_id, body.into_inner())
        .await
}

// 留言
pub async fn add_feedback(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<FeedbackRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    SUBMISSION_SERVICE
        .add_feedback(&req, path.into_inner(), user_id, body.into_inner())
        .await
}

// 删除/撤回提交
pub async fn delete_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    SUBMISSION_SERVICE
        .delete_submission(&req, path.into_inner(), user_id)
        .await
}

// 触发 AI 分析
pub async fn trigger_ai_analysis(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .trigger_ai_analysis(&req, path.into_inner())
        .await
}

// 列出我的提交
pub async fn list_my_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    SUBMISSION_SERVICE
        .list_my_submissions(&req, user_id, query.into_inner())
        .await
}

// 教师的待批改队列
pub async fn list_pending_queue(
    req: HttpRequest,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    SUBMISSION_SERVICE
        .list_pending_queue(&req, user_id, query.into_inner())
        .await
}

// 列出某作业的提交
pub async fn list_homework_submissions(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_homework_submissions(&req, path.into_inner(), query.into_inner())
        .await
}

// 学生提交统计
pub async fn student_stats(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.student_stats(&req, path.into_inner()).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RequireJWT)
            .service(
                web::resource("/my")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route(web::get().to(list_my_submissions)),
            )
            .service(
                web::resource("/pending")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(list_pending_queue)),
            )
            .service(
                web::resource("")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route(web::post().to(create_submission)),
            )
            .service(
                web::resource("/{id}/grade")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(grade_submission)),
            )
            .service(
                web::resource("/{id}/feedback")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::put().to(add_feedback)),
            )
            .service(web::resource("/{id}/analyze").route(web::post().to(trigger_ai_analysis)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(web::delete().to(delete_submission)),
            ),
    );

    // 作业相关的提交路由
    cfg.service(
        web::scope("/api/v1/homeworks/{homework_id}/submissions")
            .wrap(RequireJWT)
            .route("", web::get().to(list_homework_submissions)),
    );

    // 学生统计
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(RequireJWT)
            .route("/{id}/stats", web::get().to(student_stats)),
    );
}
