use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::errors::EduProofError;
use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::homeworks::requests::{
    CreateHomeworkRequest, HomeworkDetailQuery, HomeworkListQuery, UpdateHomeworkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::HomeworkService;

// 懒加载的全局 HomeworkService 实例
static HOMEWORK_SERVICE: Lazy<HomeworkService> = Lazy::new(HomeworkService::new_lazy);

// 创建作业
pub async fn create_homework(
    req: HttpRequest,
    body: web::Json<CreateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    HOMEWORK_SERVICE
        .create_homework(&req, user_id, body.into_inner())
        .await
}

// 获取作业详情（可附带提交统计）
pub async fn get_homework(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<HomeworkDetailQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .get_homework(
            &req,
            path.into_inner(),
            query.include_stats.unwrap_or(false),
        )
        .await
}

// 更新作业
pub async fn update_homework(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateHomeworkRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    HOMEWORK_SERVICE
        .update_homework(&req, path.into_inner(), user_id, body.into_inner())
        .await
}

// 删除作业（级联删除提交）
pub async fn delete_homework(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    HOMEWORK_SERVICE
        .delete_homework(&req, path.into_inner(), user_id)
        .await
}

// 列出我布置的作业
pub async fn list_my_homeworks(
    req: HttpRequest,
    query: web::Query<HomeworkListQuery>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    HOMEWORK_SERVICE
        .list_my_homeworks(&req, user_id, query.into_inner())
        .await
}

// 学生的待交作业列表
pub async fn list_pending_homeworks(
    req: HttpRequest,
    query: web::Query<HomeworkListQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .list_pending_homeworks(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_homeworks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/homeworks")
            .wrap(RequireJWT)
            .service(
                web::resource("/my")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::get().to(list_my_homeworks)),
            )
            .service(
                web::resource("/pending")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route(web::get().to(list_pending_homeworks)),
            )
            .service(
                web::resource("")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route(web::post().to(create_homework)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_homework))
                    .route(web::put().to(update_homework))
                    .route(web::delete().to(delete_homework)),
            ),
    );
}
