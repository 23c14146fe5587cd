use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireJWT;
use crate::models::classes::requests::{ClassListQuery, CreateClassRequest};
use crate::models::homeworks::requests::HomeworkListQuery;
use crate::services::{ClassService, HomeworkService};

// 懒加载的全局服务实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);
static HOMEWORK_SERVICE: Lazy<HomeworkService> = Lazy::new(HomeworkService::new_lazy);

// 创建班级
pub async fn create_class(
    req: HttpRequest,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.create_class(&req, body.into_inner()).await
}

// 列出班级
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassListQuery>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

// 获取班级详情
pub async fn get_class(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, path.into_inner()).await
}

// 列出班级作业
pub async fn list_class_homeworks(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<HomeworkListQuery>,
) -> ActixResult<HttpResponse> {
    HOMEWORK_SERVICE
        .list_class_homeworks(&req, path.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(RequireJWT)
            .route("", web::get().to(list_classes))
            .route("", web::post().to(create_class))
            .route("/{id}", web::get().to(get_class))
            .route("/{id}/homeworks", web::get().to(list_class_homeworks)),
    );
}
