use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::errors::EduProofError;
use crate::middlewares::RequireJWT;
use crate::models::textbooks::requests::{CreateTextbookRequest, TextbookListQuery};
use crate::services::TextbookService;

// 懒加载的全局 TextbookService 实例
static TEXTBOOK_SERVICE: Lazy<TextbookService> = Lazy::new(TextbookService::new_lazy);

// 创建教材
pub async fn create_textbook(
    req: HttpRequest,
    body: web::Json<CreateTextbookRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    TEXTBOOK_SERVICE
        .create_textbook(&req, user_id, body.into_inner())
        .await
}

// 列出教材
pub async fn list_textbooks(
    req: HttpRequest,
    query: web::Query<TextbookListQuery>,
) -> ActixResult<HttpResponse> {
    TEXTBOOK_SERVICE.list_textbooks(&req, query.into_inner()).await
}

// 获取教材详情
pub async fn get_textbook(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    TEXTBOOK_SERVICE.get_textbook(&req, path.into_inner()).await
}

// 删除教材
pub async fn delete_textbook(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(EduProofError::unauthorized("无法获取用户信息").to_http_response());
        }
    };

    TEXTBOOK_SERVICE
        .delete_textbook(&req, path.into_inner(), user_id)
        .await
}

// 配置路由
pub fn configure_textbooks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/textbooks")
            .wrap(RequireJWT)
            .route("", web::get().to(list_textbooks))
            .route("", web::post().to(create_textbook))
            .route("/{id}", web::get().to(get_textbook))
            .route("/{id}", web::delete().to(delete_textbook)),
    );
}
