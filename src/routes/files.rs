use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::middlewares::{RateLimit, RequireJWT};
use crate::services::FileService;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub token: Option<String>,
}

// 上传文件
pub async fn upload_file(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    FILE_SERVICE.upload(&req, payload).await
}

// 下载文件（签名链接）
pub async fn download_file(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<DownloadQuery>,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE
        .download(&req, path.into_inner(), query.into_inner().token)
        .await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .service(
                web::resource("")
                    .wrap(RateLimit::file_upload())
                    .wrap(RequireJWT)
                    .route(web::post().to(upload_file)),
            )
            // 下载通过签名 token 鉴权，不要求登录态
            .service(web::resource("/{name}").route(web::get().to(download_file))),
    );
}
