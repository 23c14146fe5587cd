use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Serialize;
use ts_rs::TS;

use super::TextbookService;
use crate::config::AppConfig;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::textbooks::entities::Textbook;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/textbook.ts")]
pub struct TextbookDetailResponse {
    pub textbook: Textbook,
    /// 限时签名下载链接
    pub download_url: String,
}

/// 获取教材详情
/// GET /textbooks/{id}
pub async fn get_textbook(
    service: &TextbookService,
    request: &HttpRequest,
    textbook_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let file_store = service.get_file_store(request);

    let textbook = match storage.get_textbook_by_id(textbook_id).await {
        Ok(Some(textbook)) => textbook,
        Ok(None) => {
            return Ok(EduProofError::not_found("教材不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    let sign_ttl = AppConfig::get().upload.sign_ttl;
    let download_url = match file_store.sign(&textbook.file_url, sign_ttl).await {
        Ok(url) => url,
        Err(e) => return Ok(e.to_http_response()),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TextbookDetailResponse {
            textbook,
            download_url,
        },
        "查询成功",
    )))
}
