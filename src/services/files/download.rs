use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::FileService;
use crate::errors::EduProofError;
use crate::utils::jwt::JwtUtils;

fn content_type_for_name(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

/// 下载文件
/// GET /files/{name}?token=...
///
/// 只接受由 sign 签发、未过期且与文件名匹配的 token。
pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    stored_name: String,
    token: Option<String>,
) -> ActixResult<HttpResponse> {
    let file_store = service.get_file_store(request);

    let Some(token) = token else {
        return Ok(EduProofError::unauthorized("缺少下载令牌").to_http_response());
    };

    match JwtUtils::verify_file_token(&token) {
        Ok(signed_name) if signed_name == stored_name => {}
        _ => {
            return Ok(
                EduProofError::unauthorized("下载令牌无效或已过期").to_http_response(),
            );
        }
    }

    match file_store.read(&stored_name).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(content_type_for_name(&stored_name))
            .body(bytes)),
        Err(e) => Ok(e.to_http_response()),
    }
}
