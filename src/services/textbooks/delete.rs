use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TextbookService;
use crate::models::ApiResponse;

/// 删除教材（仅上传者本人）
/// DELETE /textbooks/{id}
pub async fn delete_textbook(
    service: &TextbookService,
    request: &HttpRequest,
    textbook_id: i64,
    uploaded_by: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let file_store = service.get_file_store(request);

    // 先取出文件 URL，记录删除后清理文件
    let file_url = match storage.get_textbook_by_id(textbook_id).await {
        Ok(Some(textbook)) => Some(textbook.file_url),
        _ => None,
    };

    match storage.delete_textbook(textbook_id, uploaded_by).await {
        Ok(()) => {
            // 文件清理是尽力而为的，失败只记日志
            if let Some(url) = file_url
                && let Err(e) = file_store.delete(&url).await
            {
                tracing::warn!("Failed to delete textbook file {}: {}", url, e);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("教材已删除")))
        }
        Err(e) => Ok(e.to_http_response()),
    }
}
