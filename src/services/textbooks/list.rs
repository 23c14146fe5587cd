use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TextbookService;
use crate::models::ApiResponse;
use crate::models::textbooks::requests::TextbookListQuery;

/// 列出教材
/// GET /textbooks
pub async fn list_textbooks(
    service: &TextbookService,
    request: &HttpRequest,
    query: TextbookListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_textbooks_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(e.to_http_response()),
    }
}
