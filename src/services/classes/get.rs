use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;

/// 获取班级详情
/// GET /classes/{id}
pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "查询成功"))),
        Ok(None) => Ok(EduProofError::not_found("班级不存在").to_http_response()),
        Err(e) => Ok(e.to_http_response()),
    }
}
