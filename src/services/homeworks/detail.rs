use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HomeworkService;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::homeworks::responses::HomeworkDetailResponse;

/// 获取作业详情
/// GET /homeworks/{id}?include_stats=true
pub async fn get_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    homework_id: i64,
    include_stats: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let homework = match storage.get_homework_by_id(homework_id).await {
        Ok(Some(homework)) => homework,
        Ok(None) => {
            return Ok(EduProofError::assignment_not_found("作业不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    let stats = if include_stats {
        match storage.get_homework_stats(homework_id).await {
            Ok(stats) => Some(stats),
            Err(e) => return Ok(e.to_http_response()),
        }
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HomeworkDetailResponse { homework, stats },
        "查询成功",
    )))
}
