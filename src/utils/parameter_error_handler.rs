use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::errors::EduProofError;
use crate::models::ApiResponse;

/// JSON 请求体解析错误处理器
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    let response = HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
        &EduProofError::validation(format!("请求体格式错误: {detail}")),
    ));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let detail = err.to_string();
    let response = HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
        &EduProofError::validation(format!("查询参数格式错误: {detail}")),
    ));
    InternalError::from_response(err, response).into()
}
