use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::EduProofError;

// 统一的API响应结构
//
// code 为稳定的机器可读代码（成功时为 "OK"），调用方可直接据此分支，
// 不需要解析 message。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub const SUCCESS_CODE: &str = "OK";

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: SUCCESS_CODE.to_string(),
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(err: &EduProofError, data: T) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message().to_string(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: SUCCESS_CODE.to_string(),
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(err: &EduProofError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message().to_string(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl EduProofError {
    /// 转换为 HTTP 响应（状态码由错误表决定）
    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::error_empty(self))
    }
}
