//! 认证授权中间件

pub mod rate_limit;
pub mod require_jwt;
pub mod require_role;

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

use actix_web::HttpResponse;

use crate::errors::EduProofError;
use crate::models::ApiResponse;

// 辅助函数：创建错误响应
pub(crate) fn create_error_response(err: &EduProofError) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(err))
}
