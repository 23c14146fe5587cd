use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::config::AppConfig;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::auth::responses::RefreshResponse;
use crate::utils::jwt::JwtUtils;

/// 刷新访问令牌
/// POST /auth/refresh
pub async fn refresh_token(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let refresh_token = match JwtUtils::extract_refresh_token_from_cookie(request) {
        Some(token) => token,
        None => {
            return Ok(EduProofError::unauthorized("缺少刷新令牌").to_http_response());
        }
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(_) => {
            return Ok(
                EduProofError::unauthorized("刷新令牌无效或已过期").to_http_response(),
            );
        }
    };

    let user_id = match claims.sub.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            return Ok(EduProofError::unauthorized("刷新令牌无效").to_http_response());
        }
    };

    // 令牌主体必须仍然存在且处于活跃状态
    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(EduProofError::user_not_found("用户不存在").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    if !user.is_active {
        return Ok(EduProofError::account_inactive("账号已停用").to_http_response());
    }

    let access_token = match user.generate_access_token() {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("JWT token 生成失败: {}", e);
            return Ok(
                EduProofError::serialization("令牌生成失败").to_http_response(),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RefreshResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: config.jwt.access_token_expiry * 60,
        },
        "刷新成功",
    )))
}
