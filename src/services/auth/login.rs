use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use super::profile::build_role_data;
use crate::config::AppConfig;
use crate::errors::EduProofError;
use crate::models::ApiResponse;
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::LoginResponse;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

/// 登录
/// POST /auth/login
pub async fn login(
    service: &AuthService,
    request: &HttpRequest,
    req: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    // 查找用户（邮箱精确匹配）
    let user = match storage.get_user_by_email(&req.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // 不区分"邮箱不存在"与"密码错误"
            return Ok(EduProofError::invalid_credentials("邮箱或密码错误").to_http_response());
        }
        Err(e) => return Ok(e.to_http_response()),
    };

    if !verify_password(&req.password, &user.password_hash) {
        return Ok(EduProofError::invalid_credentials("邮箱或密码错误").to_http_response());
    }

    // 软删除的账号无论凭证是否有效都拒绝登录
    if !user.is_active {
        return Ok(EduProofError::account_inactive("账号已停用").to_http_response());
    }

    // 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 生成 token 对
    let refresh_expiry = if req.remember_me {
        Some(chrono::Duration::days(
            config.jwt.refresh_token_remember_me_expiry,
        ))
    } else {
        None
    };
    let token_pair = match user.generate_token_pair(refresh_expiry) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("JWT token 生成失败: {}", e);
            return Ok(
                EduProofError::serialization("令牌生成失败").to_http_response(),
            );
        }
    };

    // 将用户写入缓存，供 JWT 中间件快速认证
    let cache = service.get_cache(request);
    if let Ok(user_json) = serde_json::to_string(&user) {
        cache
            .insert_raw(
                format!("user:{}", token_pair.access_token),
                user_json,
                config.cache.default_ttl,
            )
            .await;
    }

    let role_data = match build_role_data(&storage, &user).await {
        Ok(role_data) => role_data,
        Err(e) => return Ok(e.to_http_response()),
    };

    let cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        user,
        access_token: token_pair.access_token,
        token_type: "bearer".to_string(),
        expires_in: config.jwt.access_token_expiry * 60,
        role_data,
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response, "登录成功")))
}
