use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::AuthService;
use crate::errors::{EduProofError, Result};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::auth::responses::{ProfileResponse, RoleData};
use crate::models::users::entities::{User, UserRole};
use crate::models::users::responses::UserSummary;
use crate::storage::Storage;

/// 按角色构建附加数据
///
/// 标签联合在这里一次性选定，响应的消费方不需要再对角色分支。
pub async fn build_role_data(storage: &Arc<dyn Storage>, user: &User) -> Result<RoleData> {
    let role_data = match user.role {
        UserRole::Student => RoleData::Student {
            class_id: user.class_id,
            parent_id: user.parent_id,
        },
        UserRole::Teacher => {
            let homeworks = storage
                .list_homeworks_by_teacher(user.id, None, 1, 1)
                .await?;
            RoleData::Teacher {
                homework_count: homeworks.pagination.total,
            }
        }
        UserRole::Parent => {
            let children = storage.list_children(user.id).await?;
            RoleData::Parent {
                children: children.iter().map(UserSummary::from).collect(),
            }
        }
        UserRole::Principal => RoleData::Principal {},
        UserRole::Admin => RoleData::Admin {},
    };
    Ok(role_data)
}

/// 获取个人信息
/// GET /auth/profile
pub async fn get_profile(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(EduProofError::unauthorized("未登录").to_http_response());
        }
    };

    match build_role_data(&storage, &user).await {
        Ok(role_data) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProfileResponse { user, role_data },
            "查询成功",
        ))),
        Err(e) => Ok(e.to_http_response()),
    }
}
