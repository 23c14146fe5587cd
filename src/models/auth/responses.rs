use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::{User, UserRole};
use crate::models::users::responses::UserSummary;

// 角色附加数据
//
// 按 principal 的角色一次性选择的标签联合，下游不再对角色做二次分支。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub enum RoleData {
    Student {
        class_id: Option<i64>,
        parent_id: Option<i64>,
    },
    Teacher {
        homework_count: i64,
    },
    Parent {
        children: Vec<UserSummary>,
    },
    Principal {},
    Admin {},
}

impl RoleData {
    /// 角色标签（与 UserRole 一致）
    pub fn role(&self) -> UserRole {
        match self {
            RoleData::Student { .. } => UserRole::Student,
            RoleData::Teacher { .. } => UserRole::Teacher,
            RoleData::Parent { .. } => UserRole::Parent,
            RoleData::Principal {} => UserRole::Principal,
            RoleData::Admin {} => UserRole::Admin,
        }
    }
}

// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role_data: RoleData,
}

// 刷新令牌响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// 个人信息响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ProfileResponse {
    pub user: User,
    pub role_data: RoleData,
}
